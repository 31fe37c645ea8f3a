//! Line-based input helpers for the menu loop.
//!
//! Invalid numeric input is re-prompted rather than propagated; only real IO
//! failures (and EOF, surfaced as `None`) reach the caller.

use std::io::{self, BufRead, Write};

/// Read one line, trimmed. `None` on EOF.
pub fn read_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}

/// Print `prompt` and read one trimmed line. `None` on EOF.
pub fn prompt_text(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{prompt}")?;
    writer.flush()?;
    read_line(reader)
}

/// Prompt until the user enters a whole number. `None` on EOF.
pub fn prompt_i64(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<i64>> {
    loop {
        let Some(line) = prompt_text(reader, writer, prompt)? else {
            return Ok(None);
        };
        match line.parse::<i64>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(writer, "Enter a whole number.")?,
        }
    }
}

/// Prompt until the user enters a number. A comma is accepted as the decimal
/// separator. `None` on EOF.
pub fn prompt_f64(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<f64>> {
    loop {
        let Some(line) = prompt_text(reader, writer, prompt)? else {
            return Ok(None);
        };
        match line.replace(',', ".").parse::<f64>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(writer, "Enter a number (use point or comma for decimals).")?,
        }
    }
}
