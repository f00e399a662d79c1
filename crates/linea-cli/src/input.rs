//! Turning user text into numbers, vectors and matrices.
//!
//! `parse_*` functions handle one-shot text (command-line arguments).
//! [`Prompter`] drives the interactive side: it asks, reads a line and asks
//! again until the answer is usable. Every prompt returns `Ok(None)` once the
//! input is exhausted so callers can unwind cleanly.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use linea_core::{Matrix, Vector};

/// Splits on whitespace and commas and parses every token as `f64`.
pub fn parse_numbers(line: &str) -> Result<Vec<f64>> {
    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .with_context(|| format!("'{}' is not a number", tok))
        })
        .collect()
}

/// Parses a matrix written row by row, rows separated by `;` or newlines:
/// `"1 2; 3 4"`.
pub fn parse_matrix(text: &str) -> Result<Matrix> {
    let rows = text
        .split(|c| c == ';' || c == '\n')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .enumerate()
        .map(|(i, row)| parse_numbers(row).with_context(|| format!("in row {}", i + 1)))
        .collect::<Result<Vec<_>>>()?;
    if rows.is_empty() {
        anyhow::bail!("matrix has no rows");
    }
    Matrix::from_rows(&rows).with_context(|| format!("invalid matrix: {}", text.trim()))
}

/// Parses a matrix and checks that it is square.
pub fn parse_square_matrix(text: &str) -> Result<Matrix> {
    let m = parse_matrix(text)?;
    if !m.is_square() {
        anyhow::bail!(
            "expected a square matrix, got {}x{}",
            m.nrows(),
            m.ncols()
        );
    }
    Ok(m)
}

/// Parses the columns of a basis matrix: one vector per `;`-separated group.
pub fn parse_basis(text: &str) -> Result<Matrix> {
    let vectors = parse_matrix(text)?;
    Ok(vectors.transpose())
}

/// Line-oriented prompt loop over any reader/writer pair.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Prints `prompt` and reads one trimmed line; `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads a single number, re-prompting on malformed input.
    pub fn read_number(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<f64>() {
                Ok(x) => return Ok(Some(x)),
                Err(_) => writeln!(
                    self.writer,
                    "  ERROR: enter numbers only (use '.' as decimal separator)."
                )?,
            }
        }
    }

    /// Reads a positive dimension, re-prompting on anything else.
    pub fn read_dimension(&mut self, prompt: &str) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(n) if n > 0 => return Ok(Some(n)),
                _ => writeln!(self.writer, "  ERROR: enter a positive whole number.")?,
            }
        }
    }

    /// Reads a line of exactly `expected` numbers.
    ///
    /// Malformed numbers and wrong token counts both re-prompt; the latter
    /// says how many numbers were expected.
    pub fn read_row(&mut self, prompt: &str, expected: usize) -> io::Result<Option<Vec<f64>>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            match parse_numbers(&line) {
                Ok(row) if row.len() == expected => return Ok(Some(row)),
                Ok(row) => writeln!(
                    self.writer,
                    "  ERROR: expected {} numbers, got {}. Try again.",
                    expected,
                    row.len()
                )?,
                Err(_) => writeln!(
                    self.writer,
                    "  ERROR: enter numbers only (use '.' as decimal separator)."
                )?,
            }
        }
    }

    /// Reads `rows` lines of `cols` numbers each.
    pub fn read_matrix(
        &mut self,
        rows: usize,
        cols: usize,
        row_label: &str,
    ) -> io::Result<Option<Matrix>> {
        let mut data = Vec::with_capacity(rows);
        for i in 0..rows {
            let prompt = format!("  {} {} ({} numbers): ", row_label, i + 1, cols);
            let Some(row) = self.read_row(&prompt, cols)? else {
                return Ok(None);
            };
            data.push(row);
        }
        Matrix::from_rows(&data)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Reads `count` vectors of `len` coordinates and returns the matrix
    /// having them as columns.
    pub fn read_basis(&mut self, name: &str, len: usize, count: usize) -> io::Result<Option<Matrix>> {
        let mut vectors = Vec::with_capacity(count);
        for i in 0..count {
            let prompt = format!("  Vector {} of basis {} ({} coordinates): ", i + 1, name, len);
            let Some(row) = self.read_row(&prompt, len)? else {
                return Ok(None);
            };
            vectors.push(Vector::from_vec(row));
        }
        Matrix::from_columns(&vectors)
            .map(Some)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
