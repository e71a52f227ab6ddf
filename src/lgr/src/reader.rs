// mflgrrs-lgr/src/reader.rs

//! Record-at-a-time reader for the LGR control file.
//!
//! Every dataset occupies exactly one line. Only the leading tokens a
//! dataset needs are read; anything after them is treated as an inline
//! comment.

use crate::error::{LgrError, Result};
use std::io::{BufRead, Lines};

/// A value that can be read from a single whitespace-delimited token.
pub(crate) trait FromToken: Sized {
    fn from_token(token: &str) -> Option<Self>;
}

macro_rules! impl_from_token {
    ($($ty:ty),*) => {
        $(
            impl FromToken for $ty {
                fn from_token(token: &str) -> Option<Self> {
                    token.parse().ok()
                }
            }
        )*
    };
}

impl_from_token!(i32, u32, usize);

impl FromToken for f64 {
    // Fortran double precision exponents (1.0D-3) are accepted.
    fn from_token(token: &str) -> Option<Self> {
        token.replace(['d', 'D'], "e").parse().ok()
    }
}

pub(crate) struct Record {
    dataset: u8,
    line: String,
}

impl Record {
    pub fn first_token(&self) -> Option<&str> {
        self.line.split_whitespace().next()
    }

    /// Check the case-insensitive literal marker of the dataset.
    pub fn expect_marker(&self, marker: &'static str, heading: &str) -> Result<()> {
        let found = self.first_token().unwrap_or_default();
        if found.to_lowercase() == marker.to_lowercase() {
            Ok(())
        } else {
            Err(LgrError::Format {
                dataset: self.dataset,
                expected: marker,
                found: found.to_string(),
                heading: heading.to_string(),
            })
        }
    }

    /// First token of the record, read as a path.
    pub fn path(&self, expected: &str) -> Result<&str> {
        self.first_token()
            .ok_or_else(|| self.parse_error(expected))
    }

    pub fn values<T: FromToken, const N: usize>(&self, expected: &str) -> Result<[T; N]> {
        let values = self.value_list::<T>(N, expected)?;
        values
            .try_into()
            .map_err(|_| self.parse_error(expected))
    }

    pub fn value_list<T: FromToken>(&self, count: usize, expected: &str) -> Result<Vec<T>> {
        let mut tokens = self.line.split_whitespace();
        let mut values = Vec::new();
        for _ in 0..count {
            let value = tokens
                .next()
                .and_then(T::from_token)
                .ok_or_else(|| self.parse_error(expected))?;
            values.push(value);
        }
        Ok(values)
    }

    /// Three one-based indices converted to zero-based.
    pub fn zero_based_triple(&self, expected: &str) -> Result<[usize; 3]> {
        let [a, b, c] = self.values::<usize, 3>(expected)?;
        match (a.checked_sub(1), b.checked_sub(1), c.checked_sub(1)) {
            (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
            _ => Err(self.parse_error(expected)),
        }
    }

    pub fn parse_error(&self, expected: &str) -> LgrError {
        LgrError::Parse {
            dataset: self.dataset,
            expected: expected.to_string(),
            line: self.line.trim_end().to_string(),
        }
    }
}

pub(crate) struct ControlFileReader<R> {
    lines: Lines<R>,
    pending: Option<String>,
}

impl<R: BufRead> ControlFileReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            pending: None,
        }
    }

    /// Consume dataset 0, the leading `#` comment lines.
    pub fn read_heading(&mut self) -> Result<String> {
        let mut heading = Vec::new();
        for line in self.lines.by_ref() {
            let line = line?;
            if line.starts_with('#') {
                heading.push(line.trim_start_matches('#').trim().to_string());
            } else {
                self.pending = Some(line);
                break;
            }
        }
        Ok(heading.join("\n"))
    }

    /// Next non-blank line, read as `dataset`.
    pub fn next_record(&mut self, dataset: u8) -> Result<Record> {
        loop {
            let line = match self.pending.take() {
                Some(line) => line,
                None => match self.lines.next() {
                    Some(line) => line?,
                    None => return Err(LgrError::UnexpectedEof { dataset }),
                },
            };
            if !line.trim().is_empty() {
                return Ok(Record { dataset, line });
            }
        }
    }
}
