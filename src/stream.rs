use crate::condenser::{Condenser, CondenseStats};
use crate::error::{CondenseError, Result};
use std::io::BufRead;
use tracing::debug;

/// Iterator over the lines of a reader.
///
/// Strips the `\n` terminator and a trailing `\r`. A line that is not valid
/// UTF-8 yields [`CondenseError::InvalidUtf8`] with its 1-based number.
pub struct Lines<R> {
    reader: R,
    line: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: Vec::new(),
        }
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                let line = std::mem::take(&mut self.buf);
                Some(
                    String::from_utf8(line)
                        .map_err(|_| CondenseError::InvalidUtf8 { line: self.line }),
                )
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Lines of `reader`, see [`Lines`].
pub fn lines<R: BufRead>(reader: R) -> Lines<R> {
    Lines::new(reader)
}

/// Condenses every line of `reader` into a report.
///
/// Stops at the first read error; nothing is returned for a partial input.
pub fn condense_reader<R: BufRead>(reader: R) -> Result<(String, CondenseStats)> {
    let mut condenser = Condenser::new();
    let mut report = String::new();

    for line in lines(reader) {
        if let Some(block) = condenser.push(line?) {
            block.append_to(&mut report);
        }
    }
    if let Some(block) = condenser.finish() {
        block.append_to(&mut report);
    }

    let stats = condenser.stats();
    debug!(lines = stats.input_lines, blocks = stats.blocks, "condensed reader");
    Ok((report, stats))
}
