use crate::compare::Comparison;
use crate::field::DecomposedLine;
use std::fmt;
use std::iter::Fuse;
use tracing::debug;

/// The run currently being extended.
///
/// Counts are the number of matching pairs after the anchor line, so they
/// are always at least 1 inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Run {
    #[default]
    None,
    Duplicate(usize),
    Increasing(usize),
    Decreasing(usize),
}

impl Run {
    /// Returns the extended run, or `None` when `comparison` cannot continue it.
    fn extend(self, comparison: Comparison) -> Option<Run> {
        match (self, comparison) {
            (Run::None, Comparison::Equal) => Some(Run::Duplicate(1)),
            (Run::Duplicate(n), Comparison::Equal) => Some(Run::Duplicate(n + 1)),
            (Run::None, Comparison::Increment) => Some(Run::Increasing(1)),
            (Run::Increasing(n), Comparison::Increment) => Some(Run::Increasing(n + 1)),
            (Run::None, Comparison::Decrement) => Some(Run::Decreasing(1)),
            (Run::Decreasing(n), Comparison::Decrement) => Some(Run::Decreasing(n + 1)),
            _ => None,
        }
    }
}

/// Direction of a numbered range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("+"),
            Direction::Down => f.write_str("-"),
        }
    }
}

/// One summarized block of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A line unrelated to the one after it.
    Single(String),
    /// A line repeated `count` times in total.
    Duplicate { line: String, count: usize },
    /// Two lines one step apart, listed as-is.
    Pair { first: String, last: String },
    /// `count` lines stepping by one from `first` to `last`.
    Range {
        first: String,
        last: String,
        count: usize,
        direction: Direction,
    },
}

impl Block {
    /// The anchor line of the block.
    pub fn first(&self) -> &str {
        match self {
            Block::Single(line) | Block::Duplicate { line, .. } => line,
            Block::Pair { first, .. } | Block::Range { first, .. } => first,
        }
    }

    /// Number of input lines the block stands for.
    pub fn span(&self) -> usize {
        match self {
            Block::Single(_) => 1,
            Block::Pair { .. } => 2,
            Block::Duplicate { count, .. } | Block::Range { count, .. } => *count,
        }
    }

    /// Appends the block to `report`, preceded by its blank separator line.
    pub fn append_to(&self, report: &mut String) {
        use fmt::Write;

        if !report.is_empty() {
            report.push('\n');
        }
        report.push('\n');
        // Writing to a String cannot fail
        let _ = write!(report, "{self}");
    }
}

/// Writes the block's lines, without the separator.
impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Single(line) => f.write_str(line),
            Block::Duplicate { line, count } => write!(f, "{line}\n   x {count}"),
            Block::Pair { first, last } => write!(f, "{first}\n{last}"),
            Block::Range {
                first,
                last,
                count,
                direction,
            } => write!(f, "{first}\n   ... ({count}) {direction}\n{last}"),
        }
    }
}

/// Counters collected while condensing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CondenseStats {
    /// Lines pushed into the condenser
    pub input_lines: usize,
    /// Blocks emitted, of any kind
    pub blocks: usize,
    pub singles: usize,
    pub duplicates: usize,
    pub pairs: usize,
    pub ranges: usize,
}

impl CondenseStats {
    fn record(&mut self, block: &Block) {
        self.blocks += 1;
        match block {
            Block::Single(_) => self.singles += 1,
            Block::Duplicate { .. } => self.duplicates += 1,
            Block::Pair { .. } => self.pairs += 1,
            Block::Range { .. } => self.ranges += 1,
        }
    }

    /// Ratio of emitted blocks to input lines as a percentage.
    pub fn block_ratio(&self) -> f64 {
        if self.input_lines == 0 {
            0.0
        } else {
            (self.blocks as f64 / self.input_lines as f64) * 100.0
        }
    }
}

impl fmt::Display for CondenseStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input lines: {}", self.input_lines)?;
        writeln!(
            f,
            "Blocks: {} (single {}, duplicate {}, pair {}, range {})",
            self.blocks, self.singles, self.duplicates, self.pairs, self.ranges
        )?;
        write!(f, "Block ratio: {:.2}%", self.block_ratio())
    }
}

/// Push-based run tracker.
///
/// Feed lines with [`push`](Condenser::push) and call
/// [`finish`](Condenser::finish) once the input ends. Every returned block is
/// final; the last one only appears from `finish`.
#[derive(Debug, Default)]
pub struct Condenser {
    /// Most recent line, decomposed once and reused for the next comparison
    prev: Option<DecomposedLine>,
    /// Anchor of the block being built
    base: String,
    run: Run,
    stats: CondenseStats,
}

impl Condenser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The run currently being tracked.
    pub fn run(&self) -> Run {
        self.run
    }

    pub fn stats(&self) -> CondenseStats {
        self.stats
    }

    /// Adds the next line, returning a block when it ends the current one.
    pub fn push(&mut self, line: impl Into<String>) -> Option<Block> {
        let next = DecomposedLine::new(line.into());
        self.stats.input_lines += 1;

        let Some(prev) = self.prev.take() else {
            self.base = next.as_str().to_owned();
            self.prev = Some(next);
            return None;
        };

        let comparison = prev.compare(&next);
        let block = match self.run.extend(comparison) {
            Some(run) => {
                self.run = run;
                None
            }
            None => {
                let base = std::mem::replace(&mut self.base, next.as_str().to_owned());
                Some(self.flush(base, prev.into_string()))
            }
        };

        self.prev = Some(next);
        block
    }

    /// Ends the input, returning the final block if any line was pushed.
    ///
    /// The condenser is empty afterwards and can be reused.
    pub fn finish(&mut self) -> Option<Block> {
        let prev = self.prev.take()?;
        let base = std::mem::take(&mut self.base);
        Some(self.flush(base, prev.into_string()))
    }

    fn flush(&mut self, base: String, prev: String) -> Block {
        let block = match std::mem::take(&mut self.run) {
            Run::None => Block::Single(base),
            Run::Duplicate(n) => Block::Duplicate {
                line: base,
                count: n + 1,
            },
            Run::Increasing(1) | Run::Decreasing(1) => Block::Pair {
                first: base,
                last: prev,
            },
            Run::Increasing(n) => Block::Range {
                first: base,
                last: prev,
                count: n + 1,
                direction: Direction::Up,
            },
            Run::Decreasing(n) => Block::Range {
                first: base,
                last: prev,
                count: n + 1,
                direction: Direction::Down,
            },
        };

        debug!(first = block.first(), span = block.span(), "flushed block");
        self.stats.record(&block);
        block
    }
}

/// Iterator adapter yielding the blocks of a line sequence.
///
/// Created by [`CondenseExt::condense`].
pub struct Condense<I> {
    lines: Fuse<I>,
    condenser: Condenser,
    finished: bool,
}

impl<I> Condense<I> {
    pub fn stats(&self) -> CondenseStats {
        self.condenser.stats()
    }
}

impl<I> Iterator for Condense<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    type Item = Block;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(block) = self.condenser.push(line) {
                return Some(block);
            }
        }

        self.finished = true;
        self.condenser.finish()
    }
}

/// Adds [`condense`](CondenseExt::condense) to any iterator of lines.
pub trait CondenseExt: Iterator + Sized {
    fn condense(self) -> Condense<Self> {
        Condense {
            lines: self.fuse(),
            condenser: Condenser::new(),
            finished: false,
        }
    }
}

impl<I> CondenseExt for I
where
    I: Iterator,
    I::Item: Into<String>,
{
}

/// Condenses `lines` into the full text report.
///
/// Every block is preceded by a blank line, including the first, so a
/// non-empty report starts with `\n`. No input gives an empty report.
pub fn condense<I>(lines: I) -> String
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut report = String::new();
    for block in lines.into_iter().condense() {
        block.append_to(&mut report);
    }
    report
}
