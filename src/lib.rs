//! # lsseq - condensed listings of numbered lines
//!
//! Summarizes an ordered list of lines, typically the file names of an image
//! sequence export, by collapsing:
//! 1. **Duplicates**: identical consecutive lines, reported as `x N`
//! 2. **Ranges**: consecutive lines where exactly one numeric field steps by
//!    +1 (or -1), reported by their first and last line and a count
//!
//! Each line is split into alternating numeric and literal fields, adjacent
//! lines are compared field by field, and a small state machine decides when
//! a run ends and its block is written out.
//!
//! ## Example
//!
//! ```
//! use lsseq::condense;
//!
//! let report = condense(["f1.png", "f2.png", "f3.png", "f3.png", "notes.txt"]);
//! assert_eq!(
//!     report,
//!     "\nf1.png\n   ... (3) +\nf3.png\n\nf3.png\n\nnotes.txt"
//! );
//! ```
//!
//! Input order is taken as given; nothing is sorted.

mod compare;
mod condenser;
mod error;
mod field;
mod stream;


pub use compare::{compare_decomposed, compare_fields, compare_lines, Comparison};
pub use condenser::{
    condense, Block, Condense, CondenseExt, CondenseStats, Condenser, Direction, Run,
};
pub use error::{CondenseError, Result};
pub use field::{decompose, fields, DecomposedLine, Field, FieldKind, Fields};
pub use stream::{condense_reader, lines, Lines};
