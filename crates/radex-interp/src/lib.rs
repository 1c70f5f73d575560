//! Bracket search and 1-D table interpolation.
//!
//! [`find_bracket`] locates a query on a monotonic axis of either
//! direction; [`interp_1d`] and [`Table`] build linear (optionally
//! log-space) interpolation on top of it; [`TurnoverTable`] is the embedded
//! minihalo turnover-mass tabulation consumed through the same machinery.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bracket;
pub mod interp;
pub mod turnover;

pub use bracket::{find_bracket, Bracket, Direction, MAX_SEARCH_ITERATIONS};
pub use interp::{interp_1d, InterpOptions, Overflow, Table};
pub use turnover::{turnover_mass, TurnoverTable};
