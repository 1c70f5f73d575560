//! The packed star-formation history archive.
//!
//! The surrounding simulation appends one record per redshift step. The
//! radio background reads the archived photon production rates back at
//! arbitrary redshift through [`HistoryArchive::interpolate`], with the
//! redshift column chosen per quantity by a [`BracketPolicy`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod archive;
pub mod layout;
pub mod policy;
pub mod writer;

pub use archive::HistoryArchive;
pub use layout::{ArchiveRecord, Quantity};
pub use policy::{BracketPolicy, RateBracket, TemperatureBracket, TEMPERATURE_OUT_OF_RANGE};
pub use writer::ArchiveWriter;
