//! # Raw Batch Archive
//!
//! Every upload is written verbatim to `<directory>/<YYYYmmdd_HHMMSS>.<ext>`,
//! named by its local receipt time at second precision. Two uploads within
//! the same second share a name and the later one replaces the earlier file.
//!
//! The archive sits outside the consistency boundary of the series: a failed
//! write is reported to the caller but never undoes an estimate.

mod error;
mod writer;


pub use error::ArchiveError;
pub use writer::{ArchiveWriter, ARCHIVE_TIMESTAMP_FORMAT};
