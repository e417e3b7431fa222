//! The narrative report: a sectioned plain-text document written by [`ReportEncoder`]
//! and read back by [`ReportDecoder`]. Section headers are the only structure the
//! decoder relies on.

mod decoder;
mod encoder;
mod format;

pub use decoder::{
    Decoded, DecodedReport, FieldSource, KnownFields, ReportDecoder, DEFAULT_DECODED_SCORE,
};
pub use encoder::{NarrativeInput, ReportEncoder};
pub use format::{NarrativeFormat, Section};
