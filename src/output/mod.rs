//! Output format writers.

mod csv;
mod json;
mod text;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonResult, JsonResultFile, JsonResultWriter, JsonSettings};
pub use text::TextWriter;
pub use types::ClassifiedInput;
pub use writer::{OutputWriter, create_writer};
