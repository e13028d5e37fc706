//! Lead capture: the contact record and the pattern extractor.

mod extractor;
mod record;

pub use extractor::{extract, ExtractionSource};
pub use record::LeadRecord;
