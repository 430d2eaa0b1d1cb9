pub mod answer_resolver;
pub mod extractor;
pub mod recovery;
pub mod segmenter;
pub mod shuffler;

pub use extractor::{ExtractService, Extractor, RawOutcome};
