pub mod docx;
pub mod error;
pub mod format;
pub mod pdf;
pub mod service;

pub use error::ExtractionError;
pub use format::DocumentFormat;
pub use service::TextExtractor;
