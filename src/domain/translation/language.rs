use serde::{Deserialize, Serialize};

/// A language every upload is translated into and voiced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLanguage {
    /// Display label stored on job outputs, e.g. "Hindi"
    pub name: String,
    /// ISO 639-1 code understood by the translation and speech providers
    pub code: String,
}

impl TargetLanguage {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
