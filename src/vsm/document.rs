use serde::{Deserialize, Serialize};

/// A labeled sentence.
/// `text` is what gets tokenized, `label` tags the document
/// and is what callers usually read back from a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub label: String,
}

impl Document {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}
