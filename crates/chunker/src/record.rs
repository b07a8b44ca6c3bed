use serde::{Deserialize, Serialize};

/// The two columns kept from each source line. Every other field is dropped
/// during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub review_id: String,
    /// `None` when the field is absent or `null`; surfaced as an error when
    /// the record is written.
    #[serde(default)]
    pub text: Option<String>,
}

impl Review {
    pub fn new(review_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            review_id: review_id.into(),
            text: Some(text.into()),
        }
    }
}

/// A batch of records read together, tagged with its zero-based index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub records: Vec<Review>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
