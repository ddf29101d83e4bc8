//! ## lotdraw-core::catalog
//! **Immutable topic catalog**
//!
//! Topics are loaded once at startup and never mutated. Both ids and texts are
//! unique: persisted snapshots refer to topics by text, so the reverse lookup
//! has to be unambiguous.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A discussion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub id: u32,
    pub text: String,
}

impl Topic {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Shared, read-only list of topics in configuration order.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Arc<[Topic]>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<Topic>) -> Result<Self, SetupError> {
        if topics.is_empty() {
            return Err(SetupError::EmptyCatalog);
        }

        let mut ids = HashSet::with_capacity(topics.len());
        let mut texts = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if topic.text.trim().is_empty() {
                return Err(SetupError::BlankTopicText(topic.id));
            }
            if !ids.insert(topic.id) {
                return Err(SetupError::DuplicateTopicId(topic.id));
            }
            if !texts.insert(topic.text.as_str()) {
                return Err(SetupError::DuplicateTopicText(topic.text.clone()));
            }
        }

        Ok(Self {
            topics: topics.into(),
        })
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    /// Reverse lookup used when re-deriving drawn topics from a snapshot.
    pub fn find_by_text(&self, text: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.text == text)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    pub fn as_slice(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics() -> Vec<Topic> {
        vec![Topic::new(1, "one"), Topic::new(2, "two"), Topic::new(3, "three")]
    }

    #[test]
    fn lookup_by_id_and_text() {
        let catalog = TopicCatalog::new(topics()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(2).map(|t| t.text.as_str()), Some("two"));
        assert_eq!(catalog.find_by_text("three").map(|t| t.id), Some(3));
        assert!(catalog.get(9).is_none());
        assert!(catalog.find_by_text("four").is_none());
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(
            TopicCatalog::new(Vec::new()).unwrap_err(),
            SetupError::EmptyCatalog
        );
    }

    #[test]
    fn rejects_duplicates() {
        let mut dup_id = topics();
        dup_id.push(Topic::new(2, "other"));
        assert_eq!(
            TopicCatalog::new(dup_id).unwrap_err(),
            SetupError::DuplicateTopicId(2)
        );

        let mut dup_text = topics();
        dup_text.push(Topic::new(4, "one"));
        assert_eq!(
            TopicCatalog::new(dup_text).unwrap_err(),
            SetupError::DuplicateTopicText("one".into())
        );
    }

    #[test]
    fn rejects_blank_text() {
        let err = TopicCatalog::new(vec![Topic::new(7, "   ")]).unwrap_err();
        assert_eq!(err, SetupError::BlankTopicText(7));
    }
}
