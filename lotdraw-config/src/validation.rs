// lotdraw-config/src/validation.rs
//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use std::collections::HashSet;
use std::path::Path;

use validator::ValidationError;

use crate::draw::TopicConfig;

/// Validate that a name is not only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Validate the topic catalog: unique ids, unique non-blank texts.
pub fn validate_topics(topics: &[TopicConfig]) -> Result<(), ValidationError> {
    let mut ids = HashSet::new();
    let mut texts = HashSet::new();

    for topic in topics {
        if topic.text.trim().is_empty() {
            return Err(ValidationError::new("blank_topic_text"));
        }
        if !ids.insert(topic.id) {
            return Err(ValidationError::new("duplicate_topic_id"));
        }
        if !texts.insert(topic.text.as_str()) {
            return Err(ValidationError::new("duplicate_topic_text"));
        }
    }
    Ok(())
}

/// Validate a `tracing` level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error", "off"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate that the snapshot path names a file.
pub fn validate_snapshot_path(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(ValidationError::new("invalid_snapshot_path"));
    }
    Ok(())
}
