use std::fmt;

use crate::error::DrawError;

/// A participant name with surrounding whitespace removed. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn parse(raw: &str) -> Result<Self, DrawError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DrawError::InvalidInput);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let name = ParticipantName::parse("  Alice \t").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn blank_is_invalid() {
        assert_eq!(ParticipantName::parse("").unwrap_err(), DrawError::InvalidInput);
        assert_eq!(ParticipantName::parse(" \n ").unwrap_err(), DrawError::InvalidInput);
    }
}
