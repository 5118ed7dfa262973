//! Field-qualified validation error detail.

use serde::Serialize;

/// A single validation failure attributed to one input field.
///
/// The `message` strings are a stable API contract: clients are known to
/// pattern-match on them, so phrasing changes are breaking changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Prefixes the field path with a bulk item index, e.g. `items[3].date`.
    pub fn at_index(self, index: usize) -> Self {
        Self {
            field: format!("items[{}].{}", index, self.field),
            message: self.message,
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("type", "type (string) is required");
        assert_eq!(err.to_string(), "type: type (string) is required");
    }

    #[test]
    fn test_field_error_at_index() {
        let err = FieldError::new("date", "date must be a valid date").at_index(2);
        assert_eq!(err.field, "items[2].date");
        assert_eq!(err.message, "date must be a valid date");
    }

    #[test]
    fn test_field_error_serializes_to_object() {
        let err = FieldError::new("lat", "lat must be a number between -90 and 90");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["field"], "lat");
        assert_eq!(json["message"], "lat must be a number between -90 and 90");
    }
}
