use thiserror::Error;

/// A single rule violation found at finalize time. Field names are the
/// wire-facing ones so the UI can anchor messages to its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingRequiredField { field: &'static str },

    #[error("{field} range is invalid: {detail}")]
    InvalidRange { field: &'static str, detail: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { field } => field,
            ValidationError::InvalidRange { field, .. } => field,
        }
    }
}

/// Every violated rule from one finalize pass. Finalize never fails fast;
/// the caller gets the complete list in one shot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("requirement validation failed: {}", self.join_messages())]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn mentions_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == field)
    }

    fn join_messages(&self) -> String {
        self.messages().join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let failure = ValidationFailure::new(vec![
            ValidationError::MissingRequiredField { field: "title" },
            ValidationError::InvalidRange {
                field: "experience",
                detail: "min 5 exceeds max 3".into(),
            },
        ]);

        let messages = failure.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "title is required");
        assert!(messages[1].contains("experience"));
        assert!(failure.to_string().contains("title is required"));
    }
}
