use thiserror::Error;

/// Error taxonomy shared by the tracker crates.
///
/// Each variant maps to one HTTP status at the API boundary: `Validation` to 400,
/// `NotFound` to 404, `Store` to 500. The pixel endpoint swallows all of them.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl TrackerError {
    /// Builds a validation error listing the missing fields.
    pub fn missing_fields(fields: &[&str]) -> Self {
        TrackerError::Validation(format!("Missing required fields: {}", fields.join(" and ")))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message() {
        let err = TrackerError::missing_fields(&["subject", "recipient"]);
        assert_eq!(
            err.to_string(),
            "Validation error: Missing required fields: subject and recipient"
        );
    }
}
