//! Results of mutating controller calls

use std::fmt;

use crate::error::Error;

/// Reported once per completed save or delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    Success,
    Failure { reason: String },
}

impl OperationOutcome {
    pub(crate) fn failed(operation: Operation, error: &Error) -> Self {
        Self::Failure {
            reason: format!("Failed to {} task: {}", operation, error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Save,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save => f.write_str("save"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_names_operation_and_cause() {
        let error = Error::Storage("disk full".to_string());
        let outcome = OperationOutcome::failed(Operation::Delete, &error);
        assert_eq!(
            outcome,
            OperationOutcome::Failure {
                reason: "Failed to delete task: Storage error: disk full".to_string()
            }
        );
        assert!(!outcome.is_success());
    }
}
