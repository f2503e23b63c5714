//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::sync::{Notice, Settlement};

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }

    /// Status for a settled task board gesture.
    pub fn from_settlement(settlement: &Settlement, action: &str) -> Self {
        match settlement {
            Settlement::Committed => Self::success(format!("{action} saved")),
            Settlement::Skipped => Self::success(format!("Nothing to change for {action}")),
            Settlement::RolledBack(notice) => notice.into(),
        }
    }
}

impl From<&Notice> for OperationStatus {
    fn from(notice: &Notice) -> Self {
        Self::failure(notice.to_string())
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)
    }
}
