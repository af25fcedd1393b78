use crate::contract::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Update,
    Delete,
}

impl WriteOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Every failure an account operation can report to its caller.
///
/// Storage details never appear in [`AccountServiceError::message`]; they are
/// logged at the handler boundary instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountServiceError {
    Validation(ValidationError),
    StorageConflict { sk_id: String },
    AccountNotFound { id: String },
    StorageRead,
    StorageWrite { operation: WriteOperation, id: String },
}

impl AccountServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::AccountNotFound { .. } => 404,
            Self::StorageConflict { .. } => 409,
            Self::StorageRead | Self::StorageWrite { .. } => 500,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(error) => error.message().to_string(),
            Self::StorageConflict { sk_id } => {
                format!("Unable to submit account with sk_id {sk_id}")
            }
            Self::AccountNotFound { id } => format!("Account {id} not found"),
            Self::StorageRead => "Failed to load accounts".to_string(),
            Self::StorageWrite { operation, id } => {
                format!("Unable to {} account {id}", operation.as_str())
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::StorageConflict { .. } => "storage_conflict",
            Self::AccountNotFound { .. } => "account_not_found",
            Self::StorageRead => "storage_read_error",
            Self::StorageWrite { .. } => "storage_write_error",
        }
    }
}

impl From<ValidationError> for AccountServiceError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl std::fmt::Display for AccountServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for AccountServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            AccountServiceError::from(ValidationError::new("bad")).status_code(),
            400
        );
        assert_eq!(
            AccountServiceError::StorageConflict {
                sk_id: "u1".to_string()
            }
            .status_code(),
            409
        );
        assert_eq!(
            AccountServiceError::AccountNotFound {
                id: "a".to_string()
            }
            .status_code(),
            404
        );
        assert_eq!(AccountServiceError::StorageRead.status_code(), 500);
        assert_eq!(
            AccountServiceError::StorageWrite {
                operation: WriteOperation::Delete,
                id: "a".to_string()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn conflict_message_names_submitted_sk_id() {
        let error = AccountServiceError::StorageConflict {
            sk_id: "u1".to_string(),
        };
        assert_eq!(error.to_string(), "Unable to submit account with sk_id u1");
    }

    #[test]
    fn write_message_names_operation_and_id() {
        let error = AccountServiceError::StorageWrite {
            operation: WriteOperation::Update,
            id: "abc".to_string(),
        };
        assert_eq!(error.message(), "Unable to update account abc");
    }
}
