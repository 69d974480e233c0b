use storage::error::StorageError;

pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Outcome of one store call as seen by a state holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Resource<T> {
    /// A failure carrying `message`, or the default message when it is blank.
    pub fn failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Self::Failed(DEFAULT_ERROR_MESSAGE.to_string())
        } else {
            Self::Failed(message)
        }
    }
}

impl<T> From<Result<T, StorageError>> for Resource<T> {
    fn from(result: Result<T, StorageError>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(e) => {
                tracing::warn!("Store call failed: {}", e);
                Self::failed(e.to_string())
            }
        }
    }
}
