use thiserror::Error;

use crate::transfer::TransferError;

/// Application-level error type.
/// Every variant maps to a user-facing notice via [`AppError::notice`], the way
/// server errors map to response bodies in a service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not a PDF file: {name}")]
    NotPdf { name: String },

    #[error("file too large: {size} bytes (limit is 10 MiB)")]
    FileTooLarge { size: u64 },

    #[error("resume file and job description are both required")]
    MissingFields,

    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub detail: String,
}

impl AppError {
    /// Maps the error to the toast shown to the user. Infrastructure failures
    /// are logged here with their cause and surfaced with a plain message.
    pub fn notice(&self) -> Notice {
        let (title, detail) = match self {
            AppError::NotPdf { .. } => (
                "Invalid format",
                "Only PDF files are accepted.".to_string(),
            ),
            AppError::FileTooLarge { .. } => {
                ("File too large", "Maximum size is 10 MB.".to_string())
            }
            AppError::MissingFields => ("Missing information", "Fill in all fields.".to_string()),
            AppError::SubmissionInFlight => (
                "Please wait",
                "Your resume is still being processed.".to_string(),
            ),
            AppError::Transfer(e) => {
                tracing::error!("transfer error: {e}");
                ("Processing failed", e.user_message())
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                ("File error", e.to_string())
            }
        };

        Notice { title, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_notices_are_user_facing() {
        let notice = AppError::NotPdf {
            name: "photo.png".into(),
        }
        .notice();
        assert_eq!(notice.title, "Invalid format");

        let notice = AppError::FileTooLarge { size: 11 << 20 }.notice();
        assert_eq!(notice.title, "File too large");

        assert_eq!(AppError::MissingFields.notice().title, "Missing information");
    }

    #[test]
    fn transfer_notice_carries_server_message() {
        let err = AppError::from(TransferError::Api {
            status: 400,
            message: "O arquivo deve ser um PDF".to_string(),
        });
        assert_eq!(err.notice().detail, "O arquivo deve ser um PDF");
    }
}
