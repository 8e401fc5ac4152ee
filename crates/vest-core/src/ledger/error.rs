use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid spender principal {spender:?}: {reason}")]
    InvalidSpender { spender: String, reason: String },

    #[error("Ledger call rejected (code {code}): {message}")]
    Rejected { code: u32, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for reject messages kept in errors
const MAX_REJECT_MESSAGE_LENGTH: usize = 500;

impl LedgerError {
    /// Truncate a reject message to avoid logging excessive data
    fn truncate_message(message: &str) -> String {
        if message.len() <= MAX_REJECT_MESSAGE_LENGTH {
            return message.to_string();
        }
        let mut end = MAX_REJECT_MESSAGE_LENGTH;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &message[..end],
            message.len()
        )
    }

    pub fn rejected(code: u32, message: &str) -> Self {
        LedgerError::Rejected {
            code,
            message: Self::truncate_message(message),
        }
    }

    pub fn invalid_spender(spender: &str, reason: impl std::fmt::Display) -> Self {
        LedgerError::InvalidSpender {
            spender: spender.to_string(),
            reason: reason.to_string(),
        }
    }
}
