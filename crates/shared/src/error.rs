use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter both pickup and dropoff IDs";
pub const SERVICE_FAILURE_MESSAGE: &str = "Failed to get prediction";
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Error connecting to backend";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Service,
    Decode,
}

/// Why a single submission attempt ended in the failed state.
///
/// Every variant is terminal for its attempt; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    #[error("{}", transport_message(.message))]
    Transport { message: String },
    #[error("{}", SERVICE_FAILURE_MESSAGE)]
    Service { status: u16 },
    #[error("{}", decode_message(.message))]
    Decode { message: String },
}

fn transport_message(detail: &str) -> String {
    if detail.trim().is_empty() {
        TRANSPORT_FALLBACK_MESSAGE.to_string()
    } else {
        format!("{TRANSPORT_FALLBACK_MESSAGE}: {detail}")
    }
}

fn decode_message(detail: &str) -> String {
    if detail.trim().is_empty() {
        SERVICE_FAILURE_MESSAGE.to_string()
    } else {
        format!("Invalid prediction response: {detail}")
    }
}

impl PredictionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// User-facing text; never empty.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the view should point the user at the backend address.
    pub fn suggests_backend_check(&self) -> bool {
        !matches!(self, Self::Validation)
    }
}
