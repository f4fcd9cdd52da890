use thiserror::Error;

/// Failure of a single backend call.
///
/// The split matters to the coordinator: a transport failure during polling
/// is retried on the next tick, while a malformed body means the backend is
/// not speaking the protocol and the job is treated as failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    #[error("{}", transport_message(.status, .message))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed response: {0}")]
    Malformed(String),
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(status) => format!("request failed with status {status}: {message}"),
        None => format!("request failed: {message}"),
    }
}

impl AcquisitionError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::Malformed(_) => None,
        }
    }
}

impl From<reqwest::Error> for AcquisitionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return Self::Malformed(error.to_string());
        }
        Self::Transport {
            status: error.status().map(|status| status.as_u16()),
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for AcquisitionError {
    fn from(error: serde_json::Error) -> Self {
        Self::Malformed(error.to_string())
    }
}
