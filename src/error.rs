use thiserror::Error;

pub type Result<T = (), E = ServiceControlError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceControlError {
    #[error("Failed to execute `{command}`: {reason}")]
    Execution { command: String, reason: String },

    #[error("Unexpected output from `{command}`: {reason}")]
    MalformedOutput { command: String, reason: String },

    #[error("Invalid service name: {0}")]
    InvalidServiceName(String),

    #[error("Invalid controller configuration: {0}")]
    InvalidConfig(String),
}

impl ServiceControlError {
    pub fn execution(command: impl Into<String>, reason: impl ToString) -> Self {
        Self::Execution {
            command: command.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(command: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedOutput {
            command: command.into(),
            reason: reason.to_string(),
        }
    }

    /// Command line the failure is attributed to, if any.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Execution { command, .. } | Self::MalformedOutput { command, .. } => {
                Some(command)
            }
            Self::InvalidServiceName(_) | Self::InvalidConfig(_) => None,
        }
    }
}
