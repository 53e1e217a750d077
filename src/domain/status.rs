//! Numeric state codes reported by the service-control tool.

use serde::{Deserialize, Serialize};

/// Current state code from a status query (`STATE : 4 RUNNING`).
///
/// Identity is the numeric code: `Unknown(4)` equals `Running` and
/// serializes as `4`, so a serde round trip always compares equal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "u32", from = "u32")]
pub enum ServiceStatusCode {
    Stopped,
    StartPending,
    StopPending,
    Running,
    ContinuePending,
    PausePending,
    Paused,
    Unknown(u32),
}

impl ServiceStatusCode {
    /// Only `RUNNING` counts; pending and unlisted codes are not running.
    pub fn is_running(&self) -> bool {
        matches!(self.normalized(), Self::Running)
    }

    /// Maps `Unknown(n)` with a listed `n` onto its named variant.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::from(self.code())
    }

    pub const fn code(&self) -> u32 {
        match self {
            Self::Stopped => 1,
            Self::StartPending => 2,
            Self::StopPending => 3,
            Self::Running => 4,
            Self::ContinuePending => 5,
            Self::PausePending => 6,
            Self::Paused => 7,
            Self::Unknown(code) => *code,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self.normalized() {
            Self::Stopped => "STOPPED",
            Self::StartPending => "START_PENDING",
            Self::StopPending => "STOP_PENDING",
            Self::Running => "RUNNING",
            Self::ContinuePending => "CONTINUE_PENDING",
            Self::PausePending => "PAUSE_PENDING",
            Self::Paused => "PAUSED",
            Self::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<u32> for ServiceStatusCode {
    fn from(code: u32) -> Self {
        match code {
            1 => Self::Stopped,
            2 => Self::StartPending,
            3 => Self::StopPending,
            4 => Self::Running,
            5 => Self::ContinuePending,
            6 => Self::PausePending,
            7 => Self::Paused,
            other => Self::Unknown(other),
        }
    }
}

impl PartialEq for ServiceStatusCode {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for ServiceStatusCode {}

impl From<ServiceStatusCode> for u32 {
    fn from(status: ServiceStatusCode) -> Self {
        status.code()
    }
}

/// Startup type code from a configuration query (`START_TYPE : 2 AUTO_START`).
///
/// Compared by numeric code, like `ServiceStatusCode`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(into = "u32", from = "u32")]
pub enum StartupTypeCode {
    Boot,
    System,
    Auto,
    Demand,
    Disabled,
    Unknown(u32),
}

impl StartupTypeCode {
    pub fn is_enabled(&self) -> bool {
        matches!(Self::from(self.code()), Self::Auto)
    }

    pub const fn code(&self) -> u32 {
        match self {
            Self::Boot => 0,
            Self::System => 1,
            Self::Auto => 2,
            Self::Demand => 3,
            Self::Disabled => 4,
            Self::Unknown(code) => *code,
        }
    }
}

impl From<u32> for StartupTypeCode {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Boot,
            1 => Self::System,
            2 => Self::Auto,
            3 => Self::Demand,
            4 => Self::Disabled,
            other => Self::Unknown(other),
        }
    }
}

impl PartialEq for StartupTypeCode {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for StartupTypeCode {}

impl From<StartupTypeCode> for u32 {
    fn from(startup: StartupTypeCode) -> Self {
        startup.code()
    }
}
