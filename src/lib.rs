pub mod config;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// Public, stable-ish API surface for consumers (convergence engines / other crates)

pub use crate::config::ControllerConfig;

pub use crate::domain::{
    CurrentState, DesiredState, ServiceStatusCode, StartupType, StartupTypeCode,
};

pub use crate::error::{Result, ServiceControlError};

pub use crate::repositories::{CommandExecutor, ShellExecutor};

pub use crate::services::ServiceController;

pub mod prelude {
    pub use crate::config::ControllerConfig;
    pub use crate::domain::{CurrentState, DesiredState, StartupType};
    pub use crate::error::{Result, ServiceControlError};
    pub use crate::repositories::{CommandExecutor, ShellExecutor};
    pub use crate::services::ServiceController;
}
