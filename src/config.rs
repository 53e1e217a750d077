//! Controller configuration.

use crate::error::{Result, ServiceControlError};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the service-control tool.
pub const TOOL_ENV_VAR: &str = "SC_SERVICE_TOOL";

const DEFAULT_TOOL: &str = "sc";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Tool prepended to every built-in command (`<tool> query <name>`).
    pub tool: String,
    /// Warn before mutating a service from a non-elevated process.
    pub check_elevation: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            check_elevation: true,
        }
    }
}

impl ControllerConfig {
    /// Defaults, with the tool taken from `SC_SERVICE_TOOL` when it is set
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the variable is set but blank
    pub fn from_env() -> Result<Self> {
        Self::default().with_tool_override(std::env::var(TOOL_ENV_VAR).ok())
    }

    fn with_tool_override(mut self, tool: Option<String>) -> Result<Self> {
        if let Some(tool) = tool {
            self.tool = tool.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the tool is blank
    pub fn validate(&self) -> Result {
        if self.tool.trim().is_empty() {
            return Err(ServiceControlError::InvalidConfig(
                "tool must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool_is_sc() {
        let config = ControllerConfig::default();
        assert_eq!(config.tool, "sc");
        assert!(config.check_elevation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tool_override() {
        let config = ControllerConfig::default()
            .with_tool_override(Some(r" C:\Windows\System32\sc.exe ".to_string()))
            .unwrap();
        assert_eq!(config.tool, r"C:\Windows\System32\sc.exe");
    }

    #[test]
    fn test_blank_tool_override_is_rejected() {
        let result = ControllerConfig::default().with_tool_override(Some("  ".to_string()));
        assert!(matches!(result, Err(ServiceControlError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ControllerConfig =
            serde_json::from_str(r#"{"check_elevation":false}"#).unwrap();
        assert_eq!(config.tool, "sc");
        assert!(!config.check_elevation);
    }
}
