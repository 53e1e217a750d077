//! Desired and current service state records.

use super::status::{ServiceStatusCode, StartupTypeCode};
use crate::error::{Result, ServiceControlError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupType {
    #[default]
    Automatic,
    Manual,
    Disabled,
}

impl StartupType {
    /// Value passed to `config <name> start= <mode>`.
    #[must_use]
    pub const fn as_config_mode(&self) -> &'static str {
        match self {
            Self::Automatic => "auto",
            Self::Manual => "demand",
            Self::Disabled => "disabled",
        }
    }
}

/// What the caller wants the service to look like. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DesiredStateFields")]
pub struct DesiredState {
    name: String,
    service_name: String,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    restart_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_command: Option<String>,
    startup_type: StartupType,
    running: bool,
    enabled: bool,
}

#[derive(Deserialize)]
struct DesiredStateFields {
    name: String,
    service_name: Option<String>,
    pattern: Option<String>,
    start_command: Option<String>,
    stop_command: Option<String>,
    restart_command: Option<String>,
    status_command: Option<String>,
    #[serde(default)]
    startup_type: StartupType,
    #[serde(default)]
    running: bool,
    #[serde(default)]
    enabled: bool,
}

impl TryFrom<DesiredStateFields> for DesiredState {
    type Error = ServiceControlError;

    fn try_from(fields: DesiredStateFields) -> Result<Self> {
        let mut desired = Self::new(fields.name)?;
        if let Some(service_name) = fields.service_name {
            desired = desired.with_service_name(service_name)?;
        }
        if let Some(pattern) = fields.pattern {
            desired = desired.with_pattern(pattern);
        }
        desired.start_command = non_blank(fields.start_command);
        desired.stop_command = non_blank(fields.stop_command);
        desired.restart_command = non_blank(fields.restart_command);
        desired.status_command = non_blank(fields.status_command);
        Ok(desired
            .with_startup_type(fields.startup_type)
            .with_running(fields.running)
            .with_enabled(fields.enabled))
    }
}

fn non_blank(command: Option<String>) -> Option<String> {
    command.filter(|c| !c.trim().is_empty())
}

/// Punctuation allowed in a service name besides letters, digits and inner
/// spaces. Everything else is a shell metacharacter for `cmd` or `sh`.
const NAME_PUNCTUATION: &[char] = &['-', '_', '.', '@', '+', ',', '=', '#', '~'];

fn validate_service_name(name: String) -> Result<String> {
    if name.trim().is_empty() {
        return Err(ServiceControlError::InvalidServiceName(
            "service name must not be empty".to_string(),
        ));
    }
    if name.trim() != name {
        return Err(ServiceControlError::InvalidServiceName(format!(
            "{name:?} has leading or trailing whitespace"
        )));
    }
    if let Some(bad) = name
        .chars()
        .find(|&c| !(c.is_alphanumeric() || c == ' ' || NAME_PUNCTUATION.contains(&c)))
    {
        return Err(ServiceControlError::InvalidServiceName(format!(
            "{name:?} contains {bad:?}"
        )));
    }
    Ok(name)
}

/// Service name as a single command-line argument; names with spaces are
/// double-quoted. Validation keeps quotes and metacharacters out.
pub(crate) fn quote_service_name(name: &str) -> String {
    if name.contains(' ') {
        format!("\"{name}\"")
    } else {
        name.to_string()
    }
}

impl DesiredState {
    /// The resource name doubles as service name and pattern until overridden.
    ///
    /// # Errors
    ///
    /// Returns `InvalidServiceName` if `name` is blank, padded, or contains shell metacharacters
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = validate_service_name(name.into())?;
        Ok(Self {
            service_name: name.clone(),
            pattern: name.clone(),
            name,
            start_command: None,
            stop_command: None,
            restart_command: None,
            status_command: None,
            startup_type: StartupType::default(),
            running: false,
            enabled: false,
        })
    }

    /// # Errors
    ///
    /// Returns `InvalidServiceName` if `service_name` is blank, padded, or contains shell metacharacters
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Result<Self> {
        let service_name = validate_service_name(service_name.into())?;
        if self.pattern == self.service_name {
            self.pattern = service_name.clone();
        }
        self.service_name = service_name;
        Ok(self)
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_start_command(mut self, command: impl Into<String>) -> Self {
        self.start_command = non_blank(Some(command.into()));
        self
    }

    pub fn with_stop_command(mut self, command: impl Into<String>) -> Self {
        self.stop_command = non_blank(Some(command.into()));
        self
    }

    pub fn with_restart_command(mut self, command: impl Into<String>) -> Self {
        self.restart_command = non_blank(Some(command.into()));
        self
    }

    pub fn with_status_command(mut self, command: impl Into<String>) -> Self {
        self.status_command = non_blank(Some(command.into()));
        self
    }

    pub fn with_startup_type(mut self, startup_type: StartupType) -> Self {
        self.startup_type = startup_type;
        self
    }

    pub fn with_running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn start_command(&self) -> Option<&str> {
        self.start_command.as_deref()
    }

    pub fn stop_command(&self) -> Option<&str> {
        self.stop_command.as_deref()
    }

    pub fn restart_command(&self) -> Option<&str> {
        self.restart_command.as_deref()
    }

    pub fn status_command(&self) -> Option<&str> {
        self.status_command.as_deref()
    }

    pub fn startup_type(&self) -> StartupType {
        self.startup_type
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

/// Observed state of a service. Only built from a status and a
/// configuration query; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentState {
    name: String,
    service_name: String,
    running: bool,
    enabled: bool,
    status_code: ServiceStatusCode,
    startup_code: StartupTypeCode,
}

impl CurrentState {
    pub(crate) fn from_queries(
        desired: &DesiredState,
        status_code: ServiceStatusCode,
        startup_code: StartupTypeCode,
    ) -> Self {
        Self {
            name: desired.name.clone(),
            service_name: desired.service_name.clone(),
            running: status_code.is_running(),
            enabled: startup_code.is_enabled(),
            status_code,
            startup_code,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn status_code(&self) -> ServiceStatusCode {
        self.status_code
    }

    pub fn startup_code(&self) -> StartupTypeCode {
        self.startup_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_service_name_and_pattern() {
        let desired = DesiredState::new("chef").unwrap();
        assert_eq!(desired.service_name(), "chef");
        assert_eq!(desired.pattern(), "chef");
        assert_eq!(desired.startup_type(), StartupType::Automatic);
        assert!(desired.start_command().is_none());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(
            DesiredState::new("   "),
            Err(ServiceControlError::InvalidServiceName(_))
        ));
        assert!(DesiredState::new("chef")
            .unwrap()
            .with_service_name("")
            .is_err());
    }

    #[test]
    fn test_shell_metacharacters_are_rejected() {
        for name in [
            "chef; echo INJECTED",
            "x & del C:\\Windows",
            "chef | more",
            "chef$(id)",
            "chef`id`",
            "%PATH%",
            "chef\"",
            "chef\tsvc",
            " chef",
        ] {
            assert!(
                matches!(
                    DesiredState::new(name),
                    Err(ServiceControlError::InvalidServiceName(_))
                ),
                "{name:?} accepted"
            );
        }

        let result: std::result::Result<DesiredState, _> =
            serde_json::from_str(r#"{"name":"web","service_name":"chef; echo INJECTED"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_names_with_spaces_are_quoted() {
        let desired = DesiredState::new("My Service").unwrap();
        assert_eq!(quote_service_name(desired.service_name()), "\"My Service\"");
        assert_eq!(quote_service_name("W3SVC"), "W3SVC");
        assert!(DesiredState::new("MSSQL$SQLEXPRESS").is_err());
        assert!(DesiredState::new("wuauserv_1.2-beta").is_ok());
    }

    #[test]
    fn test_service_name_override_moves_default_pattern() {
        let desired = DesiredState::new("web")
            .unwrap()
            .with_service_name("W3SVC")
            .unwrap();
        assert_eq!(desired.name(), "web");
        assert_eq!(desired.service_name(), "W3SVC");
        assert_eq!(desired.pattern(), "W3SVC");

        let desired = DesiredState::new("web")
            .unwrap()
            .with_pattern("w3wp")
            .with_service_name("W3SVC")
            .unwrap();
        assert_eq!(desired.pattern(), "w3wp");
    }

    #[test]
    fn test_blank_custom_command_means_builtin() {
        let desired = DesiredState::new("chef").unwrap().with_start_command("  ");
        assert!(desired.start_command().is_none());
    }

    #[test]
    fn test_startup_type_config_modes() {
        assert_eq!(StartupType::Automatic.as_config_mode(), "auto");
        assert_eq!(StartupType::Manual.as_config_mode(), "demand");
        assert_eq!(StartupType::Disabled.as_config_mode(), "disabled");
    }

    #[test]
    fn test_deserialize_desired_state() {
        let desired: DesiredState = serde_json::from_str(
            r#"{"name":"chef","start_command":"net start chef","startup_type":"manual","running":true}"#,
        )
        .unwrap();
        assert_eq!(desired.service_name(), "chef");
        assert_eq!(desired.start_command(), Some("net start chef"));
        assert_eq!(desired.startup_type(), StartupType::Manual);
        assert!(desired.running());
        assert!(!desired.enabled());
    }

    #[test]
    fn test_deserialize_rejects_empty_name() {
        let result: std::result::Result<DesiredState, _> =
            serde_json::from_str(r#"{"name":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_current_state_serializes_codes() {
        let desired = DesiredState::new("chef").unwrap();
        let current =
            CurrentState::from_queries(&desired, ServiceStatusCode::Running, StartupTypeCode::Demand);
        let json = serde_json::to_value(&current).unwrap();
        assert_eq!(json["running"], true);
        assert_eq!(json["enabled"], false);
        assert_eq!(json["status_code"], 4);
        assert_eq!(json["startup_code"], 3);
    }
}
