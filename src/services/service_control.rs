//! Service controller - queries and changes one service through the
//! service-control tool, or through caller-supplied command lines.

use crate::config::ControllerConfig;
use crate::domain::resource::quote_service_name;
use crate::domain::{CurrentState, DesiredState, StartupType};
use crate::error::Result;
use crate::repositories::{elevation, CommandExecutor, ShellExecutor};
use crate::services::status_parser;
use tracing::{debug, info, instrument, warn};

/// Last-line tokens meaning a start (or restart) went through.
pub const START_MARKERS: &[&str] = &["RUNNING", "START_PENDING"];
/// Last-line tokens meaning a stop went through.
pub const STOP_MARKERS: &[&str] = &["STOPPED", "STOP_PENDING"];
/// Last-line token meaning a configuration change was accepted.
pub const CONFIG_SUCCESS_MARKER: &str = "SUCCESS";

pub struct ServiceController<E = ShellExecutor> {
    desired: DesiredState,
    config: ControllerConfig,
    executor: E,
}

impl ServiceController<ShellExecutor> {
    pub fn new(desired: DesiredState) -> Self {
        Self::with_executor(desired, ShellExecutor::new())
    }
}

impl<E: CommandExecutor> ServiceController<E> {
    pub fn with_executor(desired: DesiredState, executor: E) -> Self {
        Self {
            desired,
            config: ControllerConfig::default(),
            executor,
        }
    }

    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate
    pub fn with_config(mut self, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn desired(&self) -> &DesiredState {
        &self.desired
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Query run state and startup type into a fresh `CurrentState`.
    ///
    /// # Errors
    ///
    /// Returns `Execution` if either query cannot run, `MalformedOutput` if
    /// either output lacks the expected code
    #[instrument(skip(self), fields(service = %self.desired.service_name()))]
    pub fn load_current_resource(&self) -> Result<CurrentState> {
        let status_command = self
            .desired
            .status_command()
            .map_or_else(|| self.builtin("query"), str::to_string);
        let output = self.executor.run(&status_command)?;
        let status = status_parser::parse_status(&status_command, &output)?;

        let config_command = self.builtin("qc");
        let output = self.executor.run(&config_command)?;
        let startup = status_parser::parse_config(&config_command, &output)?;

        let current = CurrentState::from_queries(&self.desired, status, startup);
        debug!(
            "{}: running: {} ({}), enabled: {} (start type {})",
            self.desired.name(),
            current.running(),
            status.as_str(),
            current.enabled(),
            startup.code()
        );
        Ok(current)
    }

    /// # Errors
    ///
    /// Returns `Execution` if the start command cannot run
    #[instrument(skip(self), fields(service = %self.desired.service_name()))]
    pub fn start_service(&self) -> Result<bool> {
        let command = self
            .desired
            .start_command()
            .map_or_else(|| self.builtin("start"), str::to_string);
        self.run_action("start", &command, START_MARKERS)
    }

    /// # Errors
    ///
    /// Returns `Execution` if the stop command cannot run
    #[instrument(skip(self), fields(service = %self.desired.service_name()))]
    pub fn stop_service(&self) -> Result<bool> {
        let command = self
            .desired
            .stop_command()
            .map_or_else(|| self.builtin("stop"), str::to_string);
        self.run_action("stop", &command, STOP_MARKERS)
    }

    /// Without a restart command this is stop followed by start; the start
    /// is attempted whatever the stop reported, and its result is returned.
    ///
    /// # Errors
    ///
    /// Returns `Execution` if the restart command, or the start command of
    /// the stop/start pair, cannot run
    #[instrument(skip(self), fields(service = %self.desired.service_name()))]
    pub fn restart_service(&self) -> Result<bool> {
        if let Some(command) = self.desired.restart_command() {
            return self.run_action("restart", command, START_MARKERS);
        }

        match self.stop_service() {
            Ok(true) => debug!("{}: stopped, starting", self.desired.name()),
            Ok(false) => warn!(
                "{}: stop not confirmed, starting anyway",
                self.desired.name()
            ),
            Err(e) => warn!("{}: stop failed ({}), starting anyway", self.desired.name(), e),
        }
        self.start_service()
    }

    /// Apply the desired startup type.
    ///
    /// # Errors
    ///
    /// Returns `Execution` if the config command cannot run
    #[instrument(skip(self), fields(service = %self.desired.service_name()))]
    pub fn enable_service(&self) -> Result<bool> {
        self.set_startup_type(self.desired.startup_type())
    }

    /// # Errors
    ///
    /// Returns `Execution` if the config command cannot run
    #[instrument(skip(self), fields(service = %self.desired.service_name()))]
    pub fn disable_service(&self) -> Result<bool> {
        self.set_startup_type(StartupType::Disabled)
    }

    fn set_startup_type(&self, startup_type: StartupType) -> Result<bool> {
        let command = format!(
            "{} start= {}",
            self.builtin("config"),
            startup_type.as_config_mode()
        );
        self.run_action("config", &command, &[CONFIG_SUCCESS_MARKER])
    }

    fn builtin(&self, subcommand: &str) -> String {
        format!(
            "{} {} {}",
            self.config.tool,
            subcommand,
            quote_service_name(self.desired.service_name())
        )
    }

    /// Elevation only exists on Windows; elsewhere the check is skipped.
    fn lacks_elevation(&self) -> bool {
        cfg!(windows) && self.config.check_elevation && !elevation::is_admin()
    }

    fn run_action(&self, action: &str, command: &str, markers: &[&str]) -> Result<bool> {
        if self.lacks_elevation() {
            warn!(
                "{}: {} without an elevated token may be denied",
                self.desired.name(),
                action
            );
        }

        let output = self.executor.run(command)?;
        debug!("{}: {} output: {:?}", self.desired.name(), action, output);

        let succeeded = last_line_contains(&output, markers);
        if succeeded {
            info!("{}: {} succeeded", self.desired.name(), action);
        } else {
            warn!(
                "{}: {} did not report {}",
                self.desired.name(),
                action,
                markers.join(" or ")
            );
        }
        Ok(succeeded)
    }
}

/// Only the final line counts; earlier lines are ignored.
fn last_line_contains(output: &[String], markers: &[&str]) -> bool {
    output
        .last()
        .is_some_and(|line| markers.iter().any(|marker| line.contains(marker)))
}
