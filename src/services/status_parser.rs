//! Positional parsing of `query` and `qc` output.
//!
//! `sc query <name>` prints the state on its 4th line and `sc qc <name>` the
//! start type on its 5th:
//!
//! ```text
//!
//! SERVICE_NAME: chef
//!         TYPE               : 10  WIN32_OWN_PROCESS
//!         STATE              : 4  RUNNING
//! ```
//!
//! The code is the first token after the `LABEL :` prefix, or the first token
//! of the line when there is no prefix.

use crate::domain::{ServiceStatusCode, StartupTypeCode};
use crate::error::{Result, ServiceControlError};

/// Zero-based line carrying the state code in status query output.
pub const STATUS_LINE: usize = 3;
/// Zero-based line carrying the start type code in configuration query output.
pub const CONFIG_LINE: usize = 4;

/// # Errors
///
/// Returns `MalformedOutput` if the 4th line is missing or has no numeric leading token
pub fn parse_status<S: AsRef<str>>(command: &str, lines: &[S]) -> Result<ServiceStatusCode> {
    code_at(command, lines, STATUS_LINE).map(ServiceStatusCode::from)
}

/// # Errors
///
/// Returns `MalformedOutput` if the 5th line is missing or has no numeric leading token
pub fn parse_config<S: AsRef<str>>(command: &str, lines: &[S]) -> Result<StartupTypeCode> {
    code_at(command, lines, CONFIG_LINE).map(StartupTypeCode::from)
}

fn code_at<S: AsRef<str>>(command: &str, lines: &[S], index: usize) -> Result<u32> {
    let line: &str = lines.get(index).map(|l| l.as_ref()).ok_or_else(|| {
        ServiceControlError::malformed(
            command,
            format!("expected at least {} lines, got {}", index + 1, lines.len()),
        )
    })?;

    let value = line.split_once(':').map_or(line, |(_, rest)| rest);
    let token = value.split_whitespace().next().ok_or_else(|| {
        ServiceControlError::malformed(command, format!("line {} has no code: {line:?}", index + 1))
    })?;

    token.parse().map_err(|_| {
        ServiceControlError::malformed(
            command,
            format!("line {} starts with {token:?}, not a code", index + 1),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SC_QUERY: &[&str] = &[
        "",
        "SERVICE_NAME: chef",
        "        TYPE               : 10  WIN32_OWN_PROCESS",
        "        STATE              : 4  RUNNING",
        "                                (STOPPABLE, NOT_PAUSABLE, ACCEPTS_SHUTDOWN)",
        "        WIN32_EXIT_CODE    : 0  (0x0)",
    ];

    const SC_QC: &[&str] = &[
        "[SC] QueryServiceConfig SUCCESS",
        "",
        "SERVICE_NAME: chef",
        "        TYPE               : 10  WIN32_OWN_PROCESS",
        "        START_TYPE         : 3   DEMAND_START",
        "        ERROR_CONTROL      : 1   NORMAL",
    ];

    #[test]
    fn test_bare_status_code() {
        assert_eq!(
            parse_status("sc query chef", &["", "", "", "4"]).unwrap(),
            ServiceStatusCode::Running
        );
        assert_eq!(
            parse_status("sc query chef", &["", "", "", "1"]).unwrap(),
            ServiceStatusCode::Stopped
        );
    }

    #[test]
    fn test_labelled_status_line() {
        assert_eq!(
            parse_status("sc query chef", SC_QUERY).unwrap(),
            ServiceStatusCode::Running
        );
    }

    #[test]
    fn test_bare_config_code() {
        assert_eq!(
            parse_config("sc qc chef", &["", "", "", "", "2"]).unwrap(),
            StartupTypeCode::Auto
        );
    }

    #[test]
    fn test_labelled_config_line() {
        assert_eq!(
            parse_config("sc qc chef", SC_QC).unwrap(),
            StartupTypeCode::Demand
        );
    }

    #[test]
    fn test_short_output_is_malformed() {
        let err = parse_status("sc query chef", &["", "", ""]).unwrap_err();
        assert!(matches!(err, ServiceControlError::MalformedOutput { .. }));

        let err = parse_config("sc qc chef", &["", "", "", "2"]).unwrap_err();
        assert_eq!(err.command(), Some("sc qc chef"));
    }

    #[test]
    fn test_blank_code_line_is_malformed() {
        let err = parse_status("sc query chef", &["", "", "", "   "]).unwrap_err();
        assert!(matches!(err, ServiceControlError::MalformedOutput { .. }));
    }

    #[test]
    fn test_non_numeric_code_is_malformed() {
        let output = [
            "[SC] EnumQueryServicesStatus:OpenService FAILED 1060:",
            "",
            "The specified service does not exist as an installed service.",
            "",
        ];
        let err = parse_status("sc query nope", &output).unwrap_err();
        assert!(matches!(err, ServiceControlError::MalformedOutput { .. }));
    }

    #[test]
    fn test_unlisted_code_is_not_running() {
        let status = parse_status("sc query chef", &["", "", "", "12"]).unwrap();
        assert_eq!(status, ServiceStatusCode::Unknown(12));
        assert!(!status.is_running());
    }
}
