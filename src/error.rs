//! Unified error types for the poller and its collaborators.

use std::fmt;

// ---------------------------------------------------------------------------
// ServiceError
// ---------------------------------------------------------------------------

/// Errors from a status service call.
#[derive(Debug)]
pub enum ServiceError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the remote endpoint.
    Status { code: u16, body: String },
    /// The endpoint answered but the payload could not be decoded.
    InvalidResponse(String),
    /// The service has no remote job to trigger.
    Unsupported,
}

impl ServiceError {
    /// HTTP status code for `Status` errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status { code, body } => write!(f, "status {code}: {body}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
            Self::Unsupported => write!(f, "operation not supported by this service"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// PollError
// ---------------------------------------------------------------------------

/// Why a trigger call did not start the remote job.
#[derive(Debug)]
pub enum ActionFailure {
    /// The service answered with a negative result.
    Rejected,
    /// The call itself errored.
    Service(ServiceError),
}

impl fmt::Display for ActionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected => write!(f, "service returned false"),
            Self::Service(e) => write!(f, "{e}"),
        }
    }
}

/// Error signal forwarded to the view. Never alters poller state.
#[derive(Debug)]
pub enum PollError {
    FetchFailed(ServiceError),
    ActionFailed(ActionFailure),
}

impl fmt::Display for PollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFailed(e) => write!(f, "fetch failed: {e}"),
            Self::ActionFailed(e) => write!(f, "action failed: {e}"),
        }
    }
}

impl std::error::Error for PollError {}

// ---------------------------------------------------------------------------
// PollerClosed
// ---------------------------------------------------------------------------

/// Returned by handle methods once the poller actor has exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerClosed;

impl fmt::Display for PollerClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poller command channel closed")
    }
}

impl std::error::Error for PollerClosed {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// PreferencesError
// ---------------------------------------------------------------------------

/// Errors reading or writing the preferences store.
#[derive(Debug)]
pub enum PreferencesError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
            Self::Invalid(msg) => write!(f, "invalid preferences: {msg}"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl From<std::io::Error> for PreferencesError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PreferencesError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_display() {
        let e = ServiceError::Status {
            code: 503,
            body: "maintenance".into(),
        };
        assert_eq!(e.to_string(), "status 503: maintenance");
        assert_eq!(e.status_code(), Some(503));
        assert_eq!(
            ServiceError::InvalidResponse("missing state".into()).to_string(),
            "invalid response: missing state"
        );
        assert!(ServiceError::Unsupported.status_code().is_none());
    }

    #[test]
    fn poll_error_wraps_both_kinds() {
        let fetch = PollError::FetchFailed(ServiceError::Unsupported);
        assert!(fetch.to_string().starts_with("fetch failed:"), "got: {fetch}");

        let action = PollError::ActionFailed(ActionFailure::Rejected);
        assert_eq!(action.to_string(), "action failed: service returned false");
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let e = ConfigError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("file not found"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn preferences_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e = PreferencesError::from(json_err);
        assert!(e.to_string().starts_with("json:"), "got: {e}");
    }
}
