// Error types for reading and writing routes files

use std::fmt;
use thiserror::Error;

use crate::routes::netmask::NetmaskError;

/// Route fields checked before a record is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteField {
    Network,
    Netmask,
    Gateway,
    Interface,
    Options,
}

impl fmt::Display for RouteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouteField::Network => "network",
            RouteField::Netmask => "netmask",
            RouteField::Gateway => "gateway",
            RouteField::Interface => "interface",
            RouteField::Options => "options",
        };
        f.write_str(name)
    }
}

/// Why a line could not be turned into a route record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("expected at least 4 fields, found {found}")]
    TooFewFields { found: usize },

    #[error(transparent)]
    InvalidNetmask(#[from] NetmaskError),
}

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum RouteFileError {
    #[error("{file}:{line}: malformed route line: {reason}")]
    MalformedLine {
        file: String,
        line: usize,
        reason: MalformedReason,
    },

    #[error("{file}: route '{record}' is missing the required parameter '{field}'")]
    MissingField {
        file: String,
        record: String,
        field: RouteField,
    },

    #[error("{file}: route '{record}' has an invalid {field} {value:?}")]
    InvalidField {
        file: String,
        record: String,
        field: RouteField,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using RouteFileError
pub type RouteFileResult<T> = Result<T, RouteFileError>;

impl RouteFileError {
    /// Convert error to user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            RouteFileError::MalformedLine { line, .. } => {
                format!("Line {} of the routes file needs 'network netmask gateway interface [options]'.", line)
            }
            RouteFileError::MissingField { record, field, .. } => {
                format!("Route {} has no {}. Set it before writing the routes file.", record, field)
            }
            RouteFileError::InvalidField { record, field, .. } => {
                format!("Route {} has a {} that cannot be written on one route line.", record, field)
            }
            RouteFileError::Io(_) => {
                "File system error. Check permissions and that the file exists.".to_string()
            }
            RouteFileError::Serialization(_) => {
                "Route data is not valid JSON for a list of routes.".to_string()
            }
            RouteFileError::Config(_) => {
                "Configuration error. Check your config file or command-line arguments.".to_string()
            }
        }
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, RouteFileError::MalformedLine { .. })
    }

    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            RouteFileError::MissingField { .. } | RouteFileError::InvalidField { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouteFileError::MalformedLine {
            file: "routes".to_string(),
            line: 3,
            reason: MalformedReason::TooFewFields { found: 3 },
        };
        assert_eq!(
            err.to_string(),
            "routes:3: malformed route line: expected at least 4 fields, found 3"
        );
        assert!(err.is_parse_error());
        assert!(!err.is_format_error());

        let err = RouteFileError::MissingField {
            file: "routes".to_string(),
            record: "172.28.45.0".to_string(),
            field: RouteField::Gateway,
        };
        assert_eq!(
            err.to_string(),
            "routes: route '172.28.45.0' is missing the required parameter 'gateway'"
        );
        assert!(err.is_format_error());
        assert!(err.user_message().contains("gateway"));

        let err = RouteFileError::InvalidField {
            file: "routes".to_string(),
            record: "10.0.0.0/8".to_string(),
            field: RouteField::Interface,
            value: "eth0 table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "routes: route '10.0.0.0/8' has an invalid interface \"eth0 table\""
        );
        assert!(err.is_format_error());
    }

    #[test]
    fn test_invalid_netmask_reason() {
        let reason = MalformedReason::from(NetmaskError::Unrecognized("bogus".to_string()));
        assert_eq!(reason.to_string(), "unrecognized netmask syntax 'bogus'");
    }
}
