//! Error type shared by the library and the binary

use thiserror::Error;

/// Errors raised while configuring or running the synthesizer
#[derive(Error, Debug, Clone)]
pub enum EmailForgeError {
    /// Settings out of range or inconsistent
    #[error("invalid settings: {message}")]
    Config { message: String },

    /// Name pair rejected at the boundary
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// Retry budget spent without an acceptable username
    #[error("gave up after {attempts} attempts for '{name} {last_name}'")]
    Exhausted {
        name: String,
        last_name: String,
        attempts: u32,
    },

    /// Malformed JSON; `content` keeps the offending text when known
    #[error("malformed json: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("file access failed: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("internal failure: {message}")]
    Internal { message: String },

    /// Bad command line
    #[error("{message}")]
    Cli { message: String },
}

impl EmailForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    /// Create an error for a spent retry budget
    pub fn exhausted(name: impl Into<String>, last_name: impl Into<String>, attempts: u32) -> Self {
        Self::Exhausted {
            name: name.into(),
            last_name: last_name.into(),
            attempts,
        }
    }

    /// Create a JSON parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse { message: message.into(), content }
    }

    /// Create a file access error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io { message: message.into(), path }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Create a command line error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli { message: message.into() }
    }

    /// Whether retrying the same call could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Terminal-friendly message with a hint on how to fix the problem
    pub fn user_message(&self) -> String {
        let (headline, hint) = match self {
            Self::Config { message } => (
                format!("❌ Configuration problem: {}", message),
                "Check your settings file or EMAIL_FORGE_CONFIG".to_string(),
            ),
            Self::Validation { message } => (
                format!("❌ Invalid input: {}", message),
                "Names must contain ASCII letters only".to_string(),
            ),
            Self::Exhausted { name, last_name, attempts } => (
                format!(
                    "⏱️  No email for '{} {}' satisfied the constraints after {} attempts",
                    name, last_name, attempts
                ),
                "Relax min_username_length or the digit bounds, or raise max_attempts".to_string(),
            ),
            Self::Parse { message, .. } => (
                format!("❌ Malformed JSON: {}", message),
                "Compare your settings file with --print-settings output".to_string(),
            ),
            Self::Io { message, path } => (
                match path {
                    Some(path) => format!("❌ Cannot access {}: {}", path, message),
                    None => format!("❌ File access failed: {}", message),
                },
                "Check that the path exists and is writable".to_string(),
            ),
            Self::Internal { message } => (
                format!("❌ Internal failure: {}", message),
                "Run again with EMAIL_FORGE_LOG=debug and report the output".to_string(),
            ),
            Self::Cli { message } => (
                format!("❌ {}", message),
                "Use --help for usage information".to_string(),
            ),
        };
        format!("{}\n💡 {}", headline, hint)
    }
}

impl From<serde_json::Error> for EmailForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for EmailForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<tokio::task::JoinError> for EmailForgeError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("Batch worker failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, EmailForgeError>;

/// Shorthands that accept `format!` arguments
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::EmailForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::EmailForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::EmailForgeError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::EmailForgeError::validation(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::EmailForgeError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::EmailForgeError::internal(format!($fmt, $($arg)*))
    };
}
