use thiserror::Error;

/// A single `(field, code)` entry from a structured GitHub API error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            code: code.into(),
        }
    }

    /// Build from one element of the `errors` array GitHub returns on 422s.
    ///
    /// Entries without both `field` and `code` are not classifiable and
    /// yield `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let field = value.get("field")?.as_str()?;
        let code = value.get("code")?.as_str()?;
        Some(FieldError::new(field, code))
    }
}

/// Unified error type for gh-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("GitHub API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("GitHub request failed: {0}")]
    Transport(String),

    #[error("Cannot parse tag '{tag}' as a semantic version: {source}")]
    Parse {
        tag: String,
        #[source]
        source: semver::Error,
    },

    #[error("Cannot build GitHub client: {0}")]
    Client(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gh-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a structured API error
    pub fn api(status: u16, message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        ReleaseError::Api {
            status,
            message: message.into(),
            errors,
        }
    }

    /// Create a transport error with context
    pub fn transport(msg: impl Into<String>) -> Self {
        ReleaseError::Transport(msg.into())
    }

    /// Create a client construction error with context
    pub fn client(msg: impl Into<String>) -> Self {
        ReleaseError::Client(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// The `(field, code)` list of a structured API error.
    ///
    /// Returns `None` for every other variant, which is how callers tell a
    /// structured rejection apart from a transport failure.
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            ReleaseError::Api { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl From<octocrab::Error> for ReleaseError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => {
                let errors = source
                    .errors
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .filter_map(FieldError::from_json)
                    .collect();
                ReleaseError::api(source.status_code.as_u16(), source.message, errors)
            }
            other => ReleaseError::transport(other.to_string()),
        }
    }
}
