//! Error types for the nexpanel application.
//!
//! Uses `thiserror` for library-style errors with automatic `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while operating on the page document.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("No element with id '{id}' in the document")]
    ElementNotFound { id: String },

    #[error("Action channel is closed")]
    ActionChannelClosed,

    #[error("Failed to render page: {0}")]
    Render(#[from] serde_json::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Unknown locale '{0}'")]
    UnknownLocale(String),
}

impl AppError {
    /// Returns a user-friendly message for display on the console.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Page(PageError::ElementNotFound { .. }) => {
                "The page is missing an element this action needs."
            }
            Self::Page(PageError::ActionChannelClosed) => "The page is shutting down.",
            Self::Page(PageError::Render(_)) => "Could not render the page.",
            Self::Config(ConfigError::UnknownLocale(_)) => {
                "Unsupported clock locale. Please check settings."
            }
            Self::Config(_) => "Configuration error. Please check settings.",
            Self::Io(_) => "An I/O error occurred.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = AppError::Page(PageError::ElementNotFound {
            id: "sidebar".into(),
        });
        assert_eq!(
            err.user_message(),
            "The page is missing an element this action needs."
        );

        let err = AppError::Config(ConfigError::UnknownLocale("xx-YY".into()));
        assert_eq!(
            err.user_message(),
            "Unsupported clock locale. Please check settings."
        );
    }

    #[test]
    fn test_element_not_found_names_the_id() {
        let err = PageError::ElementNotFound { id: "hora".into() };
        assert_eq!(err.to_string(), "No element with id 'hora' in the document");
    }
}
