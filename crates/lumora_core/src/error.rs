use miette::Diagnostic;
use thiserror::Error;

use crate::emotion::Emotion;
use crate::id::IdError;

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidId(#[from] IdError),

    #[error("Storage operation failed")]
    #[diagnostic(
        code(lumora_core::storage_failed),
        help("Failed to {operation} key '{key}'. Check that the data directory is writable")
    )]
    StorageFailed {
        operation: String,
        key: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("Invalid storage key")]
    #[diagnostic(
        code(lumora_core::invalid_storage_key),
        help("Storage keys may only contain ASCII letters, digits, '_' and '-', got '{key}'")
    )]
    InvalidStorageKey { key: String },

    #[error("Serialization error")]
    #[diagnostic(
        code(lumora_core::serialization_error),
        help("Failed to serialize/deserialize {data_type}")
    )]
    SerializationError {
        data_type: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error("Configuration error")]
    #[diagnostic(
        code(lumora_core::configuration_error),
        help("Check configuration file at {config_path}")
    )]
    ConfigurationError {
        config_path: String,
        field: String,
        expected: String,
        #[source]
        cause: ConfigError,
    },

    #[error("Speech capability failed")]
    #[diagnostic(
        code(lumora_core::speech_failed),
        help("The {capability} collaborator reported an error; voice mode falls back to idle")
    )]
    SpeechFailed {
        capability: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Low-level causes for configuration failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(String),
}

/// Rejections produced by the input validators before data reaches an engine
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Emotion vector is missing '{emotion}'")]
    #[diagnostic(
        code(lumora_core::missing_emotion),
        help("Emotion vectors must carry all seven keys: happy, sad, angry, fearful, surprised, disgusted, neutral")
    )]
    MissingEmotion { emotion: Emotion },

    #[error("Unknown emotion '{key}'")]
    #[diagnostic(
        code(lumora_core::unknown_emotion),
        help("Valid emotions: happy, sad, angry, fearful, surprised, disgusted, neutral")
    )]
    UnknownEmotion { key: String },

    #[error("Emotion '{emotion}' has intensity {value}")]
    #[diagnostic(
        code(lumora_core::emotion_out_of_range),
        help("Emotion intensities must be finite numbers between 0.0 and 1.0")
    )]
    OutOfRange { emotion: Emotion, value: f64 },

    #[error("Unknown mood level '{value}'")]
    #[diagnostic(
        code(lumora_core::unknown_mood_level),
        help("Valid mood levels: great, good, okay, low, struggling")
    )]
    UnknownMoodLevel { value: String },

    #[error("Unknown mood intensity '{value}'")]
    #[diagnostic(
        code(lumora_core::unknown_mood_intensity),
        help("Valid intensities: low, medium, high")
    )]
    UnknownIntensity { value: String },

    #[error("Missing field '{field}'")]
    #[diagnostic(code(lumora_core::missing_field))]
    MissingField { field: &'static str },

    #[error("Field '{field}' has the wrong type")]
    #[diagnostic(code(lumora_core::wrong_type), help("Expected {expected}"))]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid timestamp '{value}'")]
    #[diagnostic(
        code(lumora_core::invalid_timestamp),
        help("Timestamps must be ISO-8601 / RFC 3339, e.g. 2024-01-20T09:30:00Z")
    )]
    InvalidTimestamp { value: String },
}

impl CoreError {
    pub fn storage_failed(
        operation: impl Into<String>,
        key: impl Into<String>,
        cause: std::io::Error,
    ) -> Self {
        Self::StorageFailed {
            operation: operation.into(),
            key: key.into(),
            cause,
        }
    }

    pub fn serialization(data_type: impl Into<String>, cause: serde_json::Error) -> Self {
        Self::SerializationError {
            data_type: data_type.into(),
            cause,
        }
    }

    pub fn speech_failed(capability: impl Into<String>, error: impl Into<String>) -> Self {
        #[derive(Debug, Error)]
        #[error("{0}")]
        struct StringError(String);

        Self::SpeechFailed {
            capability: capability.into(),
            cause: Box::new(StringError(error.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn test_storage_error_mentions_key() {
        let error = CoreError::storage_failed(
            "write",
            "lumora_mood_history",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        );
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("storage_failed"));
        assert!(output.contains("lumora_mood_history"));
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let error: CoreError = ValidationError::UnknownMoodLevel {
            value: "ecstatic".to_string(),
        }
        .into();
        let report = Report::new(error);
        let output = format!("{:?}", report);
        assert!(output.contains("unknown_mood_level"));
        assert!(output.contains("great, good, okay, low, struggling"));
    }
}
