use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Expected an object for {context}, found {found}")]
    NotAnObject { context: String, found: String },

    #[error("Property '{property}' is not declared by '{schema}'")]
    UnknownProperty { schema: String, property: String },

    #[error("Unknown model: {name}")]
    UnknownModel { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl ModelError {
    /// 是否為呼叫端誤用模型 API（而非環境錯誤）
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            ModelError::NotAnObject { .. } | ModelError::UnknownProperty { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ModelError::NotAnObject { context, found } => {
                format!("Model data must be a JSON object ({} received {})", context, found)
            }
            ModelError::UnknownProperty { schema, property } => {
                format!("'{}' has no property named '{}'", schema, property)
            }
            ModelError::UnknownModel { name } => {
                format!("No model named '{}' is defined in the schema file", name)
            }
            ModelError::IoError(e) => format!("Could not read input: {}", e),
            ModelError::SerializationError(e) => format!("Invalid JSON: {}", e),
            ModelError::ConfigError { message } => format!("Configuration problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ModelError::NotAnObject { .. } => "Pass a JSON object such as {\"name\": \"orange\"}",
            ModelError::UnknownProperty { .. } => "Use one of the properties the model declares",
            ModelError::UnknownModel { .. } => "Check the [[models]] entries of the schema file",
            ModelError::IoError(_) => "Check that the file exists and is readable",
            ModelError::SerializationError(_) => "Check the JSON syntax of the input",
            ModelError::ConfigError { .. } => "Check the command line arguments and schema file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violations() {
        let err = ModelError::NotAnObject {
            context: "construction".to_string(),
            found: "array".to_string(),
        };
        assert!(err.is_contract_violation());
        assert_eq!(err.to_string(), "Expected an object for construction, found array");

        let err = ModelError::ConfigError {
            message: "missing".to_string(),
        };
        assert!(!err.is_contract_violation());
    }

    #[test]
    fn test_serde_error_conversion() {
        let err: ModelError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ModelError::SerializationError(_)));
        assert!(err.user_friendly_message().starts_with("Invalid JSON"));
    }
}
