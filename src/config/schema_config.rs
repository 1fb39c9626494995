use crate::domain::ports::Schema;
use crate::utils::error::{ModelError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_unique_names, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 由 TOML 檔案宣告的模型集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    #[serde(default)]
    pub models: Vec<ModelDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<String>,
}

/// 執行期才知道屬性清單的模型種類
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicSchema {
    name: String,
    properties: Vec<String>,
}

impl DynamicSchema {
    pub fn new<I, P>(name: impl Into<String>, properties: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl Schema for DynamicSchema {
    fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(String::as_str).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl From<ModelDefinition> for DynamicSchema {
    fn from(definition: ModelDefinition) -> Self {
        Self::new(definition.name, definition.properties)
    }
}

impl SchemaConfig {
    /// 從 TOML 檔案載入模型定義
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ModelError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析模型定義
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ModelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 驗證模型名稱：不可空白、不可重複（屬性名稱不設限）
    pub fn validate_config(&self) -> Result<()> {
        for definition in &self.models {
            validate_non_empty_string("models.name", &definition.name)?;
        }
        validate_unique_names("models.name", self.model_names())
    }

    /// 取得指定名稱的模型
    pub fn schema(&self, name: &str) -> Result<DynamicSchema> {
        self.models
            .iter()
            .find(|definition| definition.name == name)
            .cloned()
            .map(DynamicSchema::from)
            .ok_or_else(|| ModelError::UnknownModel {
                name: name.to_string(),
            })
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }
}

impl Validate for SchemaConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
