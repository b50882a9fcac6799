// Startup configuration blob

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Configuration recognized at startup, read once before discovery.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Namespace root handed to discovery.
    #[serde(rename = "basePackage", alias = "base_package")]
    pub base_package: String,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("configuration key not found: {0}")]
    KeyNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
    Properties,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            "properties" | "env" => Some(FileFormat::Properties),
            _ => None,
        }
    }
}

/// Read and parse the configuration blob at `path`, detecting the format
/// from the file extension. Any failure here is fatal to startup.
pub fn load_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ConfigError::Load(format!("no file extension on {}", path.display())))?;
    let format = FileFormat::from_extension(ext)
        .ok_or_else(|| ConfigError::Load(format!("unsupported format: {ext}")))?;
    let content = fs::read_to_string(path)?;
    parse(&content, format)
}

/// Parse a configuration blob already in memory.
pub fn parse(content: &str, format: FileFormat) -> Result<AppConfig, ConfigError> {
    let value = match format {
        FileFormat::Json => parse_json(content)?,
        FileFormat::Toml => parse_toml(content)?,
        FileFormat::Properties => parse_properties(content),
    };
    if value.get("basePackage").is_none() && value.get("base_package").is_none() {
        return Err(ConfigError::KeyNotFound("basePackage".to_string()));
    }
    serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
}

fn parse_json(content: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(content).map_err(|e| ConfigError::Parse(format!("JSON parse error: {e}")))
}

fn parse_toml(content: &str) -> Result<Value, ConfigError> {
    let value: toml::Value =
        toml::from_str(content).map_err(|e| ConfigError::Parse(format!("TOML parse error: {e}")))?;
    serde_json::to_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
}

/// `key=value` lines; `#` comments and blank lines are ignored.
fn parse_properties(content: &str) -> Value {
    let mut map = serde_json::Map::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            map.insert(key.trim().to_string(), Value::String(value.to_string()));
        }
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_all_formats_agree() {
        let from_properties = parse("basePackage=user_app\n", FileFormat::Properties).unwrap();
        let from_json = parse(r#"{"basePackage": "user_app"}"#, FileFormat::Json).unwrap();
        let from_toml = parse(r#"basePackage = "user_app""#, FileFormat::Toml).unwrap();

        assert_eq!(from_properties.base_package, "user_app");
        assert_eq!(from_properties, from_json);
        assert_eq!(from_json, from_toml);
    }

    #[test]
    fn test_snake_case_key_accepted() {
        let config = parse("base_package=user_app\n", FileFormat::Properties).unwrap();
        assert_eq!(config.base_package, "user_app");
    }

    #[test]
    fn test_properties_comments_and_blanks_ignored() {
        let content = "# bootstrap configuration\n\nbasePackage = demo\n";
        let config = parse(content, FileFormat::Properties).unwrap();
        assert_eq!(config.base_package, "demo");
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let result = parse("otherKey=1\n", FileFormat::Properties);
        assert!(matches!(result, Err(ConfigError::KeyNotFound(key)) if key == "basePackage"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(matches!(
            parse("{not json", FileFormat::Json),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(FileFormat::from_extension("json"), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_extension("TOML"), Some(FileFormat::Toml));
        assert_eq!(
            FileFormat::from_extension("properties"),
            Some(FileFormat::Properties)
        );
        assert_eq!(FileFormat::from_extension("yaml"), None);
    }

    #[test]
    fn test_load_file_detects_format() {
        let mut file = tempfile::Builder::new()
            .suffix(".properties")
            .tempfile()
            .unwrap();
        writeln!(file, "basePackage=demo").unwrap();

        let config = load_file(file.path()).unwrap();
        assert_eq!(config.base_package, "demo");
    }

    #[test]
    fn test_load_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(load_file(file.path()), Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_load_file_missing_file_is_fatal() {
        assert!(matches!(
            load_file("definitely/not/here.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
