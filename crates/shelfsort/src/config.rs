use crate::error::{Result, SortError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

pub const CONFIG_ENV_VAR: &str = "SHELFSORT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEMO_CONFIG_FILE: &str = "config_demo.yaml";

const DEMO_CONFIG_YAML: &str = include_str!("../data/demo_config.yaml");

/// Locates the group configuration file.
pub struct Config {
    pub config_path: PathBuf,
}

impl Config {
    /// Resolution order: explicit path, `SHELFSORT_CONFIG`, `./config.yaml`,
    /// then `config.yaml` / `config.toml` in the XDG config dir.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(path) = config_override {
            path
        } else if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            PathBuf::from(env_path)
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            PathBuf::from(DEFAULT_CONFIG_FILE)
        } else {
            BaseDirectories::with_prefix("shelfsort")
                .ok()
                .and_then(|xdg| {
                    xdg.find_config_file("config.yaml")
                        .or_else(|| xdg.find_config_file("config.toml"))
                })
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
        };

        if !config_path.exists() {
            return Err(SortError::FileNotFound(config_path));
        }

        Ok(Self { config_path })
    }

    pub fn load(&self) -> Result<GroupConfig> {
        GroupConfig::from_file(&self.config_path)
    }
}

/// Parsed configuration: the top-level group nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default, alias = "Groups", deserialize_with = "one_or_many_nodes")]
    pub groups: Vec<GroupNode>,
}

/// One node of the configuration tree.
///
/// `include` and `exclude` accept either a single string or a list in the
/// file; both shapes end up as a list here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    #[serde(
        default,
        deserialize_with = "optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,

    /// `Group:` spelling of the name; `name` wins when both are given.
    #[serde(
        default,
        rename = "Group",
        deserialize_with = "optional_scalar",
        skip_serializing
    )]
    pub group_name: Option<String>,

    #[serde(
        default,
        alias = "Include",
        deserialize_with = "string_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include: Vec<String>,

    #[serde(
        default,
        alias = "Exclude",
        deserialize_with = "string_or_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exclude: Vec<String>,

    #[serde(
        default,
        alias = "Groups",
        deserialize_with = "child_nodes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub groups: Vec<GroupNode>,
}

impl GroupNode {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().or(self.group_name.as_deref())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Names and patterns may be written as bare numbers or booleans.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

fn optional_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Scalar>::deserialize(deserializer)?;
    Ok(value.map(|scalar| scalar.to_string()))
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany<Scalar>>::deserialize(deserializer)?;
    Ok(value
        .map(Vec::from)
        .unwrap_or_default()
        .into_iter()
        .map(|scalar| scalar.to_string())
        .collect())
}

fn one_or_many_nodes<'de, D>(deserializer: D) -> std::result::Result<Vec<GroupNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<OneOrMany<GroupNode>>::deserialize(deserializer)?;
    Ok(value.map(Vec::from).unwrap_or_default())
}

fn child_nodes<'de, D>(deserializer: D) -> std::result::Result<Vec<GroupNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<GroupNode>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl GroupConfig {
    /// Load from a file, choosing TOML for `.toml` and YAML otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SortError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => Self::from_toml(&content),
            ConfigFormat::Yaml => Self::from_yaml(&content),
        }
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        if yaml_str.trim().is_empty() {
            return Ok(Self::default());
        }
        // A comment-only document parses as null.
        let config: Option<GroupConfig> = serde_yaml::from_str(yaml_str)?;
        Ok(config.unwrap_or_default())
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// The built-in example category tree.
    pub fn demo() -> Result<Self> {
        Self::from_yaml(DEMO_CONFIG_YAML)
    }

    /// Save to a file in the format implied by its extension.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| SortError::Config(format!("Failed to serialize config: {}", e)))?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Write the demo configuration. YAML targets get the annotated original text.
pub fn write_demo_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    match ConfigFormat::from_path(path) {
        ConfigFormat::Yaml => std::fs::write(path, DEMO_CONFIG_YAML)?,
        ConfigFormat::Toml => GroupConfig::demo()?.save_to_file(path)?,
    }
    Ok(())
}
