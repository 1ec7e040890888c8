//! Core domain types and models
//!
//! Defines the stats JSON slice we consume, build mode/targets, output
//! filename settings and the crate-level `Config`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset prefix used when nothing else is configured.
pub const DEFAULT_ASSET_PREFIX: &str = "/";

/// Magic public path value: the bundler resolves it at runtime.
pub const AUTO_PUBLIC_PATH: &str = "auto";

/// Oldest rspack release the helpers are known to work with.
pub const RSPACK_MIN_VERSION: &str = "0.7.0";

/// Build mode, passed explicitly instead of living in the process environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    #[default]
    Development,
    Production,
    None,
}

impl BuildMode {
    pub fn is_dev(self) -> bool {
        self == BuildMode::Development
    }

    pub fn is_prod(self) -> bool {
        self == BuildMode::Production
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Development => "development",
            BuildMode::Production => "production",
            BuildMode::None => "none",
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            "none" => Ok(BuildMode::None),
            other => Err(format!(
                "Invalid build mode: '{other}'. Use 'development', 'production', or 'none'"
            )),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime environment an output bundle is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    #[default]
    Web,
    WebWorker,
    Node,
}

/// A value that config files may give either as a scalar or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T: Default> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::One(T::default())
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

/// Kinds of emitted assets that have their own filename template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Js,
    Css,
    Svg,
    Font,
    Image,
    Media,
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "js" => Ok(AssetKind::Js),
            "css" => Ok(AssetKind::Css),
            "svg" => Ok(AssetKind::Svg),
            "font" => Ok(AssetKind::Font),
            "image" => Ok(AssetKind::Image),
            "media" => Ok(AssetKind::Media),
            other => Err(format!("unknown key {other} in \"output.filename\"")),
        }
    }
}

/// Per-kind filename overrides (`output.filename`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilenameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl FilenameConfig {
    pub fn get(&self, kind: AssetKind) -> Option<&str> {
        let value = match kind {
            AssetKind::Js => &self.js,
            AssetKind::Css => &self.css,
            AssetKind::Svg => &self.svg,
            AssetKind::Font => &self.font,
            AssetKind::Image => &self.image,
            AssetKind::Media => &self.media,
        };
        value.as_deref()
    }
}

/// `output.filenameHash`: on/off, or a custom hash placeholder such as `fullhash:6`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilenameHash {
    Enabled(bool),
    Template(String),
}

impl Default for FilenameHash {
    fn default() -> Self {
        FilenameHash::Enabled(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub filename: FilenameConfig,

    #[serde(default, alias = "filenameHash")]
    pub filename_hash: FilenameHash,
}

/// `output.publicPath` as seen on a compiler's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicPath {
    Static(String),
    /// Computed by a host-side function; not representable here.
    Dynamic,
}

impl From<&str> for PublicPath {
    fn from(value: &str) -> Self {
        PublicPath::Static(value.to_string())
    }
}

/// The slice of a compiler's options the helpers read.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOptions {
    pub public_path: PublicPath,
    pub stats: Option<serde_json::Value>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self { public_path: PublicPath::Static(AUTO_PUBLIC_PATH.to_string()), stats: None }
    }
}

/// One error or warning entry of the stats JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsError {
    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Fields we do not interpret, kept so entries round-trip.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StatsError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Self::default() }
    }
}

/// A compilation result as produced by the bundler's `stats.toJson()`.
///
/// Only the fields needed for error reporting are modelled; anything absent
/// deserializes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsCompilation {
    #[serde(default)]
    pub errors: Vec<StatsError>,

    #[serde(default)]
    pub warnings: Vec<StatsError>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StatsCompilation>,

    #[serde(default)]
    pub errors_count: usize,

    #[serde(default)]
    pub warnings_count: usize,
}

/// Severity of a formatted compilation summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }
}

/// User-facing result of formatting a compilation's stats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }
}

/// Main configuration for bundle-helpers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: BuildMode,

    #[serde(default = "default_asset_prefix", alias = "assetPrefix")]
    pub asset_prefix: String,

    #[serde(default, alias = "publicPath", skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    #[serde(default)]
    pub target: OneOrMany<Target>,

    #[serde(default)]
    pub output: OutputConfig,

    /// Raw `stats` option forwarded to the bundler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Value>,

    /// Print verbose stats messages (stack traces, details).
    #[serde(default)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: BuildMode::Development,
            asset_prefix: default_asset_prefix(),
            public_path: None,
            target: OneOrMany::default(),
            output: OutputConfig::default(),
            stats: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn targets(&self) -> Vec<Target> {
        self.target.clone().into_vec()
    }
}

fn default_asset_prefix() -> String {
    DEFAULT_ASSET_PREFIX.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_json_with_missing_fields_is_empty() {
        let stats: StatsCompilation = serde_json::from_str("{}").expect("parse");
        assert!(stats.errors.is_empty());
        assert!(stats.children.is_empty());
        assert_eq!(stats.errors_count, 0);
    }

    #[test]
    fn stats_error_keeps_unknown_fields() {
        let entry: StatsError = serde_json::from_value(serde_json::json!({
            "message": "boom",
            "moduleIdentifier": "./src/index.js",
            "loc": "1:2"
        }))
        .expect("parse");
        assert_eq!(entry.message, "boom");
        assert_eq!(entry.module_identifier.as_deref(), Some("./src/index.js"));
        assert_eq!(entry.extra.get("loc").and_then(|v| v.as_str()), Some("1:2"));
    }

    #[test]
    fn target_accepts_scalar_or_list() {
        let one: OneOrMany<Target> = serde_json::from_str("\"web-worker\"").expect("scalar");
        assert_eq!(one.into_vec(), vec![Target::WebWorker]);
        let many: OneOrMany<Target> = serde_json::from_str("[\"node\",\"web\"]").expect("list");
        assert_eq!(many.into_vec(), vec![Target::Node, Target::Web]);
    }

    #[test]
    fn build_mode_parses_short_names() {
        assert_eq!("prod".parse::<BuildMode>(), Ok(BuildMode::Production));
        assert!(BuildMode::Development.is_dev());
        assert!("staging".parse::<BuildMode>().is_err());
    }

    #[test]
    fn filename_hash_accepts_bool_or_template() {
        let output: OutputConfig =
            serde_json::from_str(r#"{"filenameHash": "fullhash:6"}"#).expect("template");
        assert_eq!(output.filename_hash, FilenameHash::Template("fullhash:6".to_string()));
        let output: OutputConfig =
            serde_json::from_str(r#"{"filename_hash": false}"#).expect("bool");
        assert_eq!(output.filename_hash, FilenameHash::Enabled(false));
    }
}
