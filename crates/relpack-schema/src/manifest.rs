use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File extension for every package manifest written by the generator.
pub const MANIFEST_FILE_EXT: &str = ".package.yaml";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
}

/// A package manifest: named release channels plus a designated default.
///
/// Struct field order is the canonical serialized order (`channels`,
/// `defaultChannel`, `packageName`); channels are kept sorted by name so
/// repeated runs with the same logical input produce byte-identical output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageManifest {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(rename = "defaultChannel", default)]
    pub default_channel: String,
    #[serde(rename = "packageName", default)]
    pub package_name: String,
}

/// A named update track pointing at one current release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    #[serde(rename = "currentCSV")]
    pub current_csv: String,
    pub name: String,
}

impl PackageManifest {
    /// A fresh manifest with no channels, ready to merge a release into.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Self::default()
        }
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Canonical YAML encoding of the manifest.
    pub fn to_yaml(&self) -> Result<String, ManifestError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// The release identifier a channel points at: `<package>.v<version>`.
pub fn csv_name(package_name: &str, version: &str) -> String {
    format!("{package_name}.v{version}")
}

/// File name a package's manifest is persisted under, derived from the
/// lowercased package name.
pub fn manifest_file_name(package_name: &str) -> String {
    format!("{}{MANIFEST_FILE_EXT}", package_name.to_lowercase())
}

pub fn parse_manifest_str(input: &str) -> Result<PackageManifest, ManifestError> {
    Ok(serde_yaml::from_str(input)?)
}

pub fn parse_manifest_file(path: impl AsRef<Path>) -> Result<PackageManifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    parse_manifest_str(&content)
}
