use crate::GenError;
use relpack_schema::{manifest_file_name, parse_manifest_file, PackageManifest};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configures the base manifest that [`BaseManifest::get_base`] resolves.
#[derive(Debug, Clone, Default)]
pub struct BaseManifest {
    pub package_name: String,
    /// Existing manifest to update. `None` starts a fresh document.
    pub base_path: Option<PathBuf>,
}

impl BaseManifest {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            base_path: None,
        }
    }

    /// Look for an existing manifest file under `base_dir`. A missing file is
    /// not an error: the base path stays unset and a fresh document is used.
    pub fn with_base_dir(mut self, base_dir: &Path) -> Self {
        let path = base_dir.join(manifest_file_name(&self.package_name));
        if path.exists() {
            self.base_path = Some(path);
        } else {
            debug!("no existing manifest at {}, starting fresh", path.display());
        }
        self
    }

    /// Resolve the starting document: read the base from disk when set,
    /// otherwise construct an empty manifest for the package.
    pub fn get_base(&self) -> Result<PackageManifest, GenError> {
        let Some(path) = &self.base_path else {
            return Ok(PackageManifest::new(&self.package_name));
        };
        let manifest = parse_manifest_file(path).map_err(|source| GenError::BaseRead {
            path: path.clone(),
            source,
        })?;
        if manifest.package_name.is_empty() {
            // A decodable file without a packageName is not a manifest.
            return Err(GenError::NoManifestInBase(path.clone()));
        }
        debug!(
            "resolved base manifest for '{}' with {} channel(s)",
            manifest.package_name,
            manifest.channels.len()
        );
        Ok(manifest)
    }
}
