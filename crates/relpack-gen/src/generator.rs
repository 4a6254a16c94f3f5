use crate::base::BaseManifest;
use crate::merge::apply_release;
use crate::writer::{render_manifest, write_manifest};
use crate::GenError;
use relpack_schema::{
    csv_name, ManifestValidator, PackageManifest, Severity, StructuralValidator,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Options recognized by [`Generator::generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Directory to look for an existing base manifest to update.
    pub base_dir: Option<PathBuf>,
    /// Channel the release is published on. If a new manifest is generated,
    /// or this is the only channel, it also becomes the default.
    pub channel_name: Option<String>,
    /// Force `channel_name` to become the default channel. Only needed when
    /// more than one channel exists.
    pub is_default_channel: bool,
}

/// Orchestrates the generation pipeline: input checks, base resolution,
/// channel merge, validation, and the final write.
pub struct Generator {
    validator: Box<dyn ManifestValidator>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            validator: Box::new(StructuralValidator),
        }
    }

    /// Use a custom validation capability instead of the built-in structural
    /// checks.
    pub fn with_validator(validator: Box<dyn ManifestValidator>) -> Self {
        Self { validator }
    }

    /// Generate the updated manifest for a release of `package_name` and
    /// write it into `output_dir`. Returns the written path.
    pub fn generate(
        &self,
        package_name: &str,
        version: &str,
        output_dir: &Path,
        opts: &GenerateOptions,
    ) -> Result<PathBuf, GenError> {
        if output_dir.as_os_str().is_empty() {
            check_inputs(package_name, version)?;
            return Err(GenError::NoOutputDir);
        }
        let manifest = self.build_manifest(package_name, version, opts)?;
        let path = write_manifest(output_dir, &manifest)?;
        info!("generated package manifest {}", path.display());
        Ok(path)
    }

    /// Like [`Generator::generate`], but renders the manifest to an arbitrary
    /// writer instead of a file (stdout mode).
    pub fn generate_to(
        &self,
        package_name: &str,
        version: &str,
        out: &mut dyn Write,
        opts: &GenerateOptions,
    ) -> Result<(), GenError> {
        let manifest = self.build_manifest(package_name, version, opts)?;
        out.write_all(render_manifest(&manifest)?.as_bytes())?;
        Ok(())
    }

    fn build_manifest(
        &self,
        package_name: &str,
        version: &str,
        opts: &GenerateOptions,
    ) -> Result<PackageManifest, GenError> {
        check_inputs(package_name, version)?;

        let mut base = BaseManifest::new(package_name);
        if let Some(dir) = &opts.base_dir {
            base = base.with_base_dir(dir);
        }
        let mut manifest = base.get_base()?;

        apply_release(
            &mut manifest,
            opts.channel_name.as_deref(),
            &csv_name(package_name, version),
            opts.is_default_channel,
        );

        self.check(&manifest)?;
        Ok(manifest)
    }

    /// Run the validator, log every finding with its type tag and detail,
    /// and fail with one aggregated error if any finding is error severity.
    fn check(&self, manifest: &PackageManifest) -> Result<(), GenError> {
        let mut has_errors = false;
        for result in self.validator.validate(manifest) {
            for finding in &result.findings {
                match finding.severity {
                    Severity::Error => {
                        error!("manifest validation: [{}] {}", finding.kind, finding.detail);
                    }
                    Severity::Warning => {
                        warn!("manifest validation: [{}] {}", finding.kind, finding.detail);
                    }
                }
            }
            if result.has_error() {
                has_errors = true;
            }
        }
        if has_errors {
            return Err(GenError::InvalidManifest);
        }
        Ok(())
    }
}

fn check_inputs(package_name: &str, version: &str) -> Result<(), GenError> {
    if package_name.is_empty() {
        return Err(GenError::NoPackageName);
    }
    if version.is_empty() {
        return Err(GenError::NoVersion);
    }
    Ok(())
}
