use crate::GenError;
use relpack_schema::{manifest_file_name, PackageManifest};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Canonical textual form of the manifest, as it is persisted.
pub fn render_manifest(manifest: &PackageManifest) -> Result<String, GenError> {
    Ok(manifest.to_yaml()?)
}

/// Write the manifest into `dir` under its derived file name.
///
/// The content lands in a temp file first and is renamed over the
/// destination, so readers never observe a partial manifest.
pub fn write_manifest(dir: &Path, manifest: &PackageManifest) -> Result<PathBuf, GenError> {
    let content = render_manifest(manifest)?;
    let dest = dir.join(manifest_file_name(&manifest.package_name));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(&dest).map_err(|e| GenError::Io(e.error))?;

    debug!("wrote package manifest {}", dest.display());
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relpack_schema::Channel;

    fn sample_manifest() -> PackageManifest {
        PackageManifest {
            channels: vec![Channel {
                current_csv: "memcached-operator.v0.0.1".to_owned(),
                name: "alpha".to_owned(),
            }],
            default_channel: "alpha".to_owned(),
            package_name: "memcached-operator".to_owned(),
        }
    }

    #[test]
    fn writes_under_derived_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), &sample_manifest()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "memcached-operator.package.yaml"
        );
        assert!(path.exists());
    }

    #[test]
    fn written_content_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), &sample_manifest()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "channels:\n- currentCSV: memcached-operator.v0.0.1\n  name: alpha\ndefaultChannel: alpha\npackageName: memcached-operator\n"
        );
    }

    #[test]
    fn repeated_writes_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = sample_manifest();
        let path = write_manifest(dir.path(), &manifest).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_manifest(dir.path(), &manifest).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn overwrites_existing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = sample_manifest();
        write_manifest(dir.path(), &manifest).unwrap();
        manifest.channels[0].current_csv = "memcached-operator.v0.0.2".to_owned();
        let path = write_manifest(dir.path(), &manifest).unwrap();
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("v0.0.2"));
        assert!(!content.contains("v0.0.1"));
    }

    #[test]
    fn missing_destination_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            write_manifest(&missing, &sample_manifest()),
            Err(GenError::Io(_))
        ));
    }
}
