//! Package manifest generation engine for relpack.
//!
//! This crate ties the schema layer into the generation pipeline: resolving a
//! base manifest from disk (`base`), merging a new release into its channel
//! list (`merge`), validating the result, and writing the canonical YAML form
//! (`writer`). The `Generator` façade orchestrates the whole pipeline.

pub mod base;
pub mod generator;
pub mod merge;
pub mod writer;

pub use base::BaseManifest;
pub use generator::{GenerateOptions, Generator};
pub use merge::{apply_release, sort_channels, upsert_channel, BOOTSTRAP_CHANNEL};
pub use writer::{render_manifest, write_manifest};

use relpack_schema::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    // User input errors, surfaced before any work happens.
    #[error("package name must be set")]
    NoPackageName,
    #[error("version must be set")]
    NoVersion,
    #[error("output directory must be set")]
    NoOutputDir,

    #[error("error reading existing manifest base {}: {source}", path.display())]
    BaseRead {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
    #[error("no package manifest in {}", .0.display())]
    NoManifestInBase(PathBuf),

    #[error("invalid generated package manifest")]
    InvalidManifest,

    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
