//! Package manifest parsing, canonical serialization, and validation for relpack.
//!
//! This crate defines the schema layer: the YAML document model
//! (`PackageManifest`, `Channel`), deterministic encoding (`to_yaml`), CSV and
//! file name derivation, and the pluggable validation capability
//! (`ManifestValidator`, `StructuralValidator`).

pub mod manifest;
pub mod validate;

pub use manifest::{
    csv_name, manifest_file_name, parse_manifest_file, parse_manifest_str, Channel, ManifestError,
    PackageManifest, MANIFEST_FILE_EXT,
};
pub use validate::{
    Finding, ManifestValidator, Severity, StructuralValidator, ValidationResult,
};
