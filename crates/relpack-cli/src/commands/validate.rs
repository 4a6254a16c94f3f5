use super::{json_pretty, EXIT_INVALID_MANIFEST, EXIT_SUCCESS};
use relpack_schema::{parse_manifest_file, ManifestValidator, StructuralValidator, ValidationResult};
use std::path::Path;

pub fn run(path: &Path, json: bool) -> Result<u8, String> {
    let manifest = parse_manifest_file(path).map_err(|e| e.to_string())?;
    let results = StructuralValidator.validate(&manifest);
    let has_errors = results.iter().any(ValidationResult::has_error);
    let findings: Vec<_> = results.iter().flat_map(|r| r.findings.iter()).collect();

    if json {
        let payload = serde_json::json!({
            "file": path,
            "valid": !has_errors,
            "findings": findings,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        for finding in &findings {
            println!("{}: [{}] {}", finding.severity, finding.kind, finding.detail);
        }
        if has_errors {
            println!("manifest {} is invalid", path.display());
        } else {
            println!("manifest {} is valid", path.display());
        }
    }

    Ok(if has_errors {
        EXIT_INVALID_MANIFEST
    } else {
        EXIT_SUCCESS
    })
}
