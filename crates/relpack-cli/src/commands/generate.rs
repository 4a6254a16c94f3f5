use super::{json_pretty, EXIT_SUCCESS};
use relpack_gen::{GenerateOptions, Generator};
use std::path::Path;

/// Where the generate command reads its base from and writes its result to.
#[derive(Debug, Clone, Copy, Default)]
pub struct Target<'a> {
    pub input_dir: Option<&'a Path>,
    pub output_dir: Option<&'a Path>,
    pub stdout: bool,
}

pub fn run(
    package_name: &str,
    version: &str,
    channel: Option<&str>,
    default_channel: bool,
    target: Target<'_>,
    json: bool,
) -> Result<u8, String> {
    validate_args(version, channel, default_channel, target)?;

    let opts = GenerateOptions {
        base_dir: target.input_dir.map(Path::to_path_buf),
        channel_name: channel.map(str::to_owned),
        is_default_channel: default_channel,
    };
    let generator = Generator::new();

    if target.stdout {
        let out = std::io::stdout();
        generator
            .generate_to(package_name, version, &mut out.lock(), &opts)
            .map_err(|e| e.to_string())?;
        return Ok(EXIT_SUCCESS);
    }

    let dir = target.output_dir.unwrap_or_else(|| Path::new("."));
    let path = generator
        .generate(package_name, version, dir, &opts)
        .map_err(|e| e.to_string())?;

    if json {
        let payload = serde_json::json!({
            "packageName": package_name,
            "version": version,
            "file": path,
            "status": "written"
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("wrote package manifest {}", path.display());
    }
    Ok(EXIT_SUCCESS)
}

/// Pre-flight checks on the flag surface, before the generator runs.
fn validate_args(
    version: &str,
    channel: Option<&str>,
    default_channel: bool,
    target: Target<'_>,
) -> Result<(), String> {
    if semver::Version::parse(version).is_err() {
        return Err(format!("{version} is not a valid semantic version"));
    }
    if default_channel && channel.is_none() {
        return Err("--default-channel can only be set if --channel is set".to_owned());
    }
    if target.stdout && target.output_dir.is_some() {
        return Err("--output-dir cannot be set if writing to stdout".to_owned());
    }
    Ok(())
}
