use relpack_schema::{Channel, PackageManifest};
use tracing::debug;

/// Channel created when a brand-new package is generated without an explicit
/// channel name.
pub const BOOTSTRAP_CHANNEL: &str = "alpha";

/// Point `channel_name` at `csv` in the manifest's channel list: replace the
/// release pointer in place when the channel exists, append otherwise.
/// Channel names stay unique.
pub fn upsert_channel(manifest: &mut PackageManifest, channel_name: &str, csv: &str) {
    for channel in &mut manifest.channels {
        if channel.name == channel_name {
            channel.current_csv = csv.to_owned();
            return;
        }
    }
    manifest.channels.push(Channel {
        current_csv: csv.to_owned(),
        name: channel_name.to_owned(),
    });
}

/// Re-sort channels ascending by name.
///
/// Ordering is an explicit step after every mutation, never a property of an
/// underlying container, so the serialized manifest is byte-stable regardless
/// of insertion order or prior on-disk ordering.
pub fn sort_channels(manifest: &mut PackageManifest) {
    manifest.channels.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Merge a new release into the manifest.
///
/// With a channel name, the channel is upserted and the list re-sorted; the
/// channel becomes the default only when `make_default` is set or it is the
/// sole channel, so a second or later channel never becomes default silently.
/// Without a channel name, a brand-new manifest bootstraps a default
/// `alpha` channel; a manifest that already has channels is left untouched.
pub fn apply_release(
    manifest: &mut PackageManifest,
    channel_name: Option<&str>,
    csv: &str,
    make_default: bool,
) {
    match channel_name {
        Some(name) if !name.is_empty() => {
            debug!("merging release '{csv}' into channel '{name}'");
            upsert_channel(manifest, name, csv);
            sort_channels(manifest);
            if make_default || manifest.channels.len() == 1 {
                manifest.default_channel = name.to_owned();
            }
        }
        _ if manifest.channels.is_empty() => {
            debug!("no channel given, bootstrapping '{BOOTSTRAP_CHANNEL}' with '{csv}'");
            upsert_channel(manifest, BOOTSTRAP_CHANNEL, csv);
            manifest.default_channel = BOOTSTRAP_CHANNEL.to_owned();
        }
        _ => {}
    }
}
