//! Output path derivation.

use std::path::{Path, PathBuf};
use crate::utils::ImageFormat;

/// `<stem>.<format>`, falling back to "output" for stem-less paths.
fn output_file_name(input: &Path, format: ImageFormat) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "output".to_string());
    format!("{stem}.{}", format.as_str())
}

/// Explicit-file mode: every output lands directly in `destination`.
pub fn flat_output_path(input: &Path, destination: &Path, format: ImageFormat) -> PathBuf {
    destination.join(output_file_name(input, format))
}

/// Folder mode: the directory of `input` relative to `source_root` is
/// recreated under `destination`.
///
/// Inputs outside `source_root` have no relative directory and land flat.
pub fn mirrored_output_path(
    input: &Path,
    source_root: &Path,
    destination: &Path,
    format: ImageFormat,
) -> PathBuf {
    let relative_dir = input
        .strip_prefix(source_root)
        .ok()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""));
    destination
        .join(relative_dir)
        .join(output_file_name(input, format))
}
