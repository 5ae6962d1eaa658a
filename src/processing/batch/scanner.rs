//! Input enumeration.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;
use crate::core::ImageFile;
use crate::utils::{OptimizerError, OptimizerResult, is_supported_input};

/// Recursively collects supported images under `root`, sorted by path within
/// each directory.
///
/// Unreadable subdirectories and symlink loops are logged and skipped. Fails
/// with [`OptimizerError::NoImagesFound`] when nothing qualifies.
pub fn scan_folder(root: &Path) -> OptimizerResult<Vec<ImageFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let at = e.path().unwrap_or(root).display().to_string();
                warn!("Skipping {at} while scanning: {e}");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_supported_input(entry.path()) {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        files.push(ImageFile::new(entry.into_path(), size));
    }

    debug!("Scan of {} found {} images", root.display(), files.len());
    if files.is_empty() {
        return Err(OptimizerError::NoImagesFound(root.to_path_buf()));
    }
    Ok(files)
}

/// Turns an explicit selection into [`ImageFile`]s without filtering.
pub async fn collect_files(paths: &[PathBuf]) -> Vec<ImageFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(ImageFile::from_path(path.clone()).await);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_nested_images_case_insensitively() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("trip/day1")).unwrap();
        fs::write(root.join("a.PNG"), b"1").unwrap();
        fs::write(root.join("notes.txt"), b"ignored").unwrap();
        fs::write(root.join("trip/b.jpg"), b"22").unwrap();
        fs::write(root.join("trip/day1/c.tif"), b"333").unwrap();
        fs::write(root.join("trip/day1/raw.nef"), b"ignored").unwrap();

        let files = scan_folder(root).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|f| f.path.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            [
                PathBuf::from("a.PNG"),
                PathBuf::from("trip/b.jpg"),
                PathBuf::from("trip/day1/c.tif"),
            ]
        );
        assert_eq!(files[2].size, 3);
        assert_eq!(files[0].extension, "png");
    }

    #[test]
    fn empty_tree_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("readme.md"), b"x").unwrap();
        let err = scan_folder(tmp.path()).unwrap_err();
        assert!(matches!(err, OptimizerError::NoImagesFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loops_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("d")).unwrap();
        fs::write(root.join("d/a.png"), b"1").unwrap();
        std::os::unix::fs::symlink(root, root.join("d/loop")).unwrap();

        let files = scan_folder(root).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, root.join("d/a.png"));
    }

    #[test]
    fn missing_root_yields_no_images() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scan_folder(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, OptimizerError::NoImagesFound(_)));
    }

    #[tokio::test]
    async fn explicit_files_are_kept_verbatim() {
        let paths = vec![PathBuf::from("/nowhere/x.txt"), PathBuf::from("/nowhere/y.png")];
        let files = collect_files(&paths).await;
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, paths[0]);
        assert_eq!(files[0].size, 0);
    }
}
