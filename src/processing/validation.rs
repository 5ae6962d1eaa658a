use std::path::PathBuf;
use crate::core::{BatchRequest, CompressionRequest};
use crate::utils::ValidationError;

/// Where a batch takes its inputs from.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchSource {
    /// Recursive scan; outputs mirror the tree under the destination
    Folder(PathBuf),
    /// Caller-supplied list, trusted as-is; outputs are flat
    Files(Vec<PathBuf>),
}

/// A [`BatchRequest`] that passed pre-flight validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBatch {
    pub source: BatchSource,
    pub destination: PathBuf,
    pub compression: CompressionRequest,
}

/// Validates a batch request without touching the filesystem.
///
/// A non-empty `files` list wins over `source_path`; an empty list counts as absent.
pub fn validate_request(request: &BatchRequest) -> Result<ValidatedBatch, ValidationError> {
    if request.destination_path.as_os_str().is_empty() {
        return Err(ValidationError::MissingDestination);
    }

    let source = match (&request.files, &request.source_path) {
        (Some(files), _) if !files.is_empty() => BatchSource::Files(files.clone()),
        (_, Some(root)) if !root.as_os_str().is_empty() => BatchSource::Folder(root.clone()),
        _ => return Err(ValidationError::NoSource),
    };

    let compression = CompressionRequest::new(&request.target_format, request.max_size_kb)?;

    Ok(ValidatedBatch {
        source,
        destination: request.destination_path.clone(),
        compression,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ImageFormat;

    fn request() -> BatchRequest {
        BatchRequest {
            source_path: Some(PathBuf::from("/photos")),
            destination_path: PathBuf::from("/out"),
            target_format: "webp".into(),
            max_size_kb: 200,
            files: None,
        }
    }

    #[test]
    fn folder_request_is_accepted() {
        let batch = validate_request(&request()).unwrap();
        assert_eq!(batch.source, BatchSource::Folder(PathBuf::from("/photos")));
        assert_eq!(batch.compression.format(), ImageFormat::Webp);
    }

    #[test]
    fn explicit_files_take_precedence() {
        let mut req = request();
        req.files = Some(vec![PathBuf::from("/x/a.png")]);
        let batch = validate_request(&req).unwrap();
        assert_eq!(batch.source, BatchSource::Files(vec![PathBuf::from("/x/a.png")]));
    }

    #[test]
    fn empty_file_list_falls_back_to_folder() {
        let mut req = request();
        req.files = Some(Vec::new());
        assert!(matches!(validate_request(&req).unwrap().source, BatchSource::Folder(_)));
    }

    #[test]
    fn rejects_missing_pieces() {
        let mut req = request();
        req.destination_path = PathBuf::new();
        assert_eq!(validate_request(&req), Err(ValidationError::MissingDestination));

        let mut req = request();
        req.source_path = None;
        assert_eq!(validate_request(&req), Err(ValidationError::NoSource));

        let mut req = request();
        req.target_format = "tiff".into();
        assert_eq!(
            validate_request(&req),
            Err(ValidationError::UnsupportedFormat("tiff".into()))
        );

        let mut req = request();
        req.target_format = "jpg".into();
        assert_eq!(
            validate_request(&req),
            Err(ValidationError::UnsupportedFormat("jpg".into()))
        );

        let mut req = request();
        req.max_size_kb = 5;
        assert_eq!(validate_request(&req), Err(ValidationError::SizeOutOfRange(5)));
    }
}
