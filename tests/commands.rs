use std::path::PathBuf;
use std::sync::Arc;

use image_compressor_lib::processing::{EncodeRequest, ImageMetadata, effective_width};
use image_compressor_lib::utils::PathError;
use image_compressor_lib::{
    AppState, BatchRequest, ImageCodec, OptimizerError, OptimizerResult, ProgressStage,
    ValidationError, process_images, select_inputs,
};

/// Codec over a trivial "WxH" text header: encoded size scales with
/// quality and width, like a real lossy encoder.
struct TextCodec;

fn parse(source: &[u8]) -> OptimizerResult<ImageMetadata> {
    let text = std::str::from_utf8(source).map_err(|e| OptimizerError::decode(e.to_string()))?;
    let (w, h) = text
        .lines()
        .next()
        .and_then(|l| l.split_once('x'))
        .ok_or_else(|| OptimizerError::decode("missing header"))?;
    let parse = |v: &str| v.trim().parse::<u32>().map_err(|e| OptimizerError::decode(e.to_string()));
    Ok(ImageMetadata { width: parse(w)?, height: parse(h)? })
}

impl ImageCodec for TextCodec {
    fn decode(&self, source: &[u8]) -> OptimizerResult<ImageMetadata> {
        parse(source)
    }

    fn encode(&self, source: &[u8], request: &EncodeRequest) -> OptimizerResult<Vec<u8>> {
        let meta = parse(source)?;
        let width = effective_width(meta.width, request.width);
        let len = width as usize * meta.height as usize * request.quality as usize / 100;
        Ok(vec![b'.'; len])
    }
}

fn state() -> AppState {
    AppState::with_codec(Arc::new(TextCodec))
}

fn image(width: u32, height: u32, padding: usize) -> Vec<u8> {
    let mut bytes = format!("{width}x{height}\n").into_bytes();
    bytes.resize(bytes.len() + padding, b'#');
    bytes
}

#[tokio::test]
async fn folder_batch_preserves_relative_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dst = tmp.path().join("export");
    std::fs::create_dir_all(src.join("2023/summer")).unwrap();
    std::fs::create_dir_all(&dst).unwrap();
    std::fs::write(src.join("cover.png"), image(300, 200, 80_000)).unwrap();
    std::fs::write(src.join("2023/summer/lake.tiff"), image(600, 400, 300_000)).unwrap();
    std::fs::write(src.join("2023/readme.txt"), b"not an image").unwrap();

    let mut stages = Vec::new();
    let request = BatchRequest {
        source_path: Some(src.clone()),
        destination_path: dst.clone(),
        target_format: "webp".into(),
        max_size_kb: 50,
        files: None,
    };
    let summary = process_images(&state(), request, |e| stages.push((e.stage, e.current, e.total)))
        .await
        .unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.processed_count, 2);
    for entry in &summary.detailed_results {
        let rel_in = entry.input_path.strip_prefix(&src).unwrap().with_extension("");
        let rel_out = entry.output_path.strip_prefix(&dst).unwrap().with_extension("");
        assert_eq!(rel_in, rel_out);
        assert_eq!(entry.output_path.extension().unwrap(), "webp");
        assert!(std::fs::metadata(&entry.output_path).unwrap().len() <= 50 * 1024);
    }
    assert!(dst.join("2023/summer/lake.webp").is_file());

    let processing: Vec<_> = stages
        .iter()
        .filter(|(s, _, _)| *s == ProgressStage::Processing)
        .map(|(_, current, _)| *current)
        .collect();
    assert_eq!(processing, [1, 2]);
    assert_eq!(stages.last(), Some(&(ProgressStage::Complete, 2, 2)));
}

#[tokio::test]
async fn corrupt_file_does_not_stop_the_batch() {
    let tmp = tempfile::tempdir().unwrap();
    let files: Vec<PathBuf> = ["one.png", "two.png", "three.png"]
        .iter()
        .map(|n| tmp.path().join(n))
        .collect();
    std::fs::write(&files[0], image(100, 100, 20_000)).unwrap();
    std::fs::write(&files[1], [0xff, 0xfe, 0x00]).unwrap();
    std::fs::write(&files[2], image(100, 100, 20_000)).unwrap();

    let out = tmp.path().join("out");
    std::fs::create_dir_all(&out).unwrap();
    let request = BatchRequest {
        source_path: None,
        destination_path: out.clone(),
        target_format: "jpeg".into(),
        max_size_kb: 10,
        files: Some(files),
    };
    let summary = process_images(&state(), request, |_| {}).await.unwrap();

    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.processed_count, 2);
    assert_eq!(summary.skipped_count, 1);
    let bad = &summary.detailed_results[1];
    assert!(bad.result.skipped);
    assert!(!bad.result.reason.clone().unwrap_or_default().is_empty());
    assert!(out.join("three.jpeg").is_file());
}

#[tokio::test]
async fn missing_destination_folder_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let request = BatchRequest {
        source_path: Some(tmp.path().to_path_buf()),
        destination_path: tmp.path().join("does-not-exist"),
        target_format: "png".into(),
        max_size_kb: 100,
        files: None,
    };
    let err = process_images(&state(), request, |_| {}).await.unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::Validation(ValidationError::Path(PathError::NotFound(_)))
    ));
}

#[tokio::test]
async fn source_must_be_a_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("single.png");
    std::fs::write(&file, image(10, 10, 0)).unwrap();
    let request = BatchRequest {
        source_path: Some(file),
        destination_path: tmp.path().to_path_buf(),
        target_format: "png".into(),
        max_size_kb: 100,
        files: None,
    };
    let err = process_images(&state(), request, |_| {}).await.unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::Validation(ValidationError::Path(PathError::NotDirectory(_)))
    ));
}

#[tokio::test]
async fn select_inputs_reports_sizes() {
    let tmp = tempfile::tempdir().unwrap();
    let present = tmp.path().join("here.webp");
    std::fs::write(&present, vec![0u8; 1234]).unwrap();
    let missing = tmp.path().join("gone.avif");

    let files = select_inputs(vec![present.clone(), missing.clone()]).await;
    assert_eq!(files[0].path, present);
    assert_eq!(files[0].size, 1234);
    assert_eq!(files[0].extension, "webp");
    assert_eq!(files[1].size, 0);
}
