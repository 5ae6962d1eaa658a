mod paths;
mod processor;
mod scanner;

pub use paths::{flat_output_path, mirrored_output_path};
pub use processor::BatchProcessor;
pub use scanner::{collect_files, scan_folder};
