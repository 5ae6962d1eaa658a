pub mod error;
pub mod formats;
pub mod fs;

pub use error::{OptimizerError, OptimizerResult, PathError, ValidationError};
pub use formats::{ImageFormat, SUPPORTED_INPUT_EXTENSIONS, is_supported_input};
pub use fs::{ensure_dir_exists, ensure_parent_dir, get_extension};
