//! Size-seeking compressor.
//!
//! Searches quality first, then width, until an encode fits the byte budget.
//! The search is an explicit state machine: [`SearchState::next`] is a pure
//! transition, and [`SearchPlan`] walks it as an iterator of encode attempts.
//! Every path through the machine ends in [`SearchState::Exhausted`], after
//! which a single baseline encode at [`FALLBACK_QUALITY`] is returned as-is.

use tracing::debug;
use crate::processing::codec::{EncodeProfile, EncodeRequest, ImageCodec};
use crate::utils::{ImageFormat, OptimizerError, OptimizerResult};

pub const INITIAL_QUALITY: u8 = 90;
/// Quality restored after each width reduction
pub const GEOMETRY_RESET_QUALITY: u8 = 80;
pub const MIN_QUALITY: u8 = 10;
pub const FALLBACK_QUALITY: u8 = 10;

const SHRINK_FACTOR: f64 = 0.9;
/// Widths below this fraction of the original end the search.
const MIN_WIDTH_FRACTION: f64 = 0.3;

/// One encode attempt: quality plus optional width (`None` = original width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStep {
    pub quality: u8,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Lowering quality at the original width
    SeekingQuality { quality: u8 },
    /// Lowering quality at a reduced width
    SeekingGeometry { quality: u8, width: u32 },
    /// Nothing left to try; `width` is the last width computed
    Exhausted { width: Option<u32> },
}

impl SearchState {
    pub const START: Self = Self::SeekingQuality { quality: INITIAL_QUALITY };

    /// The encode this state asks for, `None` once exhausted.
    pub fn attempt(&self) -> Option<SearchStep> {
        match *self {
            Self::SeekingQuality { quality } => Some(SearchStep { quality, width: None }),
            Self::SeekingGeometry { quality, width } => Some(SearchStep { quality, width: Some(width) }),
            Self::Exhausted { .. } => None,
        }
    }

    /// Transition taken after the current attempt missed the budget.
    pub fn next(self, original_width: u32) -> Self {
        match self {
            Self::SeekingQuality { quality } => match lower_quality(quality) {
                Some(quality) => Self::SeekingQuality { quality },
                None => shrink(original_width, None),
            },
            Self::SeekingGeometry { quality, width } => match lower_quality(quality) {
                Some(quality) => Self::SeekingGeometry { quality, width },
                None => shrink(original_width, Some(width)),
            },
            exhausted @ Self::Exhausted { .. } => exhausted,
        }
    }

    /// Last-resort encode: minimum quality at the most recent width.
    pub fn fallback(&self) -> SearchStep {
        let width = match *self {
            Self::SeekingQuality { .. } => None,
            Self::SeekingGeometry { width, .. } => Some(width),
            Self::Exhausted { width } => width,
        };
        SearchStep { quality: FALLBACK_QUALITY, width }
    }
}

/// 10-point steps above 60, 5-point steps above 30, then nothing.
fn lower_quality(quality: u8) -> Option<u8> {
    let lowered = if quality > 60 {
        quality - 10
    } else if quality > 30 {
        quality - 5
    } else {
        return None;
    };
    (lowered >= MIN_QUALITY).then_some(lowered)
}

fn shrink(original_width: u32, current: Option<u32>) -> SearchState {
    let base = current.unwrap_or(original_width);
    let width = (f64::from(base) * SHRINK_FACTOR).floor() as u32;
    let floor = f64::from(original_width) * MIN_WIDTH_FRACTION;
    if f64::from(width) < floor {
        SearchState::Exhausted { width: Some(width) }
    } else {
        SearchState::SeekingGeometry { quality: GEOMETRY_RESET_QUALITY, width }
    }
}

/// Iterator over the attempts of one search, in order.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    state: SearchState,
    original_width: u32,
}

impl SearchPlan {
    pub fn new(original_width: u32) -> Self {
        Self {
            state: SearchState::START,
            original_width,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }
}

impl Iterator for SearchPlan {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        let step = self.state.attempt()?;
        self.state = self.state.next(self.original_width);
        Some(step)
    }
}

/// Outcome of [`SizeSeekingCompressor::search`].
#[derive(Debug, Clone)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    /// Parameters of the returned encode
    pub step: SearchStep,
    /// Encodes performed, fallback included
    pub attempts: usize,
    /// `false` when the fallback encode was returned
    pub within_budget: bool,
}

/// Fits an image under a byte budget using an [`ImageCodec`].
pub struct SizeSeekingCompressor<'a> {
    codec: &'a dyn ImageCodec,
}

impl<'a> SizeSeekingCompressor<'a> {
    pub fn new(codec: &'a dyn ImageCodec) -> Self {
        Self { codec }
    }

    /// Returns the first encode that fits `max_size_kb`, or the fallback encode.
    ///
    /// Never fails because the budget is unreachable; fails only when the
    /// codec cannot decode or encode.
    pub fn compress(&self, input: &[u8], format: ImageFormat, max_size_kb: u32) -> OptimizerResult<Vec<u8>> {
        self.search(input, format, max_size_kb).map(|c| c.bytes)
    }

    /// Same as [`compress`](Self::compress), with details about how the output was reached.
    pub fn search(&self, input: &[u8], format: ImageFormat, max_size_kb: u32) -> OptimizerResult<Compressed> {
        let max_size_bytes = u64::from(max_size_kb) * 1024;
        let original_width = self.codec.decode(input)?.width;
        if original_width == 0 {
            return Err(OptimizerError::decode("Image has zero width"));
        }

        let mut plan = SearchPlan::new(original_width);
        let mut attempts = 0;
        for step in plan.by_ref() {
            attempts += 1;
            let bytes = self.codec.encode(input, &request(format, step, EncodeProfile::Tuned))?;
            debug!(
                "Attempt {attempts}: q={} width={:?} -> {} bytes (budget {max_size_bytes})",
                step.quality,
                step.width,
                bytes.len()
            );
            if bytes.len() as u64 <= max_size_bytes {
                return Ok(Compressed { bytes, step, attempts, within_budget: true });
            }
        }

        let step = plan.state().fallback();
        let bytes = self.codec.encode(input, &request(format, step, EncodeProfile::Baseline))?;
        attempts += 1;
        debug!(
            "Budget of {max_size_bytes} bytes not reachable, fallback q={} width={:?} -> {} bytes",
            step.quality,
            step.width,
            bytes.len()
        );
        let within_budget = bytes.len() as u64 <= max_size_bytes;
        Ok(Compressed { bytes, step, attempts, within_budget })
    }
}

fn request(format: ImageFormat, step: SearchStep, profile: EncodeProfile) -> EncodeRequest {
    EncodeRequest {
        format,
        quality: step.quality,
        width: step.width,
        profile,
    }
}
