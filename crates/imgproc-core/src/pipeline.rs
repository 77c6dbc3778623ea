//! The transform pipeline: decode, edit, encode.
//!
//! Stages always run in this order, and optional ones are skipped when their
//! parameters ask for nothing:
//!
//! 1. Decode (mandatory)
//! 2. Rotate (skipped when the angle is 0)
//! 3. Flip (skipped for [`FlipMode::None`])
//! 4. Filter (skipped for [`Filter::None`])
//! 5. Resize (skipped when neither target side is positive)
//! 6. Encode (mandatory)
//!
//! The first failing stage aborts the request; no partial output is ever
//! returned. A [`Pipeline`] holds only immutable configuration, so one
//! instance can serve any number of threads.

use log::{debug, trace};
use thiserror::Error;
use web_time::Instant;

use crate::config::ProcessorConfig;
use crate::decode::{decode_limited, DecodeError};
use crate::encode::{encode, EncodeError};
use crate::filter::{apply_filter, Filter};
use crate::format::ImageFormat;
use crate::raster::{InvalidDimensionError, Raster};
use crate::request::TransformRequest;
use crate::transform::{
    apply_flip, apply_resize_with, apply_rotation, compute_rotated_bounds,
    resolve_resize_dimensions, FlipMode, ResampleFilter,
};

/// Why a request failed. Each variant is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The input could not be decoded (or was rejected before decoding).
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// A stage would need an impossible or oversized canvas.
    #[error("{stage} failed: {source}")]
    InvalidDimension {
        stage: &'static str,
        #[source]
        source: InvalidDimensionError,
    },

    /// The encoder failed to produce output.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}

impl PipelineError {
    /// Whether the caller's input is at fault (bad bytes or parameters), as
    /// opposed to an internal failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PipelineError::Encode(_))
    }
}

/// An optional editing stage with its resolved parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stage {
    Rotate { degrees: f64 },
    Flip(FlipMode),
    Filter(Filter),
    Resize {
        width: i64,
        height: i64,
        filter: ResampleFilter,
    },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Rotate { .. } => "rotate",
            Stage::Flip(_) => "flip",
            Stage::Filter(_) => "filter",
            Stage::Resize { .. } => "resize",
        }
    }

    /// Run this stage, checking any new canvas against the pixel budget
    /// before allocating it.
    pub fn run(self, image: Raster, config: &ProcessorConfig) -> Result<Raster, InvalidDimensionError> {
        match self {
            Stage::Rotate { degrees } => {
                let (width, height) = compute_rotated_bounds(image.width, image.height, degrees)?;
                config.check_canvas(width, height)?;
                apply_rotation(image, degrees)
            }
            Stage::Flip(mode) => apply_flip(image, mode),
            Stage::Filter(filter) => apply_filter(image, filter),
            Stage::Resize {
                width,
                height,
                filter,
            } => match resolve_resize_dimensions(image.width, image.height, width, height)? {
                Some((width, height)) => {
                    config.check_canvas(width, height)?;
                    apply_resize_with(image, width, height, filter)
                }
                None => Ok(image),
            },
        }
    }
}

/// The ordered list of editing stages a request needs.
pub fn plan(request: &TransformRequest) -> Vec<Stage> {
    [
        (request.rotate != 0.0).then_some(Stage::Rotate {
            degrees: request.rotate,
        }),
        (request.flip != FlipMode::None).then_some(Stage::Flip(request.flip)),
        (!request.filter.is_identity()).then_some(Stage::Filter(request.filter)),
        (request.width > 0 || request.height > 0).then_some(Stage::Resize {
            width: request.width,
            height: request.height,
            filter: request.resample,
        }),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Encoded output of a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Container the bytes are in.
    pub format: ImageFormat,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl ProcessedImage {
    /// MIME type matching `bytes`.
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }
}

/// Transform pipeline with fixed resource limits.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: ProcessorConfig,
}

impl Pipeline {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Decode `bytes`, apply the edits in `request` and re-encode.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Decode`] if the input is too large, empty, not
    ///   JPEG/PNG, or corrupt. Nothing else runs in that case.
    /// - [`PipelineError::InvalidDimension`] if a rotate or resize would need
    ///   an empty or oversized canvas.
    /// - [`PipelineError::Encode`] if the encoder fails.
    pub fn process(
        &self,
        bytes: &[u8],
        request: &TransformRequest,
    ) -> Result<ProcessedImage, PipelineError> {
        let start = Instant::now();

        self.config.check_input(bytes.len())?;
        let mut image = decode_limited(bytes, self.config.max_pixels)?;
        trace!(
            "Decoded {}x{} in {} ms",
            image.width,
            image.height,
            start.elapsed().as_millis()
        );

        let stages = plan(request);
        debug!(
            "Running {} stage(s): {:?}",
            stages.len(),
            stages.iter().map(Stage::name).collect::<Vec<_>>()
        );

        for stage in stages {
            let name = stage.name();
            let stage_start = Instant::now();

            image = stage
                .run(image, &self.config)
                .map_err(|source| PipelineError::InvalidDimension { stage: name, source })?;

            trace!(
                "Finished `{name}` -> {}x{} in {} ms",
                image.width,
                image.height,
                stage_start.elapsed().as_millis()
            );
        }

        let format = request.format;
        let encoded = encode(&image, format, request.resolved_quality())?;

        debug!(
            "Processed {} bytes -> {} {}x{} ({} bytes, filter {}) in {} ms",
            bytes.len(),
            format.as_str(),
            image.width,
            image.height,
            encoded.len(),
            request.filter.id(),
            start.elapsed().as_millis()
        );

        Ok(ProcessedImage {
            bytes: encoded,
            format,
            width: image.width,
            height: image.height,
        })
    }
}

/// Run a request through a pipeline with the default limits.
pub fn process(bytes: &[u8], request: &TransformRequest) -> Result<ProcessedImage, PipelineError> {
    Pipeline::default().process(bytes, request)
}
