use thiserror::Error;

/// Rejected detector configuration or tensor layout.
///
/// Raised before any decoding happens so that anchors and network outputs
/// can never be silently misaligned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("input size must be positive")]
    ZeroInputSize,
    #[error("stride at position {index} must be positive")]
    ZeroStride { index: usize },
    #[error("stride {stride} exceeds input size {input_size}")]
    StrideExceedsInput { stride: u32, input_size: u32 },
    #[error("{strides} strides configured but {anchor_sizes} anchor size lists")]
    StrideCountMismatch { strides: usize, anchor_sizes: usize },
    #[error("no strides configured")]
    NoStrides,
    #[error("stride at position {index} has no anchor sizes")]
    EmptyAnchorSizes { index: usize },
    #[error("anchor size at stride position {index} must be positive")]
    ZeroAnchorSize { index: usize },
    #[error("iou threshold must be a finite value in [0, 1]")]
    IouThresholdOutOfRange,
    #[error("{tensor} tensor has {actual} columns, expected {expected}")]
    TensorColumns {
        tensor: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{tensor} tensor has {actual} rows, expected {expected}")]
    TensorRows {
        tensor: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("network produced {actual} anchors but configuration generates {expected}")]
    AnchorCountMismatch { expected: usize, actual: usize },
}
