//! Error conditions raised by the editors

/// Programming-error and readiness conditions.
///
/// Invalid geometry is not represented here: editors reject it silently and
/// leave their state unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("image has not finished loading, coordinate scale is unknown")]
    NotReady,
    #[error("a drag session is already active")]
    DragAlreadyActive,
    #[error("no drag session is active")]
    NoActiveDrag,
    #[error("image load was dropped before it completed")]
    ImageLoadCanceled,
    #[error("image has invalid dimensions {width}x{height}")]
    InvalidImage { width: u32, height: u32 },
    #[error("display size must be positive")]
    InvalidDisplaySize,
}
