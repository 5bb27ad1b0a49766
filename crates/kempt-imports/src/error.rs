#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("import range {start}..{end} does not fit the source text ({len} bytes)")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("import sort callback panicked: {message}")]
    CallbackPanicked { message: String },
}
