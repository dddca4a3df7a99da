//! Error type shared by every fallible engine operation.

/// Errors surfaced by the drawing engine to its host.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The canvas element did not hand out a `2d` rendering context.
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    /// A DOM call rejected (listener registration, style write, context lookup).
    #[error("dom call failed: {0}")]
    Dom(String),
    /// A shape record carried a coordinate that is NaN or infinite.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    /// A remote shape message or config document could not be parsed.
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    /// The host named a tool that does not exist.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// A config value is outside its accepted range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Wrap a rejected DOM call, keeping the JS error's debug rendering.
    #[must_use]
    pub fn dom(err: &wasm_bindgen::JsValue) -> Self {
        Self::Dom(format!("{err:?}"))
    }
}
