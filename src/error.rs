//! Error type shared by the geometry, scheduler and widget modules.

/// Boxed error returned by a failing clock callback.
pub type CallbackError = Box<dyn std::error::Error + 'static>;

/// Everything that can go wrong in this crate.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A control point sequence must hold either 2 anchors or 4 control points
    #[error("expected 2 or 4 control points, got {0}")]
    InvalidPointCount(usize),

    /// A positional control point index outside of `0..=3`
    #[error("control point index {0} is out of range")]
    InvalidIndex(usize),

    /// A tween end state (or a flattened curve) lacks a key
    #[error("state is missing key `{0}`")]
    MissingKey(String),

    /// A frequency, delay or duration that is negative or not finite
    #[error("invalid timing value for {what}: {value}")]
    InvalidTiming {
        /// Name of the offending parameter
        what: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The clock was shut down and accepts no new subscribers
    #[error("animation clock has been shut down")]
    ClockShutdown,

    /// A subscriber's callback failed during a frame
    #[error("clock callback failed: {0}")]
    Callback(#[source] CallbackError),

    /// A configuration document could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Shorthand for results carrying this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
