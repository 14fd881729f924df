//! Construction-time error type.
//!
//! Every runner validates its configuration and the problem it is handed
//! before evaluating a single candidate. Mismatches are reported as a
//! [`ConfigError`] and abort the run; nothing is silently coerced.

/// Invalid configuration or an evaluator incompatible with the chosen
/// algorithm family.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric or structural parameter is out of range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// The evaluator reports an objective count the algorithm cannot handle.
    #[error("{algorithm} requires at least {minimum} objectives, evaluator reports {actual}")]
    ObjectiveCount {
        algorithm: &'static str,
        minimum: usize,
        actual: usize,
    },

    /// Lower/upper bound vectors do not match the problem dimension.
    #[error("bounds length mismatch: dimension {dimension}, lower {lower}, upper {upper}")]
    BoundsMismatch {
        dimension: usize,
        lower: usize,
        upper: usize,
    },

    /// A lower bound exceeds its upper bound, or a bound is not finite.
    #[error("invalid bounds at coordinate {index}: [{lower}, {upper}]")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },

    /// The evaluator maximizes; the engine only minimizes.
    #[error("evaluator maximizes its objectives; negate them inside the evaluator")]
    Maximization,

    /// An evaluation returned an objective vector of the wrong length.
    #[error("{algorithm}: evaluator declares {expected} objectives but returned {found}")]
    ObjectiveLengthMismatch {
        algorithm: &'static str,
        expected: usize,
        found: usize,
    },

    /// `divisions ^ objectives` does not fit in a cell id.
    #[error("hypercube with {divisions} divisions over {objectives} objectives overflows the cell id")]
    GridTooLarge { divisions: usize, objectives: usize },

    /// The evaluation worker pool could not be created.
    #[error("failed to build evaluation worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
