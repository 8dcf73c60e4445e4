use thiserror::Error;

/// Construction-time errors.
///
/// Runtime planning never fails with an error: "no plan" is an ordinary `None`, and staleness is
/// handled by the controller returning to idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoapError {
    #[error("atom registry is full (max {max} atoms), cannot register `{name}`")]
    AtomCapacityExceeded { name: String, max: usize },

    #[error("unknown atom `{0}`")]
    UnknownAtom(String),

    #[error("action `{name}` has invalid cost {cost} (costs must be at least 1)")]
    InvalidActionCost { name: String, cost: u32 },

    #[error("action `{0}` is already registered")]
    DuplicateAction(String),

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("failed to parse {format} definition: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, GoapError>;
