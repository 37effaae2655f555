use thiserror::Error;

use crate::data::Side;

/// Errors raised by the plot controller and its lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    #[error("keyword `{keyword}` is missing from the {side} dataset")]
    MissingKeyword { side: Side, keyword: String },
    #[error("keyword `{keyword}` in the {side} dataset is not part of the plot")]
    UnexpectedKeyword { side: Side, keyword: String },
    #[error("keyword `{keyword}` appears more than once in the {side} dataset")]
    DuplicateKeyword { side: Side, keyword: String },
    #[error("keyword `{keyword}` has invalid frequency {frequency} in the {side} dataset")]
    InvalidFrequency {
        side: Side,
        keyword: String,
        frequency: f64,
    },
    #[error("{side} dataset has invalid total frequency {total}")]
    InvalidTotal { side: Side, total: f64 },
    #[error("unknown keyword `{0}`")]
    UnknownKeyword(String),
    #[error("invalid plot configuration: {0}")]
    InvalidConfig(&'static str),
}
