//! Error kinds for a single chart recompute.

use thiserror::Error;

/// Everything that can terminate one recompute.
///
/// None of these escape the engine as a panic: [`crate::build_chart`]
/// collapses every variant into an informational
/// [`ChartModel`](crate::ChartModel) carrying the error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// Symbol or one of the dates was blank.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// A date failed to parse, or start is not before end.
    #[error("invalid date range: {0}")]
    InvalidDateRange(String),

    /// An indicator was handed an unusable parameter set.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The data provider had no data for the request.
    #[error("{0}")]
    DataUnavailable(String),

    /// The data provider itself failed.
    #[error("provider error: {0}")]
    Provider(String),
}
