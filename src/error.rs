//! Error kinds raised by the scoring engines.

/// Input rejected by an engine operation.
///
/// Engines never clamp out-of-domain input silently: the operation returns
/// one of these and leaves session state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("question index {index} out of range (questionnaire has {count} questions)")]
    QuestionIndex { index: usize, count: usize },

    #[error("answer value {0} out of range, must be between 1 and 5")]
    LikertValue(i64),

    #[error("got {given} answers but the questionnaire only has {count} questions")]
    TooManyAnswers { given: usize, count: usize },

    #[error("unknown {field} option '{value}'")]
    UnknownOption { field: &'static str, value: String },
}
