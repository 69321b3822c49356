pub mod engine;
pub mod questions;
pub mod session;

pub use engine::{
    compute_bar_percentage, compute_dominant, compute_progress, compute_totals,
    parse_answer_list, AnswerSet, Likert, TraitTotals, MAX_LIKERT,
};
pub use questions::{default_questions, Question, Trait};
pub use session::{DiscReport, DiscSession, TraitBar};
