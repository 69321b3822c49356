use serde::Serialize;
use tracing::debug;

use super::engine::{
    compute_bar_percentage, compute_dominant, compute_progress, compute_totals, AnswerSet, Likert,
    TraitTotals,
};
use super::questions::{default_questions, Question, Trait};
use crate::error::InvalidInput;

/// One person's pass through the questionnaire.
///
/// Derived values are recomputed from the answers on every read, so they
/// always reflect the latest `record_answer`.
#[derive(Debug, Clone)]
pub struct DiscSession {
    questions: Vec<Question>,
    answers: AnswerSet,
}

impl Default for DiscSession {
    fn default() -> Self {
        Self::new(default_questions())
    }
}

impl DiscSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: AnswerSet::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Record (or overwrite) the answer to question `index`.
    ///
    /// Rejects an index outside the questionnaire or a value outside 1..=5
    /// without touching the recorded answers.
    pub fn record_answer(&mut self, index: usize, value: u8) -> Result<(), InvalidInput> {
        if index >= self.questions.len() {
            return Err(InvalidInput::QuestionIndex {
                index,
                count: self.questions.len(),
            });
        }
        let likert = Likert::try_from(value)?;
        debug!(index, value, "recorded answer");
        self.answers.insert(index, likert);
        Ok(())
    }

    pub fn answer(&self, index: usize) -> Option<u8> {
        self.answers.get(index).map(Likert::value)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.answers.len() == self.questions.len()
    }

    pub fn totals(&self) -> TraitTotals {
        compute_totals(&self.answers, &self.questions)
    }

    pub fn dominant(&self) -> Trait {
        compute_dominant(&self.totals())
    }

    pub fn progress(&self) -> f64 {
        compute_progress(&self.answers, self.questions.len())
    }

    /// Progress as a whole percentage for display.
    pub fn progress_percent(&self) -> u8 {
        (self.progress() * 100.0).round() as u8
    }

    pub fn bar_percentage(&self, t: Trait) -> f64 {
        compute_bar_percentage(self.totals().get(t), self.questions.len())
    }

    pub fn report(&self) -> DiscReport {
        let totals = self.totals();
        let bars = Trait::ALL
            .into_iter()
            .map(|t| TraitBar {
                trait_: t,
                label: t.label(),
                score: totals.get(t),
                percentage: compute_bar_percentage(totals.get(t), self.questions.len()),
            })
            .collect();

        DiscReport {
            answered: self.answered_count(),
            total: self.question_count(),
            complete: self.is_complete(),
            totals,
            bars,
            dominant: compute_dominant(&totals),
        }
    }
}

/// Bar row for one trait.
#[derive(Debug, Clone, Serialize)]
pub struct TraitBar {
    #[serde(rename = "trait")]
    pub trait_: Trait,
    pub label: &'static str,
    pub score: u32,
    pub percentage: f64,
}

/// Snapshot of a session's scores, ready for formatting.
#[derive(Debug, Clone, Serialize)]
pub struct DiscReport {
    pub answered: usize,
    pub total: usize,
    pub complete: bool,
    pub totals: TraitTotals,
    pub bars: Vec<TraitBar>,
    pub dominant: Trait,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_answer_rejects_bad_index() {
        let mut session = DiscSession::default();
        let err = session.record_answer(12, 3).unwrap_err();
        assert_eq!(err, InvalidInput::QuestionIndex { index: 12, count: 12 });
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn test_record_answer_rejects_bad_value() {
        let mut session = DiscSession::default();
        assert_eq!(
            session.record_answer(0, 0),
            Err(InvalidInput::LikertValue(0))
        );
        assert_eq!(
            session.record_answer(0, 6),
            Err(InvalidInput::LikertValue(6))
        );
        assert!(session.answer(0).is_none());
    }

    #[test]
    fn test_reads_reflect_latest_write() {
        let mut session = DiscSession::default();
        session.record_answer(0, 2).unwrap();
        assert_eq!(session.totals().d, 2);
        session.record_answer(0, 5).unwrap();
        assert_eq!(session.totals().d, 5);
        assert_eq!(session.answered_count(), 1);
    }

    #[test]
    fn test_complete_after_all_answers() {
        let mut session = DiscSession::default();
        for i in 0..session.question_count() {
            assert!(!session.is_complete());
            session.record_answer(i, 3).unwrap();
        }
        assert!(session.is_complete());
        assert_eq!(session.progress(), 1.0);
        assert_eq!(session.progress_percent(), 100);
    }

    #[test]
    fn test_progress_percent_rounds() {
        let mut session = DiscSession::default();
        session.record_answer(0, 1).unwrap();
        // 1/12 = 8.33%
        assert_eq!(session.progress_percent(), 8);
    }

    #[test]
    fn test_empty_questionnaire_never_complete() {
        let session = DiscSession::new(Vec::new());
        assert!(!session.is_complete());
        assert_eq!(session.progress(), 0.0);
    }

    #[test]
    fn test_report_snapshot() {
        let mut session = DiscSession::default();
        // Question 1 is I, question 3 is C
        session.record_answer(1, 5).unwrap();
        session.record_answer(3, 4).unwrap();

        let report = session.report();
        assert_eq!(report.answered, 2);
        assert_eq!(report.total, 12);
        assert!(!report.complete);
        assert_eq!(report.totals.i, 5);
        assert_eq!(report.totals.c, 4);
        assert_eq!(report.dominant, Trait::I);
        assert_eq!(report.bars.len(), 4);
        assert_eq!(report.bars[0].trait_, Trait::D);
        // 5 / 60 * 100 * 4 = 33.3
        assert!((report.bars[1].percentage - 100.0 / 3.0).abs() < 1e-9);
    }
}
