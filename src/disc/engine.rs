use serde::Serialize;
use std::collections::BTreeMap;

use super::questions::{Question, Trait};
use crate::error::InvalidInput;

/// Highest Likert rating a single answer can carry.
pub const MAX_LIKERT: u8 = 5;

/// Display exaggeration applied to the per-trait bars so small differences
/// are visible.
const BAR_SCALE: f64 = 4.0;

/// A self-rating between 1 (barely agree) and 5 (strongly agree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Likert(u8);

impl Likert {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Likert {
    type Error = InvalidInput;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_LIKERT).contains(&value) {
            Ok(Likert(value))
        } else {
            Err(InvalidInput::LikertValue(value.into()))
        }
    }
}

/// Answers recorded so far, keyed by question index.
///
/// Entries can be overwritten but never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: BTreeMap<usize, Likert>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, value: Likert) {
        self.answers.insert(index, value);
    }

    pub fn get(&self, index: usize) -> Option<Likert> {
        self.answers.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Likert)> + '_ {
        self.answers.iter().map(|(i, v)| (*i, *v))
    }
}

/// Per-trait sums of recorded answers. Always covers all four traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraitTotals {
    #[serde(rename = "D")]
    pub d: u32,
    #[serde(rename = "I")]
    pub i: u32,
    #[serde(rename = "S")]
    pub s: u32,
    #[serde(rename = "C")]
    pub c: u32,
}

impl TraitTotals {
    pub fn get(&self, t: Trait) -> u32 {
        match t {
            Trait::D => self.d,
            Trait::I => self.i,
            Trait::S => self.s,
            Trait::C => self.c,
        }
    }

    fn add(&mut self, t: Trait, value: u32) {
        match t {
            Trait::D => self.d += value,
            Trait::I => self.i += value,
            Trait::S => self.s += value,
            Trait::C => self.c += value,
        }
    }

    /// Totals in D, I, S, C order.
    pub fn iter(&self) -> impl Iterator<Item = (Trait, u32)> + '_ {
        Trait::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    pub fn sum(&self) -> u32 {
        self.d + self.i + self.s + self.c
    }
}

/// Sum the recorded answers per trait.
///
/// Unanswered questions contribute nothing. Answers keyed by an index with no
/// matching question are ignored.
pub fn compute_totals(answers: &AnswerSet, questions: &[Question]) -> TraitTotals {
    let mut totals = TraitTotals::default();
    for (index, value) in answers.iter() {
        if let Some(question) = questions.get(index) {
            totals.add(question.trait_, value.value() as u32);
        }
    }
    totals
}

/// The trait with the highest total. Ties go to the earliest of D, I, S, C.
pub fn compute_dominant(totals: &TraitTotals) -> Trait {
    let mut best = Trait::D;
    for t in Trait::ALL {
        // Strictly greater keeps the earlier trait on ties
        if totals.get(t) > totals.get(best) {
            best = t;
        }
    }
    best
}

/// Fraction of questions answered, in [0, 1].
pub fn compute_progress(answers: &AnswerSet, question_count: usize) -> f64 {
    if question_count == 0 {
        return 0.0;
    }
    let answered = answers.iter().filter(|(i, _)| *i < question_count).count();
    answered as f64 / question_count as f64
}

/// Bar width for a trait total, as a percentage capped at 100.
///
/// The total is normalised against the whole questionnaire's maximum
/// (`question_count * 5`) and then scaled by 4.
pub fn compute_bar_percentage(score: u32, question_count: usize) -> f64 {
    if question_count == 0 {
        return 0.0;
    }
    let max_score = (question_count * MAX_LIKERT as usize) as f64;
    (score as f64 / max_score * 100.0 * BAR_SCALE).min(100.0)
}

/// Parse a comma-separated answer list such as `5,4,,3`.
///
/// Position `i` answers question `i`; an empty entry leaves that question
/// unanswered and a single trailing comma is ignored. More entries than
/// `question_count` is an error.
pub fn parse_answer_list(input: &str, question_count: usize) -> Result<AnswerSet, InvalidInput> {
    let mut answers = AnswerSet::new();
    if input.trim().is_empty() {
        return Ok(answers);
    }

    let mut entries: Vec<&str> = input.split(',').map(str::trim).collect();
    if entries.len() > 1 && entries.last() == Some(&"") {
        entries.pop();
    }
    if entries.len() > question_count {
        return Err(InvalidInput::TooManyAnswers {
            given: entries.len(),
            count: question_count,
        });
    }

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.is_empty() {
            continue;
        }
        let value: i64 = entry.parse().map_err(|_| InvalidInput::UnknownOption {
            field: "answer",
            value: entry.to_string(),
        })?;
        let likert = u8::try_from(value)
            .map_err(|_| InvalidInput::LikertValue(value))
            .and_then(Likert::try_from)?;
        answers.insert(index, likert);
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc_four() -> Vec<Question> {
        vec![
            Question::new("d", Trait::D),
            Question::new("i", Trait::I),
            Question::new("s", Trait::S),
            Question::new("c", Trait::C),
        ]
    }

    fn answers_from(values: &[u8]) -> AnswerSet {
        let mut answers = AnswerSet::new();
        for (i, v) in values.iter().enumerate() {
            answers.insert(i, Likert::try_from(*v).unwrap());
        }
        answers
    }

    #[test]
    fn test_likert_bounds() {
        assert!(Likert::try_from(0).is_err());
        assert_eq!(Likert::try_from(1).unwrap().value(), 1);
        assert_eq!(Likert::try_from(5).unwrap().value(), 5);
        assert_eq!(Likert::try_from(6), Err(InvalidInput::LikertValue(6)));
    }

    #[test]
    fn test_all_fives_tie_goes_to_d() {
        let totals = compute_totals(&answers_from(&[5, 5, 5, 5]), &disc_four());
        assert_eq!(totals, TraitTotals { d: 5, i: 5, s: 5, c: 5 });
        assert_eq!(compute_dominant(&totals), Trait::D);
    }

    #[test]
    fn test_ascending_answers_dominant_c() {
        let totals = compute_totals(&answers_from(&[1, 2, 3, 4]), &disc_four());
        assert_eq!(totals, TraitTotals { d: 1, i: 2, s: 3, c: 4 });
        assert_eq!(compute_dominant(&totals), Trait::C);
    }

    #[test]
    fn test_tie_between_later_traits_picks_earliest() {
        let totals = TraitTotals { d: 1, i: 4, s: 4, c: 4 };
        assert_eq!(compute_dominant(&totals), Trait::I);
        let totals = TraitTotals { d: 0, i: 0, s: 2, c: 2 };
        assert_eq!(compute_dominant(&totals), Trait::S);
    }

    #[test]
    fn test_empty_answers_zero_totals_dominant_d() {
        let totals = compute_totals(&AnswerSet::new(), &disc_four());
        assert_eq!(totals, TraitTotals::default());
        assert_eq!(compute_dominant(&totals), Trait::D);
    }

    #[test]
    fn test_totals_sum_matches_recorded_values() {
        let questions = crate::disc::default_questions();
        let mut answers = AnswerSet::new();
        let values = [3u8, 5, 1, 2, 4, 4, 5, 1, 2];
        for (i, v) in values.iter().enumerate() {
            answers.insert(i, Likert::try_from(*v).unwrap());
        }
        let totals = compute_totals(&answers, &questions);
        let expected: u32 = values.iter().map(|v| *v as u32).sum();
        assert_eq!(totals.sum(), expected);
        assert_eq!(totals.iter().count(), 4);
    }

    #[test]
    fn test_overwrite_replaces_previous_value() {
        let mut answers = answers_from(&[2, 2, 2, 2]);
        answers.insert(0, Likert::try_from(5).unwrap());
        let totals = compute_totals(&answers, &disc_four());
        assert_eq!(totals.d, 5);
        assert_eq!(answers.len(), 4);
    }

    #[test]
    fn test_answers_without_question_are_ignored() {
        let mut answers = AnswerSet::new();
        answers.insert(9, Likert::try_from(5).unwrap());
        let totals = compute_totals(&answers, &disc_four());
        assert_eq!(totals.sum(), 0);
    }

    #[test]
    fn test_progress_bounds_and_monotonic() {
        let questions = disc_four();
        let mut answers = AnswerSet::new();
        assert_eq!(compute_progress(&answers, questions.len()), 0.0);

        let mut last = 0.0;
        for i in 0..questions.len() {
            answers.insert(i, Likert::try_from(3).unwrap());
            let progress = compute_progress(&answers, questions.len());
            assert!(progress >= last);
            last = progress;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_progress_empty_questionnaire() {
        assert_eq!(compute_progress(&AnswerSet::new(), 0), 0.0);
    }

    #[test]
    fn test_bar_percentage_scaling() {
        // 12 questions -> max 60; 6 points = 10% -> x4 = 40%
        assert!((compute_bar_percentage(6, 12) - 40.0).abs() < 1e-9);
        // 15 points = 25% -> x4 = 100%
        assert!((compute_bar_percentage(15, 12) - 100.0).abs() < 1e-9);
        // Capped
        assert_eq!(compute_bar_percentage(60, 12), 100.0);
        assert_eq!(compute_bar_percentage(0, 12), 0.0);
        assert_eq!(compute_bar_percentage(10, 0), 0.0);
    }

    #[test]
    fn test_parse_answer_list_with_gaps() {
        let answers = parse_answer_list("5, 4,,3", 12).unwrap();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(0).map(Likert::value), Some(5));
        assert_eq!(answers.get(2), None);
        assert_eq!(answers.get(3).map(Likert::value), Some(3));
    }

    #[test]
    fn test_parse_answer_list_empty() {
        assert!(parse_answer_list("", 12).unwrap().is_empty());
        assert!(parse_answer_list(" ", 12).unwrap().is_empty());
    }

    #[test]
    fn test_parse_answer_list_rejects_bad_entries() {
        assert_eq!(
            parse_answer_list("1,2,3,4,5", 4).unwrap_err(),
            InvalidInput::TooManyAnswers { given: 5, count: 4 }
        );
        assert_eq!(
            parse_answer_list("1,6", 4).unwrap_err(),
            InvalidInput::LikertValue(6)
        );
        assert_eq!(
            parse_answer_list("1,0", 4).unwrap_err(),
            InvalidInput::LikertValue(0)
        );
        assert!(matches!(
            parse_answer_list("1,x", 4).unwrap_err(),
            InvalidInput::UnknownOption { field: "answer", .. }
        ));
    }

    #[test]
    fn test_parse_answer_list_wide_values_are_ratings() {
        assert_eq!(
            parse_answer_list("256", 4).unwrap_err(),
            InvalidInput::LikertValue(256)
        );
        assert_eq!(
            parse_answer_list("3,-1", 4).unwrap_err(),
            InvalidInput::LikertValue(-1)
        );
    }

    #[test]
    fn test_parse_answer_list_trailing_comma() {
        let full = vec!["1"; 12].join(",") + ",";
        let answers = parse_answer_list(&full, 12).unwrap();
        assert_eq!(answers.len(), 12);

        // Only one trailing empty entry is forgiven
        assert_eq!(
            parse_answer_list("1,2,3,4,,", 4).unwrap_err(),
            InvalidInput::TooManyAnswers { given: 5, count: 4 }
        );
        assert_eq!(parse_answer_list("2,", 4).unwrap().len(), 1);
    }
}
