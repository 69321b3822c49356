use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::contact::{ContactUnlock, FULL_ANALYSIS, PRIVACY_NOTE};
use crate::disc::{DiscReport, Question, Trait};
use crate::income::{Choice, EstimateResult, IncomeProfile, ESTIMATE_NOTES};

const DEFAULT_BAR_WIDTH: usize = 20;
const MAX_BAR_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Bar width for the current terminal, defaulting for pipes
fn get_bar_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize).saturating_sub(40).clamp(10, MAX_BAR_WIDTH),
        None => DEFAULT_BAR_WIDTH,
    }
}

/// Split `width` bar cells into (filled, empty) for a percentage (0-100)
pub fn bar_cells(percentage: f64, width: usize) -> (usize, usize) {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    (filled, width.saturating_sub(filled))
}

/// Render a percentage (0-100) as a fixed-width block bar
pub fn text_bar(percentage: f64, width: usize) -> String {
    let (filled, empty) = bar_cells(percentage, width);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Format a 萬 amount the way a browser's locale formatting would:
/// thousands separators, at most two decimals, no trailing zeros.
pub fn format_wan(value: f64) -> String {
    let fixed = format!("{:.2}", value.max(0.0));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    if frac.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac)
    }
}

/// Format the questionnaire as a numbered list
pub fn format_questions(questions: &[Question], use_colors: bool) -> String {
    if questions.is_empty() {
        return "No questions configured.".to_string();
    }

    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let index = format!("{:>2}.", idx + 1);
            let tag = format!("[{}]", q.trait_);
            if use_colors {
                format!("{} {} {}", index.dimmed(), tag.cyan(), q.text)
            } else {
                format!("{} {} {}", index, tag, q.text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format DISC scores: progress, one bar per trait, and the advice block
/// once every question is answered.
pub fn format_disc_report(report: &DiscReport, use_colors: bool) -> String {
    let width = get_bar_width();
    let mut lines = Vec::new();

    lines.push(format!("進度：{} / {} 題", report.answered, report.total));
    lines.push(String::new());

    for bar in &report.bars {
        let label = format!("{:<4}", bar.trait_.short_label());
        let score = format!("{:>3} 分", bar.score);
        let bar_str = text_bar(bar.percentage, width);
        if use_colors {
            lines.push(format!(
                "{} {}  {}  {}",
                bar.trait_.letter().bold(),
                label,
                bar_str.blue(),
                score
            ));
        } else {
            lines.push(format!("{} {}  {}  {}", bar.trait_.letter(), label, bar_str, score));
        }
    }

    lines.push(String::new());
    if report.complete {
        let dominant = format!("主要傾向：{}", report.dominant.label());
        if use_colors {
            lines.push(dominant.bold().to_string());
        } else {
            lines.push(dominant);
        }
        lines.push("記得因人而異，保持彈性調整自己的節奏。".to_string());
        lines.push(String::new());
        lines.push("保險情境溝通建議".to_string());
        for t in Trait::ALL {
            lines.push(format!("  - {}", t.client_tip()));
        }
    } else {
        lines.push("全部回答完畢後即可看到溝通建議。".to_string());
    }

    lines.join("\n")
}

/// Format an income estimate with life progress, notes and, when
/// `explain` is set, the factor-by-factor breakdown.
pub fn format_estimate(
    profile: &IncomeProfile,
    result: &EstimateResult,
    explain: bool,
    use_colors: bool,
) -> String {
    let width = get_bar_width();
    let mut lines = Vec::new();

    let progress_bar = text_bar(result.life_progress as f64, width);
    if use_colors {
        lines.push(format!(
            "人生進度條：{}  {}%",
            progress_bar.green(),
            result.life_progress
        ));
    } else {
        lines.push(format!("人生進度條：{}  {}%", progress_bar, result.life_progress));
    }
    lines.push(String::new());

    let headline = format!("估算結果：約 {} 萬", format_wan(result.estimate));
    if use_colors {
        lines.push(headline.bold().green().to_string());
    } else {
        lines.push(headline);
    }
    lines.push("至少需要累積的生涯收入，盡早規劃保障與儲蓄。".to_string());
    lines.push("真正的風險不是你賺不夠，是中途不能停。".to_string());

    if explain {
        let b = &result.breakdown;
        lines.push(String::new());
        lines.push(format!(
            "  Age {} -> stop at {} ({}): {} working years",
            profile.age,
            b.stop_age,
            profile.work_until.label(),
            b.working_years
        ));
        lines.push(format!(
            "  Living cost {}: {} 萬/month -> {} 萬/year",
            profile.life_cost.label(),
            format_wan(b.monthly_cost),
            format_wan(b.yearly_base)
        ));
        for factor in &b.factors {
            lines.push(format!(
                "  {:<13} x{:<5} {} ({} -> {})",
                factor.label,
                factor.multiplier,
                factor.description,
                format_wan(factor.before),
                format_wan(factor.after)
            ));
        }
    }

    lines.push(String::new());
    lines.push("備註".to_string());
    for note in ESTIMATE_NOTES {
        lines.push(format!("  - {}", note));
    }

    lines.join("\n")
}

/// Format the contact gate state: the full analysis once unlocked, the
/// privacy note otherwise
pub fn format_contact_gate(gate: &ContactUnlock) -> String {
    if gate.is_unlocked() {
        FULL_ANALYSIS.to_string()
    } else {
        PRIVACY_NOTE.to_string()
    }
}

/// Format the call to action with the configured link
pub fn format_cta(link: &str, use_colors: bool) -> String {
    if use_colors {
        format!("加入 LINE 看完整分析：{}", link.underline())
    } else {
        format!("加入 LINE 看完整分析：{}", link)
    }
}

/// Pretty JSON for `--format json`
pub fn format_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::DiscSession;
    use crate::income::{Estimator, WorkUntil};

    #[test]
    fn test_text_bar() {
        assert_eq!(text_bar(0.0, 4), "░░░░");
        assert_eq!(text_bar(50.0, 4), "██░░");
        assert_eq!(text_bar(100.0, 4), "████");
        assert_eq!(text_bar(250.0, 4), "████");
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(0.0, 8), (0, 8));
        assert_eq!(bar_cells(33.3, 3), (1, 2));
        assert_eq!(bar_cells(-5.0, 4), (0, 4));
        assert_eq!(bar_cells(400.0, 4), (4, 0));
    }

    #[test]
    fn test_format_wan_small() {
        assert_eq!(format_wan(1.58), "1.58");
        assert_eq!(format_wan(0.0), "0");
        assert_eq!(format_wan(2.5), "2.5");
        assert_eq!(format_wan(48.0), "48");
    }

    #[test]
    fn test_format_wan_grouping() {
        assert_eq!(format_wan(1584.0), "1,584");
        assert_eq!(format_wan(1234567.89), "1,234,567.89");
        assert_eq!(format_wan(100.0), "100");
        assert_eq!(format_wan(999.99), "999.99");
    }

    #[test]
    fn test_format_questions() {
        let questions = crate::disc::default_questions();
        let result = format_questions(&questions, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[0].starts_with(" 1. [D]"));
        assert!(lines[11].starts_with("12. [C]"));
    }

    #[test]
    fn test_format_questions_empty() {
        assert_eq!(format_questions(&[], false), "No questions configured.");
    }

    #[test]
    fn test_format_disc_report_partial() {
        let mut session = DiscSession::default();
        session.record_answer(0, 4).unwrap();
        let result = format_disc_report(&session.report(), false);
        assert!(result.contains("進度：1 / 12 題"));
        assert!(result.contains("  4 分"));
        assert!(result.contains("全部回答完畢"));
        assert!(!result.contains("主要傾向"));
    }

    #[test]
    fn test_format_disc_report_complete() {
        let mut session = DiscSession::default();
        for i in 0..session.question_count() {
            // S questions (index 2, 6, 10) get 5, everything else 2
            let value = if i % 4 == 2 { 5 } else { 2 };
            session.record_answer(i, value).unwrap();
        }
        let result = format_disc_report(&session.report(), false);
        assert!(result.contains("主要傾向：穩定 (Steadiness)"));
        assert!(result.contains("與 C 型客戶"));
        assert!(result.contains(" 15 分"));
    }

    #[test]
    fn test_format_estimate_plain() {
        let profile = IncomeProfile::default();
        let result = Estimator::default().evaluate(&profile);
        let output = format_estimate(&profile, &result, false, false);
        assert!(output.contains("估算結果：約 1.58 萬"));
        assert!(output.contains("29%"));
        assert!(output.contains("不含投資報酬率"));
        assert!(!output.contains("working years"));
    }

    #[test]
    fn test_format_estimate_explain() {
        let profile = IncomeProfile {
            work_until: WorkUntil::Uncertain,
            ..IncomeProfile::default()
        };
        let result = Estimator::default().evaluate(&profile);
        let output = format_estimate(&profile, &result, true, false);
        assert!(output.contains("stop at 60 (不確定): 30 working years"));
        assert!(output.contains("4 萬/month -> 48 萬/year"));
        assert!(output.contains("Income break"));
        assert!(output.contains("1,440 -> 1,584"));
    }

    #[test]
    fn test_format_contact_gate() {
        let mut gate = ContactUnlock::new();
        assert_eq!(format_contact_gate(&gate), PRIVACY_NOTE);
        gate.unlock("me@example.com");
        assert_eq!(format_contact_gate(&gate), FULL_ANALYSIS);
    }

    #[test]
    fn test_format_cta_plain() {
        assert_eq!(
            format_cta("https://example.com", false),
            "加入 LINE 看完整分析：https://example.com"
        );
    }

    #[test]
    fn test_format_json_report() {
        let mut session = DiscSession::default();
        session.record_answer(1, 5).unwrap();
        let json = format_json(&session.report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["totals"]["I"], 5);
        assert_eq!(value["dominant"], "I");
        assert_eq!(value["bars"][0]["trait"], "D");
        assert_eq!(value["complete"], false);
    }
}
