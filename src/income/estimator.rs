use serde::{Deserialize, Serialize};
use tracing::debug;

use super::profile::{Choice, IncomeProfile, LifeCostBracket};

/// Age at which working life is assumed to begin.
pub const WORK_START_AGE: u8 = 18;

/// Notes shown next to every estimate.
pub const ESTIMATE_NOTES: [&str; 3] = [
    "估算僅供溝通參考，請搭配實際收支與保障規劃。",
    "選擇「不確定」時，系統以 60 歲為推估退休年齡。",
    "主數字為「至少」需要累積的生涯收入，不含投資報酬率。",
];

/// Representative monthly living cost per bracket, in 萬 per month.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LifeCostTable {
    pub under_3: f64,
    pub from_3_to_5: f64,
    pub from_5_to_8: f64,
    pub over_8: f64,
}

impl Default for LifeCostTable {
    fn default() -> Self {
        Self {
            under_3: 2.8,
            from_3_to_5: 4.0,
            from_5_to_8: 6.5,
            over_8: 9.0,
        }
    }
}

impl LifeCostTable {
    pub fn monthly_cost(&self, bracket: LifeCostBracket) -> f64 {
        match bracket {
            LifeCostBracket::Under3 => self.under_3,
            LifeCostBracket::From3To5 => self.from_3_to_5,
            LifeCostBracket::From5To8 => self.from_5_to_8,
            LifeCostBracket::Over8 => self.over_8,
        }
    }

    /// (config key, value) pairs in bracket order
    pub fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("under_3", self.under_3),
            ("from_3_to_5", self.from_3_to_5),
            ("from_5_to_8", self.from_5_to_8),
            ("over_8", self.over_8),
        ]
    }
}

/// One multiplicative adjustment and the running total around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub label: &'static str,
    pub description: String,
    pub multiplier: f64,
    pub before: f64,
    pub after: f64,
}

/// How an estimate was put together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateBreakdown {
    pub stop_age: u8,
    /// Negative when the person is already past their stop age
    pub working_years: i32,
    pub monthly_cost: f64,
    pub yearly_base: f64,
    pub factors: Vec<FactorContribution>,
    /// Unrounded total in 萬, floored at zero
    pub total: f64,
}

/// Everything the calculator displays for a profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateResult {
    /// Minimum lifetime income in 萬, rounded for display
    pub estimate: f64,
    /// Percentage of working life (18 to stop age) already behind
    pub life_progress: u8,
    pub breakdown: EstimateBreakdown,
}

/// Lifetime income model over a bracket cost table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    costs: LifeCostTable,
}

impl Estimator {
    pub fn new(costs: LifeCostTable) -> Self {
        Self { costs }
    }

    /// Walk the model step by step.
    ///
    /// Yearly base times working years, then the family, kids, mortgage and
    /// income-break factors, multiplied in exactly that order.
    pub fn breakdown(&self, profile: &IncomeProfile) -> EstimateBreakdown {
        let stop_age = profile.stop_age();
        let working_years = stop_age as i32 - profile.age as i32;
        let monthly_cost = self.costs.monthly_cost(profile.life_cost);
        let yearly_base = monthly_cost * 12.0;

        let kid_factor = if profile.family.has_children() {
            profile.kids.factor()
        } else {
            1.0
        };

        let steps = [
            (
                "Family",
                profile.family.factor(),
                format!("家庭狀態 {}", profile.family.label()),
            ),
            (
                "Kids",
                kid_factor,
                if profile.family.has_children() {
                    format!("小孩 {}", profile.kids.label())
                } else {
                    "no children counted".to_string()
                },
            ),
            (
                "Mortgage",
                profile.mortgage.factor(),
                format!("房貸 {}", profile.mortgage.label()),
            ),
            (
                "Income break",
                profile.break_impact.factor(),
                format!("收入中斷 {}", profile.break_impact.label()),
            ),
        ];

        let mut total = yearly_base * working_years as f64;
        let mut factors = Vec::with_capacity(steps.len());
        for (label, multiplier, description) in steps {
            let before = total;
            total *= multiplier;
            factors.push(FactorContribution {
                label,
                description,
                multiplier,
                before,
                after: total,
            });
        }

        EstimateBreakdown {
            stop_age,
            working_years,
            monthly_cost,
            yearly_base,
            factors,
            total: total.max(0.0),
        }
    }

    /// Minimum lifetime income in 萬, never negative.
    pub fn estimate(&self, profile: &IncomeProfile) -> f64 {
        round_for_display(self.breakdown(profile).total)
    }

    pub fn evaluate(&self, profile: &IncomeProfile) -> EstimateResult {
        let breakdown = self.breakdown(profile);
        let estimate = round_for_display(breakdown.total);
        let life_progress = compute_life_progress(profile);
        debug!(
            estimate,
            life_progress,
            working_years = breakdown.working_years,
            "evaluated income profile"
        );
        EstimateResult {
            estimate,
            life_progress,
            breakdown,
        }
    }
}

/// Estimate with the reference bracket costs.
pub fn estimate(profile: &IncomeProfile) -> f64 {
    Estimator::default().estimate(profile)
}

/// Divide by 10, round to an integer, divide by 100. The order matters for
/// matching published figures.
fn round_for_display(total: f64) -> f64 {
    (total / 10.0).round() / 100.0
}

/// Share of working life already behind, as a whole percentage in 0..=100.
pub fn compute_life_progress(profile: &IncomeProfile) -> u8 {
    let base_years = profile.stop_age() as f64 - WORK_START_AGE as f64;
    let passed_years = profile.age as f64 - WORK_START_AGE as f64;
    if base_years <= 0.0 {
        return 100;
    }
    let ratio = (passed_years / base_years).clamp(0.0, 1.0);
    (ratio * 100.0).round() as u8
}
