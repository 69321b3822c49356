use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Youngest and oldest age the calculator accepts as input.
pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 65;

/// A closed set of answers to one calculator question.
///
/// Each option has a CLI token (`married-kids`) and a display label
/// (`已婚+小孩`); parsing accepts either.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Field name used in error messages
    const FIELD: &'static str;
    /// Every option in display order
    const ALL: &'static [Self];

    fn token(self) -> &'static str;
    fn label(self) -> &'static str;

    fn parse(s: &str) -> Result<Self, InvalidInput> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.token().eq_ignore_ascii_case(s) || c.label() == s)
            .ok_or_else(|| InvalidInput::UnknownOption {
                field: Self::FIELD,
                value: s.to_string(),
            })
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }

    /// Next option, wrapping around
    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous option, wrapping around
    fn prev(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// clap value parser for any `Choice`
pub fn parse_choice<C: Choice>(s: &str) -> Result<C, String> {
    C::parse(s).map_err(|e| {
        let tokens: Vec<&str> = C::ALL.iter().map(|c| c.token()).collect();
        format!("{} (expected one of: {})", e, tokens.join(", "))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkUntil {
    #[serde(rename = "55")]
    Age55,
    #[default]
    #[serde(rename = "60")]
    Age60,
    #[serde(rename = "65")]
    Age65,
    #[serde(rename = "uncertain")]
    Uncertain,
}

impl WorkUntil {
    /// Age used when the user is not sure when they will stop working
    pub const UNCERTAIN_AGE: u8 = 60;

    pub fn effective_age(self) -> u8 {
        match self {
            WorkUntil::Age55 => 55,
            WorkUntil::Age60 => 60,
            WorkUntil::Age65 => 65,
            WorkUntil::Uncertain => Self::UNCERTAIN_AGE,
        }
    }
}

impl Choice for WorkUntil {
    const FIELD: &'static str = "work-until";
    const ALL: &'static [Self] = &[
        WorkUntil::Age55,
        WorkUntil::Age60,
        WorkUntil::Age65,
        WorkUntil::Uncertain,
    ];

    fn token(self) -> &'static str {
        match self {
            WorkUntil::Age55 => "55",
            WorkUntil::Age60 => "60",
            WorkUntil::Age65 => "65",
            WorkUntil::Uncertain => "uncertain",
        }
    }

    fn label(self) -> &'static str {
        match self {
            WorkUntil::Age55 => "55",
            WorkUntil::Age60 => "60",
            WorkUntil::Age65 => "65",
            WorkUntil::Uncertain => "不確定",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FamilyStatus {
    #[default]
    Single,
    Married,
    MarriedKids,
}

impl FamilyStatus {
    pub fn factor(self) -> f64 {
        match self {
            FamilyStatus::Single => 1.0,
            FamilyStatus::Married => 1.25,
            FamilyStatus::MarriedKids => 1.6,
        }
    }

    pub fn has_children(self) -> bool {
        self == FamilyStatus::MarriedKids
    }
}

impl Choice for FamilyStatus {
    const FIELD: &'static str = "family";
    const ALL: &'static [Self] = &[
        FamilyStatus::Single,
        FamilyStatus::Married,
        FamilyStatus::MarriedKids,
    ];

    fn token(self) -> &'static str {
        match self {
            FamilyStatus::Single => "single",
            FamilyStatus::Married => "married",
            FamilyStatus::MarriedKids => "married-kids",
        }
    }

    fn label(self) -> &'static str {
        match self {
            FamilyStatus::Single => "單身",
            FamilyStatus::Married => "已婚",
            FamilyStatus::MarriedKids => "已婚+小孩",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Kids {
    #[default]
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3+")]
    ThreeOrMore,
}

impl Kids {
    pub fn factor(self) -> f64 {
        match self {
            Kids::One => 1.05,
            Kids::Two => 1.15,
            Kids::ThreeOrMore => 1.25,
        }
    }
}

impl Choice for Kids {
    const FIELD: &'static str = "kids";
    const ALL: &'static [Self] = &[Kids::One, Kids::Two, Kids::ThreeOrMore];

    fn token(self) -> &'static str {
        match self {
            Kids::One => "1",
            Kids::Two => "2",
            Kids::ThreeOrMore => "3+",
        }
    }

    fn label(self) -> &'static str {
        self.token()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mortgage {
    #[default]
    None,
    Moderate,
    Heavy,
}

impl Mortgage {
    pub fn factor(self) -> f64 {
        match self {
            Mortgage::None => 1.0,
            Mortgage::Moderate => 1.1,
            Mortgage::Heavy => 1.2,
        }
    }
}

impl Choice for Mortgage {
    const FIELD: &'static str = "mortgage";
    const ALL: &'static [Self] = &[Mortgage::None, Mortgage::Moderate, Mortgage::Heavy];

    fn token(self) -> &'static str {
        match self {
            Mortgage::None => "none",
            Mortgage::Moderate => "moderate",
            Mortgage::Heavy => "heavy",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Mortgage::None => "無",
            Mortgage::Moderate => "有-壓力不大",
            Mortgage::Heavy => "有-壓力偏高",
        }
    }
}

/// What a year without income would do to the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreakImpact {
    Negligible,
    #[default]
    DrawsSavings,
    MajorGap,
}

impl BreakImpact {
    pub fn factor(self) -> f64 {
        match self {
            BreakImpact::Negligible => 1.0,
            BreakImpact::DrawsSavings => 1.1,
            BreakImpact::MajorGap => 1.25,
        }
    }
}

impl Choice for BreakImpact {
    const FIELD: &'static str = "break-impact";
    const ALL: &'static [Self] = &[
        BreakImpact::Negligible,
        BreakImpact::DrawsSavings,
        BreakImpact::MajorGap,
    ];

    fn token(self) -> &'static str {
        match self {
            BreakImpact::Negligible => "negligible",
            BreakImpact::DrawsSavings => "draws-savings",
            BreakImpact::MajorGap => "major-gap",
        }
    }

    fn label(self) -> &'static str {
        match self {
            BreakImpact::Negligible => "幾乎沒影響",
            BreakImpact::DrawsSavings => "會動用存款",
            BreakImpact::MajorGap => "會出現明顯缺口",
        }
    }
}

/// Monthly living cost tier, in 萬 (ten thousand) per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeCostBracket {
    #[serde(rename = "under-3")]
    Under3,
    #[default]
    #[serde(rename = "3-5")]
    From3To5,
    #[serde(rename = "5-8")]
    From5To8,
    #[serde(rename = "over-8")]
    Over8,
}

impl Choice for LifeCostBracket {
    const FIELD: &'static str = "life-cost";
    const ALL: &'static [Self] = &[
        LifeCostBracket::Under3,
        LifeCostBracket::From3To5,
        LifeCostBracket::From5To8,
        LifeCostBracket::Over8,
    ];

    fn token(self) -> &'static str {
        match self {
            LifeCostBracket::Under3 => "under-3",
            LifeCostBracket::From3To5 => "3-5",
            LifeCostBracket::From5To8 => "5-8",
            LifeCostBracket::Over8 => "over-8",
        }
    }

    fn label(self) -> &'static str {
        match self {
            LifeCostBracket::Under3 => "3萬以下",
            LifeCostBracket::From3To5 => "3-5萬",
            LifeCostBracket::From5To8 => "5-8萬",
            LifeCostBracket::Over8 => "8萬以上",
        }
    }
}

/// Everything the calculator asks about. Every field has a default, so a
/// profile is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub age: u8,
    pub work_until: WorkUntil,
    pub family: FamilyStatus,
    /// Only counts when `family` is `MarriedKids`
    pub kids: Kids,
    pub mortgage: Mortgage,
    pub break_impact: BreakImpact,
    pub life_cost: LifeCostBracket,
}

impl Default for IncomeProfile {
    fn default() -> Self {
        Self {
            age: 30,
            work_until: WorkUntil::default(),
            family: FamilyStatus::default(),
            kids: Kids::default(),
            mortgage: Mortgage::default(),
            break_impact: BreakImpact::default(),
            life_cost: LifeCostBracket::default(),
        }
    }
}

impl IncomeProfile {
    pub fn stop_age(&self) -> u8 {
        self.work_until.effective_age()
    }
}
