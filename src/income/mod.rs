pub mod estimator;
pub mod profile;
pub mod session;

pub use estimator::{
    compute_life_progress, estimate, EstimateBreakdown, EstimateResult, Estimator,
    FactorContribution, LifeCostTable, ESTIMATE_NOTES, WORK_START_AGE,
};
pub use profile::{
    parse_choice, BreakImpact, Choice, FamilyStatus, IncomeProfile, Kids, LifeCostBracket,
    Mortgage, WorkUntil, MAX_AGE, MIN_AGE,
};
pub use session::IncomeSession;
