use super::estimator::{EstimateResult, Estimator};
use super::profile::{IncomeProfile, MAX_AGE, MIN_AGE};
use crate::contact::ContactUnlock;

/// One person's calculator session: the profile being edited plus the
/// contact gate.
#[derive(Debug, Clone, Default)]
pub struct IncomeSession {
    pub profile: IncomeProfile,
    pub contact: ContactUnlock,
    estimator: Estimator,
}

impl IncomeSession {
    pub fn new(estimator: Estimator) -> Self {
        Self {
            profile: IncomeProfile::default(),
            contact: ContactUnlock::new(),
            estimator,
        }
    }

    /// Set the current age, held to the accepted input range.
    pub fn set_age(&mut self, age: u8) {
        self.profile.age = age.clamp(MIN_AGE, MAX_AGE);
    }

    pub fn increase_age(&mut self, by: u8) {
        self.set_age(self.profile.age.saturating_add(by));
    }

    pub fn decrease_age(&mut self, by: u8) {
        self.set_age(self.profile.age.saturating_sub(by));
    }

    /// Recomputed from the current profile on every call.
    pub fn result(&self) -> EstimateResult {
        self.estimator.evaluate(&self.profile)
    }

    pub fn unlock(&mut self, contact: &str) -> bool {
        self.contact.unlock(contact)
    }
}
