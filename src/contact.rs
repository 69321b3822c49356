//! Optional contact gate for the full analysis text.
//!
//! The contact string only lives in memory for the current session. Nothing
//! here writes it anywhere or sends it anywhere.

use tracing::debug;

/// Shown under the gate while it is still locked.
pub const PRIVACY_NOTE: &str = "僅在本機保存，不會傳送資料。";

/// Revealed once a contact has been left.
pub const FULL_ANALYSIS: &str =
    "感謝留下聯繫方式！建議預留 6-12 個月緊急預備金並規劃失能/醫療保障，確保收入不中斷。";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUnlock {
    contact: String,
    unlocked: bool,
}

impl ContactUnlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock when `contact` has something other than whitespace in it.
    ///
    /// Blank input is ignored. Once unlocked the gate stays open.
    /// Returns whether the gate is open after the call.
    pub fn unlock(&mut self, contact: &str) -> bool {
        let trimmed = contact.trim();
        if !trimmed.is_empty() {
            if !self.unlocked {
                debug!("contact gate unlocked");
            }
            self.contact = trimmed.to_string();
            self.unlocked = true;
        }
        self.unlocked
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }
}
