use serde::{Deserialize, Serialize};

/// Severity tier of an unaddressed `Reminder`. Drives the urgency of
/// notifications and the sort order of reminder listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationLevel {
    Normal,
    Urgent,
    Critical,
}

impl EscalationLevel {
    pub fn as_level(&self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Urgent => 1,
            Self::Critical => 2,
        }
    }

    /// Levels above `2` saturate to `Critical`
    pub fn from_level(level: i64) -> Self {
        match level {
            i64::MIN..=0 => Self::Normal,
            1 => Self::Urgent,
            _ => Self::Critical,
        }
    }
}

impl Default for EscalationLevel {
    fn default() -> Self {
        Self::Normal
    }
}

/// Thresholds at which an overdue `Reminder` escalates, either from repeated
/// unanswered call attempts or from the time it has been overdue.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationPolicy {
    pub urgent_after_attempts: i64,
    pub critical_after_attempts: i64,
    pub urgent_after_overdue_days: i64,
    pub critical_after_overdue_days: i64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            urgent_after_attempts: 2,
            critical_after_attempts: 4,
            urgent_after_overdue_days: 7,
            critical_after_overdue_days: 14,
        }
    }
}

impl EscalationPolicy {
    pub fn level_for_attempts(&self, call_attempts: i64) -> EscalationLevel {
        Self::tier(
            call_attempts,
            self.urgent_after_attempts,
            self.critical_after_attempts,
        )
    }

    pub fn level_for_overdue_days(&self, days_overdue: i64) -> EscalationLevel {
        if days_overdue <= 0 {
            return EscalationLevel::Normal;
        }
        Self::tier(
            days_overdue,
            self.urgent_after_overdue_days,
            self.critical_after_overdue_days,
        )
    }

    /// The level a reminder should be at given both signals. Never lower than `current`.
    pub fn escalate(
        &self,
        current: EscalationLevel,
        call_attempts: i64,
        days_overdue: i64,
    ) -> EscalationLevel {
        current
            .max(self.level_for_attempts(call_attempts))
            .max(self.level_for_overdue_days(days_overdue))
    }

    fn tier(value: i64, urgent: i64, critical: i64) -> EscalationLevel {
        if value >= critical {
            EscalationLevel::Critical
        } else if value >= urgent {
            EscalationLevel::Urgent
        } else {
            EscalationLevel::Normal
        }
    }
}
