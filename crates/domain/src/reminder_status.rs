use crate::{
    escalation::EscalationPolicy,
    reminder::{Reminder, ReminderState, ScheduleOrigin},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    High,
    Normal,
}

/// Read-time view of a `Reminder` relative to `today`. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStatus {
    pub is_overdue: bool,
    pub is_due_today: bool,
    pub urgency_level: UrgencyLevel,
}

impl Reminder {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.state {
            ReminderState::Completed { .. } | ReminderState::OnHold => false,
            _ => self.scheduled_date().map(|d| d < today).unwrap_or(false),
        }
    }

    pub fn is_due_today(&self, today: NaiveDate) -> bool {
        self.scheduled_date().map(|d| d == today).unwrap_or(false)
    }

    pub fn derive_status(&self, today: NaiveDate) -> DerivedStatus {
        let is_overdue = self.is_overdue(today);
        DerivedStatus {
            is_overdue,
            is_due_today: self.is_due_today(today),
            urgency_level: if is_overdue {
                UrgencyLevel::High
            } else {
                UrgencyLevel::Normal
            },
        }
    }

    /// Passive, clock driven transition applied on every refresh pass.
    ///
    /// Reminders whose date passed without an operator acting become `Pending`.
    /// `Called` and operator picked `Scheduled` states are left alone until the
    /// next explicit action. `OnHold` and `Completed` never change here.
    /// Returns whether the reminder was modified.
    pub fn refresh_status(&mut self, today: NaiveDate, policy: &EscalationPolicy) -> bool {
        let before = (self.state, self.escalation_level, self.notification_sent);

        self.state = match self.state {
            ReminderState::Scheduled {
                scheduled_date,
                origin,
            } if scheduled_date < today && origin != ScheduleOrigin::Operator => {
                ReminderState::Pending { scheduled_date }
            }
            ReminderState::Pending { scheduled_date } if scheduled_date >= today => {
                ReminderState::Scheduled {
                    scheduled_date,
                    origin: ScheduleOrigin::Generated,
                }
            }
            state => state,
        };

        if self.is_overdue(today) {
            self.escalation_level = policy.escalate(
                self.escalation_level,
                self.call_attempts,
                self.days_overdue(today),
            );
        } else if self.notification_sent {
            // Left the overdue window, the next crossing may notify again
            self.notification_sent = false;
        }

        before != (self.state, self.escalation_level, self.notification_sent)
    }
}
