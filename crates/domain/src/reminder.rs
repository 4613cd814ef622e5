use crate::{
    date::{add_months, days_between},
    escalation::{EscalationLevel, EscalationPolicy},
    notification::NotificationRecord,
    property::Property,
    shared::entity::{Entity, ID},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    /// Overdue and waiting for someone to call the customer
    Pending,
    Called,
    Scheduled,
    Completed,
    OnHold,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Called => "called",
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::OnHold => "on_hold",
        }
    }
}

/// Who moved a `Reminder` into the scheduled state. Dates picked by an
/// operator are not demoted to pending when they pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleOrigin {
    /// Created from a property's service date
    Generated,
    /// Rolled into the next cycle after a completed visit
    Rollover,
    /// Rescheduled by an operator
    Operator,
}

impl ScheduleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Rollover => "rollover",
            Self::Operator => "operator",
        }
    }
}

/// The live state of a `Reminder`. Every state except `OnHold` carries the
/// date the next visit is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    OnHold,
    Pending {
        scheduled_date: NaiveDate,
    },
    Called {
        scheduled_date: NaiveDate,
    },
    Scheduled {
        scheduled_date: NaiveDate,
        origin: ScheduleOrigin,
    },
    Completed {
        scheduled_date: NaiveDate,
    },
}

impl ReminderState {
    pub fn status(&self) -> ReminderStatus {
        match self {
            Self::OnHold => ReminderStatus::OnHold,
            Self::Pending { .. } => ReminderStatus::Pending,
            Self::Called { .. } => ReminderStatus::Called,
            Self::Scheduled { .. } => ReminderStatus::Scheduled,
            Self::Completed { .. } => ReminderStatus::Completed,
        }
    }

    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        match *self {
            Self::OnHold => None,
            Self::Pending { scheduled_date }
            | Self::Called { scheduled_date }
            | Self::Scheduled { scheduled_date, .. }
            | Self::Completed { scheduled_date } => Some(scheduled_date),
        }
    }

    pub fn origin(&self) -> Option<ScheduleOrigin> {
        match self {
            Self::Scheduled { origin, .. } => Some(*origin),
            _ => None,
        }
    }

    pub fn is_called(&self) -> bool {
        matches!(
            self,
            Self::Called { .. }
                | Self::Scheduled {
                    origin: ScheduleOrigin::Operator,
                    ..
                }
        )
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Self::Scheduled { .. })
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn is_on_hold(&self) -> bool {
        matches!(self, Self::OnHold)
    }

    /// Rebuilds a state from its persisted parts
    pub fn from_parts(
        status: ReminderStatus,
        scheduled_date: Option<NaiveDate>,
        origin: Option<ScheduleOrigin>,
    ) -> anyhow::Result<Self> {
        if status == ReminderStatus::OnHold {
            return Ok(Self::OnHold);
        }
        let scheduled_date = scheduled_date.ok_or_else(|| {
            anyhow::Error::msg(format!(
                "Reminder with status {} is missing its scheduled date",
                status.as_str()
            ))
        })?;
        let state = match status {
            ReminderStatus::Pending => Self::Pending { scheduled_date },
            ReminderStatus::Called => Self::Called { scheduled_date },
            ReminderStatus::Scheduled => Self::Scheduled {
                scheduled_date,
                origin: origin.unwrap_or(ScheduleOrigin::Generated),
            },
            ReminderStatus::Completed => Self::Completed { scheduled_date },
            ReminderStatus::OnHold => Self::OnHold,
        };
        Ok(state)
    }
}

/// Property attributes copied onto the `Reminder` when it is created, and
/// refreshed opportunistically afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertySnapshot {
    pub property_name: String,
    pub key_person: String,
    pub contact: String,
    pub location: String,
    pub service_details: String,
}

impl From<&Property> for PropertySnapshot {
    fn from(p: &Property) -> Self {
        Self {
            property_name: p.name.clone(),
            key_person: p.key_person.clone(),
            contact: p.contact.clone(),
            location: p.location.clone(),
            service_details: p.service_details.clone(),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("Cannot schedule a date in the past: {date} is before {today}")]
    ScheduleInPast { date: NaiveDate, today: NaiveDate },
}

/// A `Reminder` is the recurring service obligation for one
/// property + service type pair. It tracks when the next visit is due and
/// the outreach done once that date has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    pub property_id: ID,
    pub service_type: String,
    pub snapshot: PropertySnapshot,
    /// Date of the most recent completed visit. `None` for a new service.
    pub last_service_date: Option<NaiveDate>,
    pub state: ReminderState,
    /// True until the first real completion is recorded
    pub is_new_service: bool,
    pub call_attempts: i64,
    pub last_call_attempt: Option<i64>,
    pub escalation_level: EscalationLevel,
    pub notes: Option<String>,
    /// Latch for the current overdue crossing
    pub notification_sent: bool,
    pub notification_history: Vec<NotificationRecord>,
    pub created: i64,
    pub updated: i64,
    /// Optimistic concurrency token. The store only accepts a write carrying
    /// the version it currently holds.
    pub version: i64,
}

impl Reminder {
    fn new(property: &Property, service_type: String, state: ReminderState, ts: i64) -> Self {
        Self {
            id: Default::default(),
            property_id: property.id.clone(),
            service_type,
            snapshot: PropertySnapshot::from(property),
            last_service_date: None,
            state,
            is_new_service: true,
            call_attempts: 0,
            last_call_attempt: None,
            escalation_level: EscalationLevel::Normal,
            notes: None,
            notification_sent: false,
            notification_history: Vec::new(),
            created: ts,
            updated: ts,
            version: 0,
        }
    }

    /// A never serviced `Reminder` due at the property's service date
    pub fn generate(property: &Property, scheduled_date: NaiveDate, ts: i64) -> Self {
        Self::new(
            property,
            property.service_type.clone(),
            ReminderState::Scheduled {
                scheduled_date,
                origin: ScheduleOrigin::Generated,
            },
            ts,
        )
    }

    /// A `Reminder` for a property whose first tracked event is an already
    /// completed visit
    pub fn from_completed_visit(
        property: &Property,
        service_type: String,
        completion_date: NaiveDate,
        next_date: NaiveDate,
        ts: i64,
    ) -> Self {
        let mut reminder = Self::new(
            property,
            service_type,
            ReminderState::Scheduled {
                scheduled_date: next_date,
                origin: ScheduleOrigin::Rollover,
            },
            ts,
        );
        reminder.last_service_date = Some(completion_date);
        reminder.is_new_service = false;
        reminder
    }

    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.state.scheduled_date()
    }

    pub fn status(&self) -> ReminderStatus {
        self.state.status()
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// An operator reached out to the customer
    pub fn mark_called(&mut self, ts: i64, today: NaiveDate, policy: &EscalationPolicy) {
        if let Some(scheduled_date) = self.state.scheduled_date() {
            self.state = ReminderState::Called { scheduled_date };
        }
        self.call_attempts += 1;
        self.last_call_attempt = Some(ts);
        self.escalation_level = policy.escalate(
            self.escalation_level,
            self.call_attempts,
            self.days_overdue(today),
        );
    }

    /// Operator picked a new visit date. Dates before `today` are rejected
    /// and leave the reminder untouched.
    pub fn update_schedule(
        &mut self,
        scheduled_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<(), ReminderError> {
        if scheduled_date < today {
            return Err(ReminderError::ScheduleInPast {
                date: scheduled_date,
                today,
            });
        }
        self.state = ReminderState::Scheduled {
            scheduled_date,
            origin: ScheduleOrigin::Operator,
        };
        self.notification_sent = false;
        Ok(())
    }

    /// A visit was performed, roll into the next cycle
    pub fn service_done(&mut self, completion_date: NaiveDate, next_date: NaiveDate) {
        self.last_service_date = Some(completion_date);
        self.state = ReminderState::Scheduled {
            scheduled_date: next_date,
            origin: ScheduleOrigin::Rollover,
        };
        self.is_new_service = false;
        self.escalation_level = EscalationLevel::Normal;
        self.notification_sent = false;
    }

    /// Same as `service_done` but also forgets the outreach done for the
    /// previous cycle
    pub fn update_service(&mut self, service_date: NaiveDate, next_date: NaiveDate) {
        self.service_done(service_date, next_date);
        self.call_attempts = 0;
    }

    pub fn mark_completed(&mut self, today: NaiveDate) {
        let scheduled_date = self.state.scheduled_date().unwrap_or(today);
        self.last_service_date = if self.is_new_service {
            Some(scheduled_date)
        } else {
            Some(today)
        };
        self.state = ReminderState::Completed { scheduled_date };
        self.is_new_service = false;
        self.escalation_level = EscalationLevel::Normal;
        self.notification_sent = false;
    }

    pub fn add_notes(&mut self, notes: String) {
        self.notes = Some(notes);
    }

    pub fn put_on_hold(&mut self) {
        self.state = ReminderState::OnHold;
        self.notification_sent = false;
    }

    /// Latches the overdue notification for this crossing
    pub fn record_notification(&mut self, record: NotificationRecord) {
        self.notification_sent = true;
        self.notification_history.push(record);
    }

    /// Copies changed property attributes onto the snapshot. Returns whether
    /// anything changed.
    pub fn sync_snapshot(&mut self, property: &Property) -> bool {
        let snapshot = PropertySnapshot::from(property);
        if snapshot == self.snapshot {
            return false;
        }
        self.snapshot = snapshot;
        true
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.state {
            ReminderState::OnHold | ReminderState::Completed { .. } => 0,
            _ => self
                .state
                .scheduled_date()
                .map(|d| days_between(d, today).max(0))
                .unwrap_or(0),
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// The date of the next cycle: the explicit date if one was given, otherwise
/// `interval_months` after the completed visit
pub fn next_cycle_date(
    completion_date: NaiveDate,
    next_date: Option<NaiveDate>,
    interval_months: u32,
) -> NaiveDate {
    next_date.unwrap_or_else(|| add_months(completion_date, interval_months))
}
