use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use upkeep_domain::{
    NotificationRecord, Reminder, ReminderProjection, ReminderStats, ReminderStatus,
    UrgencyLevel, ID,
};

/// A `Reminder` as served to clients, with the workflow flags and the
/// date derived fields computed for the `today` it was read at.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub property_id: ID,
    pub property_name: String,
    pub key_person: String,
    pub contact: String,
    pub location: String,
    pub service_type: String,
    pub service_details: String,
    pub last_service_date: Option<NaiveDate>,
    pub scheduled_date: Option<NaiveDate>,
    pub next_reminder_time: Option<NaiveDate>,
    pub status: ReminderStatus,
    pub called: bool,
    pub scheduled: bool,
    pub completed: bool,
    pub is_new_service: bool,
    pub call_attempts: i64,
    pub last_call_attempt: Option<i64>,
    pub escalation_level: u8,
    pub notes: Option<String>,
    pub notification_sent: bool,
    pub notification_history: Vec<NotificationRecord>,
    pub created_at: i64,
    pub updated_at: i64,
    pub is_overdue: bool,
    pub is_due_today: bool,
    pub urgency_level: UrgencyLevel,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder, today: NaiveDate) -> Self {
        let derived = reminder.derive_status(today);
        let scheduled_date = reminder.scheduled_date();
        Self {
            id: reminder.id.clone(),
            property_id: reminder.property_id.clone(),
            property_name: reminder.snapshot.property_name,
            key_person: reminder.snapshot.key_person,
            contact: reminder.snapshot.contact,
            location: reminder.snapshot.location,
            service_type: reminder.service_type,
            service_details: reminder.snapshot.service_details,
            last_service_date: reminder.last_service_date,
            scheduled_date,
            next_reminder_time: scheduled_date,
            status: reminder.state.status(),
            called: reminder.state.is_called(),
            scheduled: reminder.state.is_scheduled(),
            completed: reminder.state.is_completed(),
            is_new_service: reminder.is_new_service,
            call_attempts: reminder.call_attempts,
            last_call_attempt: reminder.last_call_attempt,
            escalation_level: reminder.escalation_level.as_level(),
            notes: reminder.notes,
            notification_sent: reminder.notification_sent,
            notification_history: reminder.notification_history,
            created_at: reminder.created,
            updated_at: reminder.updated,
            is_overdue: derived.is_overdue,
            is_due_today: derived.is_due_today,
            urgency_level: derived.urgency_level,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderStatsDTO {
    pub total_reminders: usize,
    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub on_hold: usize,
}

impl ReminderStatsDTO {
    pub fn new(stats: ReminderStats) -> Self {
        Self {
            total_reminders: stats.total_reminders,
            overdue: stats.overdue,
            due_today: stats.due_today,
            upcoming: stats.upcoming,
            completed: stats.completed,
            on_hold: stats.on_hold,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderListingDTO {
    /// Reminders due today
    pub reminders: Vec<ReminderDTO>,
    pub overdue_reminders: Vec<ReminderDTO>,
    pub scheduled_reminders: Vec<ReminderDTO>,
    pub completed_reminders: Vec<ReminderDTO>,
    pub on_hold_reminders: Vec<ReminderDTO>,
    pub stats: ReminderStatsDTO,
}

impl ReminderListingDTO {
    pub fn new(projection: ReminderProjection, today: NaiveDate) -> Self {
        let to_dtos = |reminders: Vec<Reminder>| {
            reminders
                .into_iter()
                .map(|r| ReminderDTO::new(r, today))
                .collect::<Vec<_>>()
        };
        Self {
            reminders: to_dtos(projection.due_today),
            overdue_reminders: to_dtos(projection.overdue),
            scheduled_reminders: to_dtos(projection.scheduled),
            completed_reminders: to_dtos(projection.completed),
            on_hold_reminders: to_dtos(projection.on_hold),
            stats: ReminderStatsDTO::new(projection.stats),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummaryDTO {
    pub reminders_created: usize,
    pub properties_updated: usize,
    pub statuses_updated: usize,
    pub notifications_sent: usize,
    pub failures: usize,
}
