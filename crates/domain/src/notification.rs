use crate::{
    date::format_date,
    escalation::EscalationLevel,
    reminder::Reminder,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Overdue,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overdue => "overdue",
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overdue" => Ok(Self::Overdue),
            _ => Err(anyhow::Error::msg(format!("Unknown notification kind: {}", s))),
        }
    }
}

/// Entry in a `Reminder`'s own notification log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
}

/// Notification intent published to the feed that a delivery component
/// consumes. Nothing in this system delivers it.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub reminder_id: ID,
    pub kind: NotificationKind,
    pub message: String,
    pub urgency: EscalationLevel,
    pub created: i64,
}

impl Notification {
    /// Notification for `record`, which is about to be appended to the
    /// history of `reminder`. The id only depends on the reminder and the
    /// length of its history, so publishing the same crossing twice yields
    /// the same id.
    pub fn new(reminder: &Reminder, record: &NotificationRecord) -> Self {
        let crossing = format!(
            "{}-{}",
            record.kind.as_str(),
            reminder.notification_history.len()
        );
        Self {
            id: Uuid::new_v5(reminder.id.inner_ref(), crossing.as_bytes()).into(),
            reminder_id: reminder.id.clone(),
            kind: record.kind,
            message: record.message.clone(),
            urgency: reminder.escalation_level,
            created: record.timestamp,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

pub fn render_overdue_message(reminder: &Reminder) -> String {
    let scheduled = reminder
        .state
        .scheduled_date()
        .map(|d| format_date(&d))
        .unwrap_or_else(|| "-".into());
    format!(
        "Service overdue: {} ({}) at {}. Contact {} on {}. Was scheduled for {}.",
        reminder.service_type,
        reminder.snapshot.property_name,
        reminder.snapshot.location,
        reminder.snapshot.key_person,
        reminder.snapshot.contact,
        scheduled
    )
}
