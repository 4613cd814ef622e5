use serde::{Deserialize, Serialize};
use upkeep_domain::{Notification, NotificationKind, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub reminder_id: ID,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    pub urgency: u8,
    pub created_at: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            reminder_id: notification.reminder_id,
            kind: notification.kind,
            message: notification.message,
            urgency: notification.urgency.as_level(),
            created_at: notification.created,
        }
    }
}
