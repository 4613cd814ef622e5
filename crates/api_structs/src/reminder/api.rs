use crate::dtos::{RefreshSummaryDTO, ReminderDTO, ReminderListingDTO};
use serde::{Deserialize, Serialize};
use upkeep_domain::ID;

pub mod get_reminders {
    use super::*;

    pub type APIResponse = ReminderListingDTO;
}

pub mod apply_reminder_action {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ReminderAction {
        MarkCalled,
        UpdateSchedule,
        ServiceDone,
        UpdateService,
        MarkCompleted,
        AddNotes,
        PutOnHold,
        DeleteReminder,
    }

    /// Action specific payload. Dates are `YYYY-MM-DD` strings.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReminderActionData {
        #[serde(default)]
        pub scheduled_date: Option<String>,
        #[serde(default)]
        pub completion_date: Option<String>,
        #[serde(default)]
        pub service_date: Option<String>,
        #[serde(default)]
        pub next_service_date: Option<String>,
        #[serde(default)]
        pub rollover_months: Option<u32>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: ReminderAction,
        pub reminder_id: ID,
        #[serde(default)]
        pub data: ReminderActionData,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        /// The reminder after the action, absent when it was deleted
        pub reminder: Option<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(message: &str, reminder: Option<ReminderDTO>) -> Self {
            Self {
                success: true,
                message: message.into(),
                reminder,
            }
        }
    }
}

pub mod refresh_reminders {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub summary: RefreshSummaryDTO,
    }
}
