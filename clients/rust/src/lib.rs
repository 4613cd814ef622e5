mod base;
mod notification;
mod property;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use notification::NotificationClient;
use property::PropertyClient;
pub use property::{CreatePropertyInput, RecordServiceEntryInput, UpdatePropertyInput};
use reminder::ReminderClient;
pub use reminder::ServiceDoneInput;
use status::StatusClient;
use std::sync::Arc;
pub use upkeep_api_structs::apply_reminder_action::{
    ReminderAction, ReminderActionData, RequestBody as ReminderActionBody,
};
pub use upkeep_api_structs::dtos::*;
pub use upkeep_domain::{NaiveDate, NotificationKind, ReminderStatus, UrgencyLevel, ID};

/// Upkeep Server SDK
///
/// The SDK contains methods for interacting with the Upkeep server
/// API.
#[derive(Clone)]
pub struct UpkeepSDK {
    pub notification: NotificationClient,
    pub property: PropertyClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl UpkeepSDK {
    /// `address` is the api root, e.g. `http://localhost:5000/api/v1`
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let notification = NotificationClient::new(base.clone());
        let property = PropertyClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            notification,
            property,
            reminder,
            status,
        }
    }
}
