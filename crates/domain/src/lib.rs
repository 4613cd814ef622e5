pub mod date;
mod escalation;
mod notification;
mod projection;
mod property;
mod reminder;
mod reminder_status;
mod service_entry;
mod shared;

pub use escalation::{EscalationLevel, EscalationPolicy};
pub use notification::{render_overdue_message, Notification, NotificationKind, NotificationRecord};
pub use projection::{project_reminders, ReminderProjection, ReminderStats};
pub use property::Property;
pub use reminder::{
    next_cycle_date, PropertySnapshot, Reminder, ReminderError, ReminderState, ReminderStatus,
    ScheduleOrigin,
};
pub use reminder_status::{DerivedStatus, UrgencyLevel};
pub use service_entry::ServiceEntry;
pub use shared::entity::{Entity, ID};

pub use chrono::NaiveDate;
pub use chrono_tz::Tz;
