use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A serviced site, e.g. a building whose water tank is cleaned on a
/// recurring cadence. `Reminder`s keep a snapshot of these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: ID,
    pub name: String,
    pub key_person: String,
    pub contact: String,
    pub location: String,
    pub service_type: String,
    pub service_details: String,
    /// Date the first (or next) visit is due. A property without one is on hold.
    pub service_date: Option<NaiveDate>,
    pub is_on_hold: bool,
    pub created: i64,
    pub updated: i64,
}

impl Property {
    pub fn new(name: String, service_type: String, ts: i64) -> Self {
        Self {
            id: Default::default(),
            name,
            key_person: Default::default(),
            contact: Default::default(),
            location: Default::default(),
            service_type,
            service_details: Default::default(),
            service_date: None,
            is_on_hold: true,
            created: ts,
            updated: ts,
        }
    }

    /// The service date for properties that should have an active `Reminder`
    pub fn schedulable_service_date(&self) -> Option<NaiveDate> {
        if self.service_type.trim().is_empty() {
            return None;
        }
        self.service_date
    }

    /// Whether the property should be flagged as on hold given its current data
    pub fn should_be_on_hold(&self) -> bool {
        self.schedulable_service_date().is_none()
    }
}

impl Entity for Property {
    fn id(&self) -> &ID {
        &self.id
    }
}
