use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A completed visit recorded in the daily book
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceEntry {
    pub id: ID,
    pub property_id: ID,
    pub service_type: String,
    pub completion_date: NaiveDate,
    pub amount: f64,
    /// Explicit next visit date. When absent the reminder rolls forward by the
    /// configured daily book cadence.
    pub next_service_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created: i64,
}

impl Entity for ServiceEntry {
    fn id(&self) -> &ID {
        &self.id
    }
}
