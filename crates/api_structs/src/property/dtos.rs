use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use upkeep_domain::{Property, ServiceEntry, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDTO {
    pub id: ID,
    pub name: String,
    pub key_person: String,
    pub contact: String,
    pub location: String,
    pub service_type: String,
    pub service_details: String,
    pub service_date: Option<NaiveDate>,
    pub is_on_hold: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl PropertyDTO {
    pub fn new(property: Property) -> Self {
        Self {
            id: property.id,
            name: property.name,
            key_person: property.key_person,
            contact: property.contact,
            location: property.location,
            service_type: property.service_type,
            service_details: property.service_details,
            service_date: property.service_date,
            is_on_hold: property.is_on_hold,
            created_at: property.created,
            updated_at: property.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntryDTO {
    pub id: ID,
    pub property_id: ID,
    pub service_type: String,
    pub completion_date: NaiveDate,
    pub amount: f64,
    pub next_service_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl ServiceEntryDTO {
    pub fn new(entry: ServiceEntry) -> Self {
        Self {
            id: entry.id,
            property_id: entry.property_id,
            service_type: entry.service_type,
            completion_date: entry.completion_date,
            amount: entry.amount,
            next_service_date: entry.next_service_date,
            notes: entry.notes,
            created_at: entry.created,
        }
    }
}
