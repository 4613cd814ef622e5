use crate::dtos::{PropertyDTO, ServiceEntryDTO};
use serde::{Deserialize, Deserializer, Serialize};
use upkeep_domain::{Property, ServiceEntry, ID};

/// Tells a missing field (`None`) apart from an explicit `null` (`Some(None)`)
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub property: PropertyDTO,
}

impl PropertyResponse {
    pub fn new(property: Property) -> Self {
        Self {
            property: PropertyDTO::new(property),
        }
    }
}

pub mod create_property {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub service_type: String,
        #[serde(default)]
        pub key_person: Option<String>,
        #[serde(default)]
        pub contact: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub service_details: Option<String>,
        /// `YYYY-MM-DD`
        #[serde(default)]
        pub service_date: Option<String>,
    }

    pub type APIResponse = PropertyResponse;
}

pub mod get_property {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub property_id: ID,
    }

    pub type APIResponse = PropertyResponse;
}

pub mod update_property {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub property_id: ID,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub key_person: Option<String>,
        #[serde(default)]
        pub contact: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
        #[serde(default)]
        pub service_type: Option<String>,
        #[serde(default)]
        pub service_details: Option<String>,
        /// `YYYY-MM-DD`, `null` clears the date and puts the property on hold
        #[serde(
            default,
            deserialize_with = "super::deserialize_nullable",
            skip_serializing_if = "Option::is_none"
        )]
        pub service_date: Option<Option<String>>,
    }

    pub type APIResponse = PropertyResponse;
}

pub mod delete_property {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub property_id: ID,
    }

    pub type APIResponse = PropertyResponse;
}

pub mod record_service_entry {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub property_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Defaults to the service type of the property
        #[serde(default)]
        pub service_type: Option<String>,
        /// `YYYY-MM-DD`
        pub completion_date: String,
        #[serde(default)]
        pub amount: f64,
        /// `YYYY-MM-DD`
        #[serde(default)]
        pub next_service_date: Option<String>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entry: ServiceEntryDTO,
    }

    impl APIResponse {
        pub fn new(entry: ServiceEntry) -> Self {
            Self {
                entry: ServiceEntryDTO::new(entry),
            }
        }
    }
}

pub mod get_service_entries {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub property_id: ID,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub entries: Vec<ServiceEntryDTO>,
    }

    impl APIResponse {
        pub fn new(entries: Vec<ServiceEntry>) -> Self {
            Self {
                entries: entries.into_iter().map(ServiceEntryDTO::new).collect(),
            }
        }
    }
}
