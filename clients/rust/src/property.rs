use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use upkeep_api_structs::*;
use upkeep_domain::{date::format_date, NaiveDate, ID};

#[derive(Clone)]
pub struct PropertyClient {
    base: Arc<BaseClient>,
}

pub struct CreatePropertyInput {
    pub name: String,
    pub service_type: String,
    pub key_person: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub service_details: Option<String>,
    pub service_date: Option<NaiveDate>,
}

#[derive(Default)]
pub struct UpdatePropertyInput {
    pub property_id: ID,
    pub name: Option<String>,
    pub key_person: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub service_details: Option<String>,
    /// `Some(None)` clears the date
    pub service_date: Option<Option<NaiveDate>>,
}

pub struct RecordServiceEntryInput {
    pub property_id: ID,
    pub service_type: Option<String>,
    pub completion_date: NaiveDate,
    pub amount: f64,
    pub next_service_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl PropertyClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreatePropertyInput,
    ) -> APIResponse<create_property::APIResponse> {
        let body = create_property::RequestBody {
            name: input.name,
            service_type: input.service_type,
            key_person: input.key_person,
            contact: input.contact,
            location: input.location,
            service_details: input.service_details,
            service_date: input.service_date.as_ref().map(format_date),
        };
        self.base
            .post(body, "properties".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, property_id: ID) -> APIResponse<get_property::APIResponse> {
        self.base
            .get(format!("properties/{}", property_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdatePropertyInput,
    ) -> APIResponse<update_property::APIResponse> {
        let body = update_property::RequestBody {
            name: input.name,
            key_person: input.key_person,
            contact: input.contact,
            location: input.location,
            service_type: input.service_type,
            service_details: input.service_details,
            service_date: input
                .service_date
                .map(|date| date.as_ref().map(format_date)),
        };
        self.base
            .put(
                body,
                format!("properties/{}", input.property_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, property_id: ID) -> APIResponse<delete_property::APIResponse> {
        self.base
            .delete(format!("properties/{}", property_id), StatusCode::OK)
            .await
    }

    pub async fn record_service_entry(
        &self,
        input: RecordServiceEntryInput,
    ) -> APIResponse<record_service_entry::APIResponse> {
        let body = record_service_entry::RequestBody {
            service_type: input.service_type,
            completion_date: format_date(&input.completion_date),
            amount: input.amount,
            next_service_date: input.next_service_date.as_ref().map(format_date),
            notes: input.notes,
        };
        self.base
            .post(
                body,
                format!("properties/{}/services", input.property_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get_service_entries(
        &self,
        property_id: ID,
    ) -> APIResponse<get_service_entries::APIResponse> {
        self.base
            .get(
                format!("properties/{}/services", property_id),
                StatusCode::OK,
            )
            .await
    }
}
