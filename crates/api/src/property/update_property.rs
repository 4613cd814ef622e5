use crate::{
    error::UpkeepError,
    reminder::update_reminder::{update_reminder, UseCaseError as UpdateError},
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use tracing::error;
use upkeep_api_structs::update_property::*;
use upkeep_domain::{NaiveDate, Property, ID};
use upkeep_infra::UpkeepContext;

pub async fn update_property_controller(
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let body = body.0;
    let service_date = match &body.service_date {
        Some(date) => Some(Guard::against_malformed_optional_date("serviceDate", date)?),
        None => None,
    };

    let usecase = UpdatePropertyUseCase {
        property_id: path.property_id.clone(),
        name: body.name,
        key_person: body.key_person,
        contact: body.contact,
        location: body.location,
        service_type: body.service_type,
        service_details: body.service_details,
        service_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|property| HttpResponse::Ok().json(APIResponse::new(property)))
        .map_err(UpkeepError::from)
}

/// Partial update, `None` fields are left as they are. Reminders pick up
/// the new values on the next refresh pass.
///
/// Changing the service type removes the active reminder of the old service
/// type. Clearing the service date puts the active reminder on hold.
#[derive(Debug, Default)]
pub struct UpdatePropertyUseCase {
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

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidName,
    ReminderContended(ID),
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The property with id: {}, was not found.",
                id
            )),
            UseCaseError::InvalidName => {
                Self::BadClientData("The property name cannot be empty".into())
            }
            UseCaseError::ReminderContended(id) => Self::Conflict(format!(
                "The reminder with id: {} is being modified by another request, try again.",
                id
            )),
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdatePropertyUseCase {
    type Response = Property;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateProperty";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let mut property = match ctx.repos.properties.find(&self.property_id).await {
            Ok(Some(property)) => property,
            Ok(None) => return Err(UseCaseError::NotFound(self.property_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let previous_type = property.service_type.clone();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(UseCaseError::InvalidName);
            }
            property.name = name.clone();
        }
        if let Some(key_person) = &self.key_person {
            property.key_person = key_person.clone();
        }
        if let Some(contact) = &self.contact {
            property.contact = contact.clone();
        }
        if let Some(location) = &self.location {
            property.location = location.clone();
        }
        if let Some(service_type) = &self.service_type {
            property.service_type = service_type.clone();
        }
        if let Some(service_details) = &self.service_details {
            property.service_details = service_details.clone();
        }
        if let Some(service_date) = self.service_date {
            property.service_date = service_date;
        }
        property.is_on_hold = property.should_be_on_hold();
        property.updated = ctx.sys.get_timestamp_millis();

        // Before the property is saved so a failed request can be repeated
        self.release_active_reminders(&previous_type, &property, ctx).await?;

        ctx.repos.properties.save(&property).await.map_err(|e| {
            error!("Unable to save property: {:?}", e);
            UseCaseError::StorageError
        })?;
        Ok(property)
    }
}

impl UpdatePropertyUseCase {
    async fn release_active_reminders(
        &self,
        previous_type: &str,
        property: &Property,
        ctx: &UpkeepContext,
    ) -> Result<(), UseCaseError> {
        let type_changed = previous_type != property.service_type;
        let date_cleared = matches!(self.service_date, Some(None));
        if previous_type.trim().is_empty() || !(type_changed || date_cleared) {
            return Ok(());
        }

        let reminders = ctx
            .repos
            .reminders
            .find_by_property_service(&property.id, previous_type)
            .await
            .map_err(|e| {
                error!("Unable to read reminders of {}: {:?}", property.id, e);
                UseCaseError::StorageError
            })?;

        for reminder in reminders.into_iter().filter(|r| !r.is_completed()) {
            if type_changed {
                ctx.repos.reminders.delete(&reminder.id).await.map_err(|e| {
                    error!("Unable to delete reminder {}: {:?}", reminder.id, e);
                    UseCaseError::StorageError
                })?;
                continue;
            }
            let res = update_reminder(&reminder.id, ctx, |r| {
                r.put_on_hold();
                Ok(())
            })
            .await;
            match res {
                Ok(_) | Err(UpdateError::NotFound(_)) => (),
                Err(UpdateError::Conflict(id)) => return Err(UseCaseError::ReminderContended(id)),
                Err(e) => {
                    error!("Unable to put reminder {} on hold: {:?}", reminder.id, e);
                    return Err(UseCaseError::StorageError);
                }
            }
        }
        Ok(())
    }
}
