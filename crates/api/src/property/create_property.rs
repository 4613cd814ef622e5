use crate::{
    error::UpkeepError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use tracing::error;
use upkeep_api_structs::create_property::*;
use upkeep_domain::{NaiveDate, Property};
use upkeep_infra::UpkeepContext;

pub async fn create_property_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let body = body.0;
    let service_date = Guard::against_malformed_optional_date("serviceDate", &body.service_date)?;

    let usecase = CreatePropertyUseCase {
        name: body.name,
        service_type: body.service_type,
        key_person: body.key_person.unwrap_or_default(),
        contact: body.contact.unwrap_or_default(),
        location: body.location.unwrap_or_default(),
        service_details: body.service_details.unwrap_or_default(),
        service_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|property| HttpResponse::Created().json(APIResponse::new(property)))
        .map_err(UpkeepError::from)
}

#[derive(Debug)]
pub struct CreatePropertyUseCase {
    pub name: String,
    pub service_type: String,
    pub key_person: String,
    pub contact: String,
    pub location: String,
    pub service_details: String,
    pub service_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidName,
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidName => {
                Self::BadClientData("The property name cannot be empty".into())
            }
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreatePropertyUseCase {
    type Response = Property;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateProperty";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidName);
        }

        let mut property = Property::new(
            self.name.clone(),
            self.service_type.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        property.key_person = self.key_person.clone();
        property.contact = self.contact.clone();
        property.location = self.location.clone();
        property.service_details = self.service_details.clone();
        property.service_date = self.service_date;
        property.is_on_hold = property.should_be_on_hold();

        ctx.repos.properties.insert(&property).await.map_err(|e| {
            error!("Unable to insert property: {:?}", e);
            UseCaseError::StorageError
        })?;
        Ok(property)
    }
}
