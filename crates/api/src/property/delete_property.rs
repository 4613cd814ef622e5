use crate::{
    error::UpkeepError,
    shared::usecase::{execute, Subscriber, UseCase},
};
use actix_web::{web, HttpResponse};
use tracing::error;
use upkeep_api_structs::delete_property::*;
use upkeep_domain::{Property, ID};
use upkeep_infra::UpkeepContext;

pub async fn delete_property_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let usecase = DeletePropertyUseCase {
        property_id: path.property_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|property| HttpResponse::Ok().json(APIResponse::new(property)))
        .map_err(UpkeepError::from)
}

#[derive(Debug)]
pub struct DeletePropertyUseCase {
    pub property_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The property with id: {}, was not found.",
                id
            )),
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeletePropertyUseCase {
    type Response = Property;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteProperty";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.properties.delete(&self.property_id).await {
            Ok(Some(property)) => Ok(property),
            Ok(None) => Err(UseCaseError::NotFound(self.property_id.clone())),
            Err(e) => {
                error!("Unable to delete property {}: {:?}", self.property_id, e);
                Err(UseCaseError::StorageError)
            }
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RemoveRecordsOnPropertyDeleted)]
    }
}

/// Reminders and service entries do not outlive their property
pub struct RemoveRecordsOnPropertyDeleted;

#[async_trait::async_trait(?Send)]
impl Subscriber<DeletePropertyUseCase> for RemoveRecordsOnPropertyDeleted {
    async fn notify(&self, property: &Property, ctx: &UpkeepContext) {
        if let Err(e) = ctx.repos.reminders.delete_by_property(&property.id).await {
            error!("Unable to delete reminders of property {}: {:?}", property.id, e);
        }
        if let Err(e) = ctx.repos.service_entries.delete_by_property(&property.id).await {
            error!(
                "Unable to delete service entries of property {}: {:?}",
                property.id, e
            );
        }
    }
}
