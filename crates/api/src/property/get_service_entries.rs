use crate::{
    error::UpkeepError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use upkeep_api_structs::get_service_entries::*;
use upkeep_domain::{ServiceEntry, ID};
use upkeep_infra::UpkeepContext;

pub async fn get_service_entries_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let usecase = GetServiceEntriesUseCase {
        property_id: path.property_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|entries| HttpResponse::Ok().json(APIResponse::new(entries)))
        .map_err(UpkeepError::from)
}

#[derive(Debug)]
pub struct GetServiceEntriesUseCase {
    pub property_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    PropertyNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::PropertyNotFound(id) => Self::NotFound(format!(
                "The property with id: {}, was not found.",
                id
            )),
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetServiceEntriesUseCase {
    type Response = Vec<ServiceEntry>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetServiceEntries";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.properties.find(&self.property_id).await {
            Ok(Some(_)) => (),
            Ok(None) => return Err(UseCaseError::PropertyNotFound(self.property_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        }

        ctx.repos
            .service_entries
            .find_by_property(&self.property_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
