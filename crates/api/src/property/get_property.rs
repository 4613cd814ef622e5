use crate::{
    error::UpkeepError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use upkeep_api_structs::get_property::*;
use upkeep_domain::{Property, ID};
use upkeep_infra::UpkeepContext;

pub async fn get_property_controller(
    path: web::Path<PathParams>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let usecase = GetPropertyUseCase {
        property_id: path.property_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|property| HttpResponse::Ok().json(APIResponse::new(property)))
        .map_err(UpkeepError::from)
}

#[derive(Debug)]
pub struct GetPropertyUseCase {
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
impl UseCase for GetPropertyUseCase {
    type Response = Property;

    type Error = UseCaseError;

    const NAME: &'static str = "GetProperty";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.properties.find(&self.property_id).await {
            Ok(Some(property)) => Ok(property),
            Ok(None) => Err(UseCaseError::NotFound(self.property_id.clone())),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
