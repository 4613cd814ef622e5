use crate::{
    error::UpkeepError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use upkeep_api_structs::get_notifications::*;
use upkeep_domain::Notification;
use upkeep_infra::UpkeepContext;

pub async fn get_notifications_controller(
    query: web::Query<QueryParams>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let usecase = GetNotificationsUseCase {
        since: query.since.unwrap_or(0),
    };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(UpkeepError::from)
}

/// Feed of notification intents for the delivery component
#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub since: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .find_since(self.since)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
