use super::{
    derive_reminder_statuses::DeriveReminderStatusesUseCase,
    generate_reminders::GenerateRemindersUseCase,
    notify_overdue_reminders::NotifyOverdueRemindersUseCase,
};
use crate::{
    error::UpkeepError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use upkeep_api_structs::{dtos::RefreshSummaryDTO, refresh_reminders::*};
use upkeep_infra::UpkeepContext;

pub async fn refresh_reminders_controller(
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let usecase = RefreshRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse {
                summary: summary.into(),
            })
        })
        .map_err(UpkeepError::from)
}

/// One full refresh pass: reconciliation, status derivation and the
/// notification scan, in that order.
///
/// Each stage tolerates failures of single records. The pass only fails when
/// a stage cannot read the store at all.
#[derive(Debug)]
pub struct RefreshRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct RefreshSummary {
    pub reminders_created: usize,
    pub properties_updated: usize,
    pub statuses_updated: usize,
    pub notifications_sent: usize,
    pub failures: usize,
}

impl From<RefreshSummary> for RefreshSummaryDTO {
    fn from(s: RefreshSummary) -> Self {
        Self {
            reminders_created: s.reminders_created,
            properties_updated: s.properties_updated,
            statuses_updated: s.statuses_updated,
            notifications_sent: s.notifications_sent,
            failures: s.failures,
        }
    }
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
impl UseCase for RefreshRemindersUseCase {
    type Response = RefreshSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "RefreshReminders";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let generated = execute(GenerateRemindersUseCase {}, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let statuses = execute(DeriveReminderStatusesUseCase {}, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let notifications = execute(NotifyOverdueRemindersUseCase {}, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(RefreshSummary {
            reminders_created: generated.reminders_created,
            properties_updated: generated.properties_updated,
            statuses_updated: statuses.statuses_updated,
            notifications_sent: notifications.notifications_sent,
            failures: generated.failures + statuses.failures + notifications.failures,
        })
    }
}
