use super::refresh_reminders::RefreshRemindersUseCase;
use crate::{
    error::UpkeepError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tracing::error;
use upkeep_api_structs::{dtos::ReminderListingDTO, get_reminders::*};
use upkeep_domain::{project_reminders, ReminderProjection};
use upkeep_infra::UpkeepContext;

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

pub async fn get_reminders_controller(
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    // Every read starts with a refresh pass so the listing reflects today
    execute(RefreshRemindersUseCase {}, &ctx).await?;

    let today = ctx.today();
    let usecase = GetRemindersUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|projection| {
            let res: APIResponse = ReminderListingDTO::new(projection, today);
            HttpResponse::Ok().json(res)
        })
        .map_err(UpkeepError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {}

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
impl UseCase for GetRemindersUseCase {
    type Response = ReminderProjection;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let completed_since = ctx.sys.get_timestamp_millis()
            - ctx.config.completed_visibility_days * DAY_MILLIS;

        let mut reminders = ctx.repos.reminders.find_active().await.map_err(|e| {
            error!("Unable to list active reminders: {:?}", e);
            UseCaseError::StorageError
        })?;
        let completed = ctx
            .repos
            .reminders
            .find_completed_since(completed_since)
            .await
            .map_err(|e| {
                error!("Unable to list completed reminders: {:?}", e);
                UseCaseError::StorageError
            })?;
        reminders.extend(completed);

        Ok(project_reminders(reminders, ctx.today(), completed_since))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at};
    use upkeep_domain::Reminder;

    #[actix_web::main]
    #[test]
    async fn partitions_all_reminders() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let overdue = Reminder::generate(&property, date(2025, 1, 10), 0);
        let due_today = Reminder::generate(&property, date(2025, 1, 15), 0);
        let upcoming = Reminder::generate(&property, date(2025, 2, 15), 0);
        let mut on_hold = Reminder::generate(&property, date(2025, 2, 15), 0);
        on_hold.put_on_hold();
        let mut completed = Reminder::generate(&property, date(2025, 1, 12), 0);
        completed.mark_completed(date(2025, 1, 12));
        completed.updated = ctx.sys.get_timestamp_millis();
        let mut stale = Reminder::generate(&property, date(2024, 10, 1), 0);
        stale.mark_completed(date(2024, 10, 1));

        for r in [&overdue, &due_today, &upcoming, &on_hold, &completed, &stale] {
            ctx.repos.reminders.insert(r).await.unwrap();
        }

        let mut usecase = GetRemindersUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.overdue[0].id, overdue.id);
        assert_eq!(res.due_today[0].id, due_today.id);
        assert_eq!(res.scheduled[0].id, upcoming.id);
        assert_eq!(res.on_hold[0].id, on_hold.id);
        assert_eq!(res.completed.len(), 1);
        assert_eq!(res.completed[0].id, completed.id);
        assert_eq!(res.stats.total_reminders, 4);
        assert_eq!(res.stats.completed, 1);
    }
}
