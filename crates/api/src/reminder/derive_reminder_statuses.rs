use super::update_reminder::{update_reminder, UseCaseError as UpdateError};
use crate::{error::UpkeepError, shared::usecase::UseCase};
use tracing::error;
use upkeep_infra::UpkeepContext;

/// Applies the clock driven status transitions and passive escalation to
/// every active reminder
#[derive(Debug)]
pub struct DeriveReminderStatusesUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct StatusSummary {
    pub statuses_updated: usize,
    pub failures: usize,
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
impl UseCase for DeriveReminderStatusesUseCase {
    type Response = StatusSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "DeriveReminderStatuses";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx.repos.reminders.find_active().await.map_err(|e| {
            error!("Unable to list active reminders: {:?}", e);
            UseCaseError::StorageError
        })?;
        let today = ctx.today();
        let policy = &ctx.config.escalation;

        let mut summary = StatusSummary::default();
        for mut reminder in reminders {
            if !reminder.refresh_status(today, policy) {
                continue;
            }
            let res = update_reminder(&reminder.id, ctx, |r| {
                r.refresh_status(today, policy);
                Ok(())
            })
            .await;
            match res {
                Ok(_) => summary.statuses_updated += 1,
                // Deleted since it was listed
                Err(UpdateError::NotFound(_)) => (),
                Err(e) => {
                    error!("Unable to refresh status of reminder {}: {:?}", reminder.id, e);
                    summary.failures += 1;
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at};
    use upkeep_domain::{EscalationLevel, Reminder, ReminderStatus};

    #[actix_web::main]
    #[test]
    async fn demotes_overdue_and_escalates() {
        let ctx = setup_at(date(2025, 1, 25)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let overdue = Reminder::generate(&property, date(2025, 1, 10), 0);
        let upcoming = Reminder::generate(&property, date(2025, 2, 10), 0);
        ctx.repos.reminders.insert(&overdue).await.unwrap();
        ctx.repos.reminders.insert(&upcoming).await.unwrap();

        let mut usecase = DeriveReminderStatusesUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.statuses_updated, 1);
        assert_eq!(res.failures, 0);

        let stored = ctx.repos.reminders.find(&overdue.id).await.unwrap().unwrap();
        assert_eq!(stored.status(), ReminderStatus::Pending);
        // 15 days overdue
        assert_eq!(stored.escalation_level, EscalationLevel::Critical);

        let stored = ctx.repos.reminders.find(&upcoming.id).await.unwrap().unwrap();
        assert_eq!(stored, upcoming);

        // Nothing left to change
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res, StatusSummary::default());
    }
}
