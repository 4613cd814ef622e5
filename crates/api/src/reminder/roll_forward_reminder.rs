use super::{
    generate_reminders::insert_untracked_reminder,
    update_reminder::{update_reminder, UseCaseError as UpdateError, MAX_SAVE_ATTEMPTS},
};
use crate::shared::usecase::UseCase;
use tracing::{error, warn};
use upkeep_domain::{next_cycle_date, NaiveDate, Property, Reminder, ReminderError, ID};
use upkeep_infra::UpkeepContext;

/// A completed visit was recorded outside of the reminder actions, e.g. in
/// the daily book. Rolls the active reminder of the pair into its next cycle
/// or starts tracking the pair if it has no active reminder.
#[derive(Debug)]
pub struct RollForwardReminderUseCase {
    pub property: Property,
    pub service_type: String,
    pub completion_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    PropertyNotFound(ID),
    Rejected(ReminderError),
    /// Other writers kept changing the reminders of the pair
    Contended(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for RollForwardReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "RollForwardReminder";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let next_date = next_cycle_date(
            self.completion_date,
            self.next_service_date,
            ctx.config.service_entry_rollover_months,
        );

        // The active reminder can be deleted, or one can be created, between
        // the lookup and the write. Both cases start over with a fresh lookup.
        for _ in 0..MAX_SAVE_ATTEMPTS {
            let existing = ctx
                .repos
                .reminders
                .find_by_property_service(&self.property.id, &self.service_type)
                .await
                .map_err(|e| {
                    error!("Unable to read reminders of {}: {:?}", self.property.id, e);
                    UseCaseError::StorageError
                })?;

            if let Some(active) = existing.into_iter().find(|r| !r.is_completed()) {
                let completion_date = self.completion_date;
                let res = update_reminder(&active.id, ctx, |reminder| {
                    reminder.service_done(completion_date, next_date);
                    Ok(())
                })
                .await;
                match res {
                    Ok(reminder) => return Ok(reminder),
                    Err(UpdateError::NotFound(_)) => {
                        warn!("Reminder {} was deleted while rolling it forward", active.id);
                        continue;
                    }
                    Err(UpdateError::InvalidInput(e)) => return Err(UseCaseError::Rejected(e)),
                    Err(UpdateError::Conflict(id)) => return Err(UseCaseError::Contended(id)),
                    Err(UpdateError::StorageError) => return Err(UseCaseError::StorageError),
                }
            }

            let reminder = Reminder::from_completed_visit(
                &self.property,
                self.service_type.clone(),
                self.completion_date,
                next_date,
                ctx.sys.get_timestamp_millis(),
            );
            let inserted = insert_untracked_reminder(&reminder, ctx).await.map_err(|e| {
                error!("Unable to insert reminder: {:?}", e);
                UseCaseError::StorageError
            })?;
            if inserted {
                return Ok(reminder);
            }
            if ctx
                .repos
                .properties
                .find(&self.property.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?
                .is_none()
            {
                return Err(UseCaseError::PropertyNotFound(self.property.id.clone()));
            }
        }

        Err(UseCaseError::Contended(self.property.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at};
    use upkeep_domain::ReminderStatus;

    #[actix_web::main]
    #[test]
    async fn rolls_existing_reminder_four_months() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property =
            insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 1, 10))).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = RollForwardReminderUseCase {
            property: property.clone(),
            service_type: "Pest Control".into(),
            completion_date: date(2025, 1, 14),
            next_service_date: None,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.id, reminder.id);
        assert_eq!(res.last_service_date, Some(date(2025, 1, 14)));
        assert_eq!(res.scheduled_date(), Some(date(2025, 5, 14)));
        assert_eq!(res.status(), ReminderStatus::Scheduled);
        assert!(!res.is_new_service);
    }

    #[actix_web::main]
    #[test]
    async fn creates_reminder_when_pair_is_untracked() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;

        let mut usecase = RollForwardReminderUseCase {
            property: property.clone(),
            service_type: "Housekeeping".into(),
            completion_date: date(2025, 1, 14),
            next_service_date: Some(date(2025, 2, 14)),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.service_type, "Housekeeping");
        assert_eq!(res.last_service_date, Some(date(2025, 1, 14)));
        assert_eq!(res.scheduled_date(), Some(date(2025, 2, 14)));
        assert!(!res.is_new_service);
        assert_eq!(ctx.repos.reminders.find_active().await.unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn deleted_property_gets_no_reminder() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        ctx.repos.properties.delete(&property.id).await.unwrap();

        let mut usecase = RollForwardReminderUseCase {
            property: property.clone(),
            service_type: "Pest Control".into(),
            completion_date: date(2025, 1, 14),
            next_service_date: None,
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::PropertyNotFound(property.id.clone()))
        );
        assert!(ctx.repos.reminders.find_active().await.unwrap().is_empty());
    }
}
