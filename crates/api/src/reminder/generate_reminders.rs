use crate::{error::UpkeepError, shared::usecase::UseCase};
use tracing::{error, info, warn};
use upkeep_domain::{Property, Reminder};
use upkeep_infra::{SaveReminderError, UpkeepContext};

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Reconciles the reminders with the current property data.
///
/// Every property with a service type and service date gets exactly one
/// active reminder for that pair. Running it again against unchanged
/// properties is a no-op.
#[derive(Debug)]
pub struct GenerateRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct GenerationSummary {
    pub reminders_created: usize,
    pub properties_updated: usize,
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

#[derive(Default)]
struct PropertyOutcome {
    created: bool,
    updated: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GenerateRemindersUseCase {
    type Response = GenerationSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "GenerateReminders";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let properties = ctx.repos.properties.find_all().await.map_err(|e| {
            error!("Unable to list properties: {:?}", e);
            UseCaseError::StorageError
        })?;
        let now = ctx.sys.get_timestamp_millis();
        let completed_since = now - ctx.config.recent_completion_window_days * DAY_MILLIS;

        let mut summary = GenerationSummary::default();
        for property in properties {
            match reconcile_property(property, now, completed_since, ctx).await {
                Ok(outcome) => {
                    if outcome.created {
                        summary.reminders_created += 1;
                    }
                    if outcome.updated {
                        summary.properties_updated += 1;
                    }
                }
                Err(e) => {
                    error!("Unable to reconcile property: {:?}", e);
                    summary.failures += 1;
                }
            }
        }

        if summary.reminders_created > 0 {
            info!("Generated {} new reminders", summary.reminders_created);
        }
        Ok(summary)
    }
}

async fn reconcile_property(
    mut property: Property,
    now: i64,
    completed_since: i64,
    ctx: &UpkeepContext,
) -> anyhow::Result<PropertyOutcome> {
    let mut outcome = PropertyOutcome::default();

    let should_be_on_hold = property.should_be_on_hold();
    if property.is_on_hold != should_be_on_hold {
        property.is_on_hold = should_be_on_hold;
        property.updated = now;
        ctx.repos.properties.save(&property).await?;
        outcome.updated = true;
    }

    let service_date = match property.schedulable_service_date() {
        Some(date) => date,
        None => return Ok(outcome),
    };

    let existing = ctx
        .repos
        .reminders
        .find_by_property_service(&property.id, &property.service_type)
        .await?;

    if let Some(active) = existing.iter().find(|r| !r.is_completed()) {
        let mut active = active.clone();
        if active.sync_snapshot(&property) {
            active.updated = now;
            match ctx.repos.reminders.save(&active).await {
                Ok(()) => outcome.updated = true,
                // Someone else wrote it, the next pass copies the snapshot
                Err(SaveReminderError::Conflict) => {
                    warn!("Skipped snapshot refresh of reminder {}", active.id)
                }
                Err(SaveReminderError::Storage(e)) => return Err(e),
            }
        }
        return Ok(outcome);
    }

    let recently_completed = existing
        .iter()
        .any(|r| r.is_completed() && r.updated >= completed_since);
    if recently_completed {
        return Ok(outcome);
    }

    let reminder = Reminder::generate(&property, service_date, now);
    outcome.created = insert_untracked_reminder(&reminder, ctx).await?;

    Ok(outcome)
}

/// Inserts `reminder` unless its property and service type already have an
/// active reminder. Returns whether it was inserted.
///
/// The property is looked up again afterwards. If it was deleted in the
/// meantime its cascade may already have run, so the reminder is removed.
pub async fn insert_untracked_reminder(
    reminder: &Reminder,
    ctx: &UpkeepContext,
) -> anyhow::Result<bool> {
    if !ctx.repos.reminders.insert_if_no_active(reminder).await? {
        return Ok(false);
    }
    if ctx.repos.properties.find(&reminder.property_id).await?.is_none() {
        warn!(
            "Property {} was deleted, removing reminder {}",
            reminder.property_id, reminder.id
        );
        ctx.repos.reminders.delete(&reminder.id).await?;
        return Ok(false);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reminder::mark_completed::MarkCompletedUseCase,
        shared::testing::{date, insert_property, setup_at},
    };
    use std::sync::{Arc, Barrier};
    use upkeep_domain::ReminderStatus;

    #[actix_web::main]
    #[test]
    async fn creates_one_reminder_per_property() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property =
            insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 2, 1))).await;

        let mut usecase = GenerateRemindersUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.reminders_created, 1);
        assert_eq!(res.failures, 0);

        let reminders = ctx
            .repos
            .reminders
            .find_by_property_service(&property.id, "Pest Control")
            .await
            .unwrap();
        assert_eq!(reminders.len(), 1);
        let reminder = &reminders[0];
        assert_eq!(reminder.scheduled_date(), Some(date(2025, 2, 1)));
        assert_eq!(reminder.status(), ReminderStatus::Scheduled);
        assert_eq!(reminder.last_service_date, None);
        assert!(reminder.is_new_service);
        assert_eq!(reminder.snapshot.property_name, "Harbor Point");

        // Idempotent
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res, GenerationSummary::default());
        assert_eq!(ctx.repos.reminders.find_active().await.unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn skips_properties_without_schedule_and_flags_them_on_hold() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let mut property = insert_property(&ctx, "Bay Court", "", Some(date(2025, 2, 1))).await;
        property.is_on_hold = false;
        ctx.repos.properties.save(&property).await.unwrap();

        let mut usecase = GenerateRemindersUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.reminders_created, 0);
        assert_eq!(res.properties_updated, 1);

        let stored = ctx.repos.properties.find(&property.id).await.unwrap().unwrap();
        assert!(stored.is_on_hold);
        assert!(ctx.repos.reminders.find_active().await.unwrap().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn refreshes_snapshot_of_active_reminder() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let mut property =
            insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 2, 1))).await;
        let mut usecase = GenerateRemindersUseCase {};
        usecase.execute(&ctx).await.unwrap();

        property.contact = "555-0142".into();
        ctx.repos.properties.save(&property).await.unwrap();
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.properties_updated, 1);
        assert_eq!(res.reminders_created, 0);

        let active = ctx.repos.reminders.find_active().await.unwrap();
        assert_eq!(active[0].snapshot.contact, "555-0142");
    }

    #[actix_web::main]
    #[test]
    async fn recent_completion_covers_the_pair() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 1, 10))).await;
        let mut usecase = GenerateRemindersUseCase {};
        usecase.execute(&ctx).await.unwrap();

        let reminder = ctx.repos.reminders.find_active().await.unwrap().remove(0);
        let mut complete = MarkCompletedUseCase {
            reminder_id: reminder.id.clone(),
        };
        complete.execute(&ctx).await.unwrap();

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.reminders_created, 0);
        assert!(ctx.repos.reminders.find_active().await.unwrap().is_empty());
    }

    #[test]
    fn concurrent_passes_create_one_reminder_per_pair() {
        const PROPERTIES: usize = 300;
        const PASSES: usize = 4;

        let ctx = actix_web::rt::System::new().block_on(async {
            let ctx = setup_at(date(2025, 1, 15)).await;
            for i in 0..PROPERTIES {
                let name = format!("Block {}", i);
                insert_property(&ctx, &name, "Pest Control", Some(date(2025, 2, 1))).await;
            }
            ctx
        });

        let barrier = Arc::new(Barrier::new(PASSES));
        let handles = (0..PASSES)
            .map(|_| {
                let ctx = ctx.clone();
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    actix_web::rt::System::new().block_on(async move {
                        barrier.wait();
                        let mut usecase = GenerateRemindersUseCase {};
                        usecase.execute(&ctx).await.unwrap().reminders_created
                    })
                })
            })
            .collect::<Vec<_>>();
        let created: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(created, PROPERTIES);

        let active = actix_web::rt::System::new()
            .block_on(async { ctx.repos.reminders.find_active().await.unwrap() });
        assert_eq!(active.len(), PROPERTIES);
    }

    #[actix_web::main]
    #[test]
    async fn drops_reminder_of_deleted_property() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property =
            insert_property(&ctx, "Harbor Point", "Pest Control", Some(date(2025, 2, 1))).await;
        ctx.repos.properties.delete(&property.id).await.unwrap();

        let reminder = Reminder::generate(&property, date(2025, 2, 1), 0);
        assert!(!insert_untracked_reminder(&reminder, &ctx).await.unwrap());
        assert!(ctx.repos.reminders.find_active().await.unwrap().is_empty());
    }
}
