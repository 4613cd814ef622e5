use crate::error::UpkeepError;
use tracing::{error, warn};
use upkeep_domain::{Reminder, ReminderError, ID};
use upkeep_infra::{SaveReminderError, UpkeepContext};

/// How many times a lifecycle action re-reads the reminder after losing a
/// compare-and-set race before giving up
pub const MAX_SAVE_ATTEMPTS: usize = 5;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidInput(ReminderError),
    Conflict(ID),
    StorageError,
}

impl From<UseCaseError> for UpkeepError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                id
            )),
            UseCaseError::InvalidInput(e) => Self::BadClientData(e.to_string()),
            UseCaseError::Conflict(id) => Self::Conflict(format!(
                "The reminder with id: {} is being modified by another request, try again.",
                id
            )),
            UseCaseError::StorageError => Self::ServiceUnavailable,
        }
    }
}

/// Atomic read-modify-write of a single reminder.
///
/// `apply` runs against a freshly read copy. If another writer saved the
/// reminder in between, the copy is discarded and `apply` runs again on the
/// new state. A rejected `apply` leaves the stored reminder untouched.
pub async fn update_reminder<F>(
    reminder_id: &ID,
    ctx: &UpkeepContext,
    mut apply: F,
) -> Result<Reminder, UseCaseError>
where
    F: FnMut(&mut Reminder) -> Result<(), ReminderError>,
{
    for _ in 0..MAX_SAVE_ATTEMPTS {
        let mut reminder = match ctx.repos.reminders.find(reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => return Err(UseCaseError::NotFound(reminder_id.clone())),
            Err(e) => {
                error!("Unable to read reminder {}: {:?}", reminder_id, e);
                return Err(UseCaseError::StorageError);
            }
        };

        apply(&mut reminder).map_err(UseCaseError::InvalidInput)?;
        reminder.updated = ctx.sys.get_timestamp_millis();

        match ctx.repos.reminders.save(&reminder).await {
            Ok(()) => {
                reminder.version += 1;
                return Ok(reminder);
            }
            Err(SaveReminderError::Conflict) => {
                warn!("Concurrent write on reminder {}, retrying", reminder_id);
            }
            Err(SaveReminderError::Storage(e)) => {
                error!("Unable to save reminder {}: {:?}", reminder_id, e);
                return Err(UseCaseError::StorageError);
            }
        }
    }

    Err(UseCaseError::Conflict(reminder_id.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::ContendedReminderRepo;
    use std::sync::atomic::Ordering;
    use upkeep_domain::{NaiveDate, Property};
    use upkeep_infra::setup_context;

    #[actix_web::main]
    #[test]
    async fn rejected_update_leaves_reminder_untouched() {
        let ctx = setup_context().await;
        let property = Property::new("Cedar Villas".into(), "Housekeeping".into(), 0);
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let reminder = Reminder::generate(&property, date, 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let res = update_reminder(&reminder.id, &ctx, |r| {
            r.add_notes("should not be stored".into());
            Err(ReminderError::ScheduleInPast { date, today: date })
        })
        .await;
        assert!(matches!(res, Err(UseCaseError::InvalidInput(_))));

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored, reminder);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_reminder_is_not_found() {
        let ctx = setup_context().await;
        let id = ID::default();
        let res = update_reminder(&id, &ctx, |_| Ok(())).await;
        assert_eq!(res, Err(UseCaseError::NotFound(id)));
    }

    #[actix_web::main]
    #[test]
    async fn successful_update_bumps_version() {
        let ctx = setup_context().await;
        let property = Property::new("Cedar Villas".into(), "Housekeeping".into(), 0);
        let reminder =
            Reminder::generate(&property, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let updated = update_reminder(&reminder.id, &ctx, |r| {
            r.add_notes("Call after 5pm".into());
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(updated.version, reminder.version + 1);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[actix_web::main]
    #[test]
    async fn lost_compare_and_set_is_retried() {
        let mut ctx = setup_context().await;
        let repo = ContendedReminderRepo::install(&mut ctx, 2);
        let property = Property::new("Cedar Villas".into(), "Housekeeping".into(), 0);
        let reminder =
            Reminder::generate(&property, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut applied = 0;
        let updated = update_reminder(&reminder.id, &ctx, |r| {
            applied += 1;
            r.add_notes("Call after 5pm".into());
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(applied, 3);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 3);
        assert_eq!(updated.version, reminder.version + 1);
        assert_eq!(updated.notes, Some("Call after 5pm".into()));

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[actix_web::main]
    #[test]
    async fn gives_up_after_max_attempts() {
        let mut ctx = setup_context().await;
        let repo = ContendedReminderRepo::install(&mut ctx, MAX_SAVE_ATTEMPTS);
        let property = Property::new("Cedar Villas".into(), "Housekeeping".into(), 0);
        let reminder =
            Reminder::generate(&property, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let res = update_reminder(&reminder.id, &ctx, |r| {
            r.add_notes("Call after 5pm".into());
            Ok(())
        })
        .await;
        assert_eq!(res, Err(UseCaseError::Conflict(reminder.id.clone())));
        assert_eq!(repo.saves.load(Ordering::SeqCst), MAX_SAVE_ATTEMPTS);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored, reminder);

        // Once the contention is gone the same update goes through
        let updated = update_reminder(&reminder.id, &ctx, |r| {
            r.add_notes("Call after 5pm".into());
            Ok(())
        })
        .await
        .unwrap();
        assert_eq!(updated.version, reminder.version + 1);
    }
}
