use super::update_reminder::{update_reminder, UseCaseError as UpdateError};
use crate::{error::UpkeepError, shared::usecase::UseCase};
use tracing::{error, info};
use upkeep_domain::{
    render_overdue_message, Notification, NotificationKind, NotificationRecord,
};
use upkeep_infra::UpkeepContext;

/// Emits one overdue notification per overdue crossing of a reminder.
///
/// The notification is published before the `notification_sent` latch is
/// flipped. Its id is derived from the reminder and the crossing, so a pass
/// that publishes again after a failed latch write, or races another pass,
/// ends up with a single feed entry. The latch and the history record are
/// written in one compare-and-set.
#[derive(Debug)]
pub struct NotifyOverdueRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct NotificationSummary {
    pub notifications_sent: usize,
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
impl UseCase for NotifyOverdueRemindersUseCase {
    type Response = NotificationSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "NotifyOverdueReminders";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let reminders = ctx.repos.reminders.find_active().await.map_err(|e| {
            error!("Unable to list active reminders: {:?}", e);
            UseCaseError::StorageError
        })?;
        let today = ctx.today();
        let now = ctx.sys.get_timestamp_millis();

        let mut summary = NotificationSummary::default();
        for reminder in reminders
            .into_iter()
            .filter(|r| r.is_overdue(today) && !r.notification_sent)
        {
            let record = NotificationRecord {
                timestamp: now,
                kind: NotificationKind::Overdue,
                message: render_overdue_message(&reminder),
            };
            let notification = Notification::new(&reminder, &record);
            if let Err(e) = ctx.repos.notifications.insert(&notification).await {
                error!("Unable to publish notification {}: {:?}", notification.id, e);
                summary.failures += 1;
                continue;
            }

            let crossing = reminder.notification_history.len();
            let mut latched = false;
            let res = update_reminder(&reminder.id, ctx, |r| {
                latched = false;
                if !r.is_overdue(today)
                    || r.notification_sent
                    || r.notification_history.len() != crossing
                {
                    return Ok(());
                }
                r.record_notification(record.clone());
                latched = true;
                Ok(())
            })
            .await;

            match res {
                Ok(_) if latched => {
                    info!("{}", record.message);
                    summary.notifications_sent += 1;
                }
                Ok(_) | Err(UpdateError::NotFound(_)) => (),
                Err(e) => {
                    error!("Unable to notify about reminder {}: {:?}", reminder.id, e);
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
    use crate::{
        reminder::update_schedule::UpdateScheduleUseCase,
        shared::testing::{
            date, insert_property, noon_millis, setup_at, ContendedReminderRepo,
            FlakyNotificationRepo,
        },
    };
    use std::sync::atomic::Ordering;
    use upkeep_domain::Reminder;

    #[actix_web::main]
    #[test]
    async fn notifies_once_per_overdue_crossing() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = NotifyOverdueRemindersUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 1);

        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert!(stored.notification_sent);
        assert_eq!(stored.notification_history.len(), 1);
        let record = &stored.notification_history[0];
        assert_eq!(record.kind, NotificationKind::Overdue);
        assert!(record.message.contains("Pest Control"));
        assert!(record.message.contains("Harbor Point"));
        assert!(record.message.contains("555-0199"));
        assert!(record.message.contains("Ring Road"));
        assert!(record.message.contains("2025-01-10"));

        let feed = ctx.repos.notifications.find_since(0).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].reminder_id, reminder.id);

        // A second pass emits nothing
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res, NotificationSummary::default());
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.notification_history.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn rescheduled_reminder_can_notify_again() {
        let mut ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = NotifyOverdueRemindersUseCase {};
        usecase.execute(&ctx).await.unwrap();

        let mut reschedule = UpdateScheduleUseCase {
            reminder_id: reminder.id.clone(),
            scheduled_date: date(2025, 1, 20),
        };
        reschedule.execute(&ctx).await.unwrap();

        ctx.sys = std::sync::Arc::new(upkeep_infra::StaticTimeSys(noon_millis(date(
            2025, 1, 21,
        ))));
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 1);
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.notification_history.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn unpublished_notification_is_retried() {
        let mut ctx = setup_at(date(2025, 1, 15)).await;
        let feed = FlakyNotificationRepo::install(&mut ctx);
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = NotifyOverdueRemindersUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 0);
        assert_eq!(res.failures, 1);
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert!(!stored.notification_sent);
        assert!(stored.notification_history.is_empty());

        feed.unavailable.store(false, Ordering::SeqCst);
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 1);
        assert_eq!(ctx.repos.notifications.find_since(0).await.unwrap().len(), 1);
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert!(stored.notification_sent);
    }

    #[actix_web::main]
    #[test]
    async fn failed_latch_write_does_not_duplicate_feed_entry() {
        let mut ctx = setup_at(date(2025, 1, 15)).await;
        ContendedReminderRepo::install(&mut ctx, 5);
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = NotifyOverdueRemindersUseCase {};
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 0);
        assert_eq!(res.failures, 1);
        assert_eq!(ctx.repos.notifications.find_since(0).await.unwrap().len(), 1);

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 1);
        let feed = ctx.repos.notifications.find_since(0).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].reminder_id, reminder.id);
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(stored.notification_history.len(), 1);
    }
}
