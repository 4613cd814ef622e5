use super::update_reminder::{update_reminder, UseCaseError};
use crate::shared::usecase::UseCase;
use upkeep_domain::{next_cycle_date, NaiveDate, Reminder, ID};
use upkeep_infra::UpkeepContext;

/// A visit was performed. Rolls the reminder into its next cycle.
#[derive(Debug)]
pub struct ServiceDoneUseCase {
    pub reminder_id: ID,
    pub completion_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    /// Overrides the configured rollover interval when no explicit next date is given
    pub rollover_months: Option<u32>,
    /// Whether the outreach counters of the finished cycle are cleared as well
    pub reset_call_attempts: bool,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ServiceDoneUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "ServiceDone";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let months = self
            .rollover_months
            .unwrap_or(ctx.config.service_done_rollover_months);
        let completion_date = self.completion_date;
        let next_date = next_cycle_date(completion_date, self.next_service_date, months);
        let reset_call_attempts = self.reset_call_attempts;

        update_reminder(&self.reminder_id, ctx, |reminder| {
            if reset_call_attempts {
                reminder.update_service(completion_date, next_date);
            } else {
                reminder.service_done(completion_date, next_date);
            }
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at};
    use upkeep_domain::{EscalationLevel, ReminderStatus};

    async fn setup_called_reminder(ctx: &UpkeepContext) -> Reminder {
        let property = insert_property(ctx, "Harbor Point", "Water Tank Cleaning", None).await;
        let mut reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        for _ in 0..4 {
            reminder.mark_called(0, ctx.today(), &ctx.config.escalation);
        }
        reminder.notification_sent = true;
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[actix_web::main]
    #[test]
    async fn rolls_over_one_month_by_default() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let reminder = setup_called_reminder(&ctx).await;

        let mut usecase = ServiceDoneUseCase {
            reminder_id: reminder.id.clone(),
            completion_date: date(2025, 1, 12),
            next_service_date: None,
            rollover_months: None,
            reset_call_attempts: false,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.last_service_date, Some(date(2025, 1, 12)));
        assert_eq!(res.scheduled_date(), Some(date(2025, 2, 12)));
        assert_eq!(res.status(), ReminderStatus::Scheduled);
        assert!(!res.state.is_called());
        assert!(!res.is_new_service);
        assert!(!res.notification_sent);
        assert_eq!(res.escalation_level, EscalationLevel::Normal);
        assert_eq!(res.call_attempts, 4);
    }

    #[actix_web::main]
    #[test]
    async fn explicit_next_date_wins() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let reminder = setup_called_reminder(&ctx).await;

        let mut usecase = ServiceDoneUseCase {
            reminder_id: reminder.id.clone(),
            completion_date: date(2025, 1, 12),
            next_service_date: Some(date(2025, 6, 1)),
            rollover_months: Some(3),
            reset_call_attempts: false,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.scheduled_date(), Some(date(2025, 6, 1)));
    }

    #[actix_web::main]
    #[test]
    async fn update_service_clears_call_attempts() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let reminder = setup_called_reminder(&ctx).await;

        let mut usecase = ServiceDoneUseCase {
            reminder_id: reminder.id.clone(),
            completion_date: date(2025, 1, 31),
            next_service_date: None,
            rollover_months: None,
            reset_call_attempts: true,
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.call_attempts, 0);
        assert_eq!(res.scheduled_date(), Some(date(2025, 2, 28)));
    }
}
