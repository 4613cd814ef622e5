use super::update_reminder::{update_reminder, UseCaseError};
use crate::shared::usecase::UseCase;
use upkeep_domain::{Reminder, ID};
use upkeep_infra::UpkeepContext;

#[derive(Debug)]
pub struct PutOnHoldUseCase {
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for PutOnHoldUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "PutOnHold";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        update_reminder(&self.reminder_id, ctx, |reminder| {
            reminder.put_on_hold();
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at};
    use upkeep_domain::ReminderStatus;

    #[actix_web::main]
    #[test]
    async fn drops_schedule_until_rescheduled() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = PutOnHoldUseCase {
            reminder_id: reminder.id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.status(), ReminderStatus::OnHold);
        assert_eq!(res.scheduled_date(), None);
        assert!(!res.is_overdue(ctx.today()));
    }
}
