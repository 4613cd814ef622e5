use super::update_reminder::{update_reminder, UseCaseError};
use crate::shared::usecase::UseCase;
use upkeep_domain::{NaiveDate, Reminder, ID};
use upkeep_infra::UpkeepContext;

#[derive(Debug)]
pub struct UpdateScheduleUseCase {
    pub reminder_id: ID,
    pub scheduled_date: NaiveDate,
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateScheduleUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateSchedule";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.today();
        let scheduled_date = self.scheduled_date;

        update_reminder(&self.reminder_id, ctx, |reminder| {
            reminder.update_schedule(scheduled_date, today)
        })
        .await
    }
}
