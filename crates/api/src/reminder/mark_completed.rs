use super::update_reminder::{update_reminder, UseCaseError};
use crate::shared::usecase::UseCase;
use upkeep_domain::{Reminder, ID};
use upkeep_infra::UpkeepContext;

#[derive(Debug)]
pub struct MarkCompletedUseCase {
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkCompletedUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkCompleted";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let today = ctx.today();

        update_reminder(&self.reminder_id, ctx, |reminder| {
            reminder.mark_completed(today);
            Ok(())
        })
        .await
    }
}
