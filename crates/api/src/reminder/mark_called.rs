use super::update_reminder::{update_reminder, UseCaseError};
use crate::shared::usecase::UseCase;
use upkeep_domain::{Reminder, ID};
use upkeep_infra::UpkeepContext;

#[derive(Debug)]
pub struct MarkCalledUseCase {
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkCalledUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkCalled";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let today = ctx.today();
        let policy = &ctx.config.escalation;

        update_reminder(&self.reminder_id, ctx, |reminder| {
            reminder.mark_called(now, today, policy);
            Ok(())
        })
        .await
    }
}
