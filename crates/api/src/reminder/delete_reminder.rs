use super::update_reminder::UseCaseError;
use crate::shared::usecase::UseCase;
use tracing::error;
use upkeep_domain::{Reminder, ID};
use upkeep_infra::UpkeepContext;

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.reminders.delete(&self.reminder_id).await {
            Ok(Some(reminder)) => Ok(reminder),
            Ok(None) => Err(UseCaseError::NotFound(self.reminder_id.clone())),
            Err(e) => {
                error!("Unable to delete reminder {}: {:?}", self.reminder_id, e);
                Err(UseCaseError::StorageError)
            }
        }
    }
}
