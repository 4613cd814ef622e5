use super::update_reminder::{update_reminder, UseCaseError};
use crate::shared::usecase::UseCase;
use upkeep_domain::{Reminder, ID};
use upkeep_infra::UpkeepContext;

#[derive(Debug)]
pub struct AddNotesUseCase {
    pub reminder_id: ID,
    pub notes: String,
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddNotesUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "AddNotes";

    async fn execute(&mut self, ctx: &UpkeepContext) -> Result<Self::Response, Self::Error> {
        let notes = &self.notes;

        update_reminder(&self.reminder_id, ctx, |reminder| {
            reminder.add_notes(notes.clone());
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::testing::{date, insert_property, setup_at};

    #[actix_web::main]
    #[test]
    async fn overwrites_notes_only() {
        let ctx = setup_at(date(2025, 1, 15)).await;
        let property = insert_property(&ctx, "Harbor Point", "Pest Control", None).await;
        let mut reminder = Reminder::generate(&property, date(2025, 1, 10), 0);
        reminder.add_notes("Old notes".into());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let mut usecase = AddNotesUseCase {
            reminder_id: reminder.id.clone(),
            notes: "Customer asked for a morning slot".into(),
        };
        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.notes, Some("Customer asked for a morning slot".into()));
        assert_eq!(res.state, reminder.state);
        assert_eq!(res.call_attempts, reminder.call_attempts);
    }
}
