use super::{IReminderRepo, SaveReminderError};
use crate::repos::shared::inmemory_repo::*;
use upkeep_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn insert_if_no_active(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        Ok(insert_unless(reminder, &self.reminders, |r| {
            !r.is_completed()
                && r.property_id == reminder.property_id
                && r.service_type == reminder.service_type
        }))
    }

    async fn save(&self, reminder: &Reminder) -> Result<(), SaveReminderError> {
        let mut next = reminder.clone();
        next.version += 1;
        match compare_and_save(&next, &self.reminders, |stored| {
            stored.version == reminder.version
        }) {
            Some(true) => Ok(()),
            _ => Err(SaveReminderError::Conflict),
        }
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_property_service(
        &self,
        property_id: &ID,
        service_type: &str,
    ) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.property_id == *property_id && r.service_type == service_type
        }))
    }

    async fn find_active(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| !r.is_completed()))
    }

    async fn find_completed_since(&self, since: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.is_completed() && r.updated >= since
        }))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }

    async fn delete_by_property(&self, property_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_and_delete_by(&self.reminders, |r| {
            r.property_id == *property_id
        }))
    }
}
