use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use upkeep_domain::Notification;

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert_unless(notification, &self.notifications, |n| n.id == notification.id);
        Ok(())
    }

    async fn find_since(&self, since: i64) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.created >= since);
        notifications.sort_by_key(|n| n.created);
        Ok(notifications)
    }
}
