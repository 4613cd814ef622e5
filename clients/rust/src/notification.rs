use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use upkeep_api_structs::get_notifications;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Feed entries created at or after `since` (millis), oldest first
    pub async fn get(&self, since: Option<i64>) -> APIResponse<get_notifications::APIResponse> {
        let path = match since {
            Some(since) => format!("notifications?since={}", since),
            None => "notifications".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }
}
