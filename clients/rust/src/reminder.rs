use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use upkeep_api_structs::*;
use upkeep_domain::{date::format_date, NaiveDate, ID};

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

/// Visit date input for `service_done` and `update_service`
pub struct ServiceDoneInput {
    pub reminder_id: ID,
    pub completion_date: NaiveDate,
    pub next_service_date: Option<NaiveDate>,
    pub rollover_months: Option<u32>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Runs a refresh pass and returns the bucketed reminders
    pub async fn get(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn refresh(&self) -> APIResponse<refresh_reminders::APIResponse> {
        self.base
            .post((), "reminders/refresh".into(), StatusCode::OK)
            .await
    }

    /// Sends any action with a raw payload
    pub async fn apply(
        &self,
        body: apply_reminder_action::RequestBody,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        self.base
            .post(body, "reminders".into(), StatusCode::OK)
            .await
    }

    async fn action(
        &self,
        action: apply_reminder_action::ReminderAction,
        reminder_id: ID,
        data: apply_reminder_action::ReminderActionData,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        self.apply(apply_reminder_action::RequestBody {
            action,
            reminder_id,
            data,
        })
        .await
    }

    pub async fn mark_called(
        &self,
        reminder_id: ID,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        self.action(
            apply_reminder_action::ReminderAction::MarkCalled,
            reminder_id,
            Default::default(),
        )
        .await
    }

    pub async fn update_schedule(
        &self,
        reminder_id: ID,
        scheduled_date: NaiveDate,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        let data = apply_reminder_action::ReminderActionData {
            scheduled_date: Some(format_date(&scheduled_date)),
            ..Default::default()
        };
        self.action(
            apply_reminder_action::ReminderAction::UpdateSchedule,
            reminder_id,
            data,
        )
        .await
    }

    pub async fn service_done(
        &self,
        input: ServiceDoneInput,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        let data = apply_reminder_action::ReminderActionData {
            completion_date: Some(format_date(&input.completion_date)),
            next_service_date: input.next_service_date.as_ref().map(format_date),
            rollover_months: input.rollover_months,
            ..Default::default()
        };
        self.action(
            apply_reminder_action::ReminderAction::ServiceDone,
            input.reminder_id,
            data,
        )
        .await
    }

    pub async fn update_service(
        &self,
        input: ServiceDoneInput,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        let data = apply_reminder_action::ReminderActionData {
            service_date: Some(format_date(&input.completion_date)),
            next_service_date: input.next_service_date.as_ref().map(format_date),
            rollover_months: input.rollover_months,
            ..Default::default()
        };
        self.action(
            apply_reminder_action::ReminderAction::UpdateService,
            input.reminder_id,
            data,
        )
        .await
    }

    pub async fn mark_completed(
        &self,
        reminder_id: ID,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        self.action(
            apply_reminder_action::ReminderAction::MarkCompleted,
            reminder_id,
            Default::default(),
        )
        .await
    }

    pub async fn add_notes(
        &self,
        reminder_id: ID,
        notes: String,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        let data = apply_reminder_action::ReminderActionData {
            notes: Some(notes),
            ..Default::default()
        };
        self.action(
            apply_reminder_action::ReminderAction::AddNotes,
            reminder_id,
            data,
        )
        .await
    }

    pub async fn put_on_hold(
        &self,
        reminder_id: ID,
    ) -> APIResponse<apply_reminder_action::APIResponse> {
        self.action(
            apply_reminder_action::ReminderAction::PutOnHold,
            reminder_id,
            Default::default(),
        )
        .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<apply_reminder_action::APIResponse> {
        self.action(
            apply_reminder_action::ReminderAction::DeleteReminder,
            reminder_id,
            Default::default(),
        )
        .await
    }
}
