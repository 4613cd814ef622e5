use super::{
    add_notes::AddNotesUseCase, delete_reminder::DeleteReminderUseCase,
    mark_called::MarkCalledUseCase, mark_completed::MarkCompletedUseCase,
    put_on_hold::PutOnHoldUseCase, service_done::ServiceDoneUseCase,
    update_schedule::UpdateScheduleUseCase,
};
use crate::{
    error::UpkeepError,
    shared::{guard::Guard, usecase::execute},
};
use actix_web::{web, HttpResponse};
use upkeep_api_structs::{apply_reminder_action::*, dtos::ReminderDTO};
use upkeep_domain::{Reminder, ID};
use upkeep_infra::UpkeepContext;

fn respond(message: &str, reminder: Reminder, ctx: &UpkeepContext) -> HttpResponse {
    let reminder = ReminderDTO::new(reminder, ctx.today());
    HttpResponse::Ok().json(APIResponse::new(message, Some(reminder)))
}

/// Single write endpoint for every lifecycle action. Request data is
/// validated before any use case runs, so a malformed payload never touches
/// the reminder.
pub async fn apply_reminder_action_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<UpkeepContext>,
) -> Result<HttpResponse, UpkeepError> {
    let RequestBody {
        action,
        reminder_id,
        data,
    } = body.0;

    match action {
        ReminderAction::MarkCalled => {
            let usecase = MarkCalledUseCase { reminder_id };
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Call recorded", reminder, &ctx))
        }
        ReminderAction::UpdateSchedule => {
            let scheduled_date = Guard::against_missing_date("scheduledDate", &data.scheduled_date)?;
            let usecase = UpdateScheduleUseCase {
                reminder_id,
                scheduled_date,
            };
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Schedule updated", reminder, &ctx))
        }
        ReminderAction::ServiceDone => {
            let usecase = service_done_usecase(reminder_id, &data, "completionDate", false)?;
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Service recorded", reminder, &ctx))
        }
        ReminderAction::UpdateService => {
            let usecase = service_done_usecase(reminder_id, &data, "serviceDate", true)?;
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Service updated", reminder, &ctx))
        }
        ReminderAction::MarkCompleted => {
            let usecase = MarkCompletedUseCase { reminder_id };
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Reminder completed", reminder, &ctx))
        }
        ReminderAction::AddNotes => {
            let usecase = AddNotesUseCase {
                reminder_id,
                notes: data.notes.unwrap_or_default(),
            };
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Notes saved", reminder, &ctx))
        }
        ReminderAction::PutOnHold => {
            let usecase = PutOnHoldUseCase { reminder_id };
            let reminder = execute(usecase, &ctx).await?;
            Ok(respond("Reminder put on hold", reminder, &ctx))
        }
        ReminderAction::DeleteReminder => {
            let usecase = DeleteReminderUseCase { reminder_id };
            execute(usecase, &ctx).await?;
            Ok(HttpResponse::Ok().json(APIResponse::new("Reminder deleted", None)))
        }
    }
}

/// `service_done` takes the visit date as `completionDate` and
/// `update_service` as `serviceDate`. Either field is accepted for both.
fn service_done_usecase(
    reminder_id: ID,
    data: &ReminderActionData,
    field: &str,
    reset_call_attempts: bool,
) -> Result<ServiceDoneUseCase, UpkeepError> {
    let visit_date = match field {
        "serviceDate" => data.service_date.clone().or_else(|| data.completion_date.clone()),
        _ => data.completion_date.clone().or_else(|| data.service_date.clone()),
    };
    let completion_date = Guard::against_missing_date(field, &visit_date)?;
    let next_service_date =
        Guard::against_malformed_optional_date("nextServiceDate", &data.next_service_date)?;
    if let Some(0) = data.rollover_months {
        return Err(UpkeepError::BadClientData(
            "The rolloverMonths must be at least 1".into(),
        ));
    }

    Ok(ServiceDoneUseCase {
        reminder_id,
        completion_date,
        next_service_date,
        rollover_months: data.rollover_months,
        reset_call_attempts,
    })
}
