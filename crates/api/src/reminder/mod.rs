mod add_notes;
mod apply_reminder_action;
mod delete_reminder;
mod derive_reminder_statuses;
pub mod generate_reminders;
mod get_reminders;
mod mark_called;
mod mark_completed;
mod notify_overdue_reminders;
mod put_on_hold;
pub mod refresh_reminders;
pub mod roll_forward_reminder;
mod service_done;
pub mod update_reminder;
mod update_schedule;

use actix_web::web;
use apply_reminder_action::apply_reminder_action_controller;
use get_reminders::get_reminders_controller;
use refresh_reminders::refresh_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::get().to(get_reminders_controller));
    cfg.route("/reminders", web::post().to(apply_reminder_action_controller));
    cfg.route(
        "/reminders/refresh",
        web::post().to(refresh_reminders_controller),
    );
}
