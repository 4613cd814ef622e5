mod create_property;
mod delete_property;
mod get_property;
mod get_service_entries;
mod record_service_entry;
mod update_property;

use actix_web::web;
use create_property::create_property_controller;
use delete_property::delete_property_controller;
use get_property::get_property_controller;
use get_service_entries::get_service_entries_controller;
use record_service_entry::record_service_entry_controller;
use update_property::update_property_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/properties", web::post().to(create_property_controller));
    cfg.route(
        "/properties/{property_id}",
        web::get().to(get_property_controller),
    );
    cfg.route(
        "/properties/{property_id}",
        web::put().to(update_property_controller),
    );
    cfg.route(
        "/properties/{property_id}",
        web::delete().to(delete_property_controller),
    );
    cfg.route(
        "/properties/{property_id}/services",
        web::post().to(record_service_entry_controller),
    );
    cfg.route(
        "/properties/{property_id}/services",
        web::get().to(get_service_entries_controller),
    );
}
