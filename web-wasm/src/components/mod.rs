pub mod address_table;
pub mod error_message;
pub mod header;
pub mod loader;
pub mod save_plan_modal;
pub mod saved_plans;
pub mod settings_panel;
pub mod upload_area;
