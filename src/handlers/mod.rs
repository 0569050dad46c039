pub mod notification_handler;
pub mod render_handler;
