pub mod notification;
pub mod websocket_message;
