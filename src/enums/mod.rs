pub mod client_command;
pub mod client_error;
pub mod client_event;
