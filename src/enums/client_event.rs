use crate::enums::client_error::ClientError;

/// Everything that can happen to the client, fed into
/// [`NotificationHandler::handle`](crate::handlers::notification_handler::NotificationHandler::handle).
#[derive(Debug)]
pub enum ClientEvent {
    /// The hosting UI came up.
    Mount,
    Open,
    /// A text frame, not yet parsed.
    Message(String),
    Error(ClientError),
    Close,
    ReconnectElapsed,
    /// The page path changed.
    Navigate(String),
    Dismiss,
    /// The display timer for the given generation ran out.
    DisplayElapsed(u64),
    /// The hosting UI went away. Nothing is done after this.
    Teardown,
}
