use std::time::Duration;

use crate::models::notification::Notification;

/// Side effects requested by the state machine. The driver carries them out.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    Connect,
    Send(String),
    ScheduleReconnect(Duration),
    CancelReconnect,
    CloseSocket,
    Show(Notification),
    ScheduleDismiss { generation: u64, after: Duration },
    Clear,
}
