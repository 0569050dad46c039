use std::time::Duration;

use log::{debug, error, info, warn};

use crate::common::route_filter;
use crate::config::ClientConf;
use crate::enums::client_command::ClientCommand;
use crate::enums::client_error::ClientError;
use crate::enums::client_event::ClientEvent;
use crate::models::notification::Notification;
use crate::models::websocket_message::{InboundMessage, SubscribeMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Subscribed,
    TornDown,
}

/// The notification client without any I/O.
///
/// Events go in through [`handle`](Self::handle), the commands that come back
/// are what the caller has to do with the socket, the timers and the renderer.
/// Holds at most one current notification and at most one pending reconnect.
#[derive(Debug)]
pub struct NotificationHandler {
    droplert_id: String,
    website_url: String,
    reconnect_delay: Duration,
    display_timeout: Duration,
    state: ConnectionState,
    reconnect_pending: bool,
    current_path: String,
    current: Option<Notification>,
    generation: u64,
}

impl NotificationHandler {
    pub fn new(conf: &ClientConf) -> Result<Self, ClientError> {
        let droplert_id = match conf.droplert_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                error!("Missing Droplert ID");
                return Err(ClientError::MissingDroplertId);
            }
        };

        Ok(NotificationHandler {
            droplert_id,
            website_url: conf.website_url.clone(),
            reconnect_delay: Duration::from_millis(conf.reconnect_delay_ms),
            display_timeout: Duration::from_millis(conf.display_timeout_ms),
            state: ConnectionState::Disconnected,
            reconnect_pending: false,
            current_path: conf.initial_path.clone(),
            current: None,
            generation: 0,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    pub fn handle(&mut self, event: ClientEvent) -> Vec<ClientCommand> {
        if self.state == ConnectionState::TornDown {
            debug!("Ignoring {:?} after teardown", event);
            return Vec::new();
        }

        match event {
            ClientEvent::Mount => {
                if self.state == ConnectionState::Disconnected && !self.reconnect_pending {
                    self.connect()
                } else {
                    Vec::new()
                }
            }
            ClientEvent::Open => self.on_open(),
            ClientEvent::Message(text) => self.on_message(&text),
            ClientEvent::Error(err) => {
                // The close that follows drives the reconnect
                error!("{}", err);
                Vec::new()
            }
            ClientEvent::Close => self.on_close(),
            ClientEvent::ReconnectElapsed => {
                if !self.reconnect_pending {
                    return Vec::new();
                }
                self.reconnect_pending = false;
                self.connect()
            }
            ClientEvent::Navigate(path) => self.on_navigate(path),
            ClientEvent::Dismiss => self.clear(),
            ClientEvent::DisplayElapsed(generation) => {
                if generation == self.generation {
                    self.clear()
                } else {
                    Vec::new()
                }
            }
            ClientEvent::Teardown => self.teardown(),
        }
    }

    fn connect(&mut self) -> Vec<ClientCommand> {
        self.state = ConnectionState::Connecting;
        vec![ClientCommand::Connect]
    }

    fn on_open(&mut self) -> Vec<ClientCommand> {
        if self.state != ConnectionState::Connecting {
            debug!("Unexpected open in state {:?}", self.state);
            return Vec::new();
        }
        info!("Connected");

        let subscribe = SubscribeMessage::new(&self.droplert_id, &self.website_url);
        match serde_json::to_string(&subscribe) {
            Ok(text) => {
                self.state = ConnectionState::Subscribed;
                vec![ClientCommand::Send(text)]
            }
            Err(err) => {
                error!("Could not encode subscribe message: {}", err);
                Vec::new()
            }
        }
    }

    fn on_message(&mut self, text: &str) -> Vec<ClientCommand> {
        debug!("Received: {}", text);

        let notification = match InboundMessage::parse(text) {
            Ok(Some(notification)) => notification,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!("{}", err);
                return Vec::new();
            }
        };

        if !route_filter::matches_any(&self.current_path, &notification.routes) {
            debug!("Notification '{}' is not for {}", notification.title, self.current_path);
            return Vec::new();
        }

        self.show(notification)
    }

    fn on_close(&mut self) -> Vec<ClientCommand> {
        if self.reconnect_pending {
            return Vec::new();
        }
        warn!("Disconnected. Reconnecting in {}ms...", self.reconnect_delay.as_millis());

        self.state = ConnectionState::Disconnected;
        self.reconnect_pending = true;
        vec![ClientCommand::ScheduleReconnect(self.reconnect_delay)]
    }

    fn on_navigate(&mut self, path: String) -> Vec<ClientCommand> {
        self.current_path = path;

        let still_visible = match &self.current {
            Some(notification) => route_filter::matches_any(&self.current_path, &notification.routes),
            None => return Vec::new(),
        };

        if still_visible {
            Vec::new()
        } else {
            debug!("Clearing notification after navigation to {}", self.current_path);
            self.clear()
        }
    }

    fn show(&mut self, notification: Notification) -> Vec<ClientCommand> {
        self.generation += 1;

        let mut commands = vec![ClientCommand::Show(notification.clone())];
        if let Some(after) = notification.display_timeout(self.display_timeout) {
            commands.push(ClientCommand::ScheduleDismiss {
                generation: self.generation,
                after,
            });
        }

        self.current = Some(notification);
        commands
    }

    fn clear(&mut self) -> Vec<ClientCommand> {
        match self.current.take() {
            Some(_) => vec![ClientCommand::Clear],
            None => Vec::new(),
        }
    }

    fn teardown(&mut self) -> Vec<ClientCommand> {
        let mut commands = Vec::new();
        if self.reconnect_pending {
            self.reconnect_pending = false;
            commands.push(ClientCommand::CancelReconnect);
        }
        commands.push(ClientCommand::CloseSocket);

        self.state = ConnectionState::TornDown;
        commands
    }
}
