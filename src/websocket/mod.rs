use std::future::{pending, Future};
use std::pin::Pin;

use futures_util::{SinkExt, StreamExt};
use http::header::ORIGIN;
use http::HeaderValue;
use log::{debug, error, info, warn};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{Error, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::config::ClientConf;
use crate::enums::client_command::ClientCommand;
use crate::enums::client_error::ClientError;
use crate::enums::client_event::ClientEvent;
use crate::handlers::notification_handler::NotificationHandler;
use crate::models::notification::Notification;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type Connecting = Pin<Box<dyn Future<Output = Result<WsStream, Error>> + Send>>;

/// Handle to a running client task.
pub struct ClientHandle {
    events: mpsc::Sender<ClientEvent>,
    notifications: watch::Receiver<Option<Notification>>,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ClientHandle {
    /// Current notification, updated whenever it is shown or cleared.
    pub fn notifications(&self) -> watch::Receiver<Option<Notification>> {
        self.notifications.clone()
    }

    pub async fn navigate(&self, path: impl Into<String>) {
        self.forward(ClientEvent::Navigate(path.into())).await;
    }

    pub async fn dismiss(&self) {
        self.forward(ClientEvent::Dismiss).await;
    }

    /// Closes the socket, cancels the timers and waits for the task to end.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            error!("Client task failed: {}", e);
        }
    }

    async fn forward(&self, event: ClientEvent) {
        if self.events.send(event).await.is_err() {
            debug!("Client task is gone");
        }
    }
}

/// Starts the client on the current tokio runtime.
///
/// Fails without touching the network when no droplert id is configured.
pub fn spawn(conf: &ClientConf) -> Result<ClientHandle, ClientError> {
    let (publish_tx, notifications) = watch::channel(None);
    let (events, events_rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let driver = Driver::new(conf, publish_tx)?;
    let task = tokio::spawn(driver.run(events_rx, shutdown_rx));

    Ok(ClientHandle { events, notifications, shutdown_tx, task })
}

/// Owns the socket and the timers and does what the handler asks for.
struct Driver {
    endpoint: String,
    website_url: String,
    handler: NotificationHandler,
    publish: watch::Sender<Option<Notification>>,
    socket: Option<WsStream>,
    connecting: Option<Connecting>,
    reconnect: Option<Pin<Box<Sleep>>>,
    dismiss: Option<(u64, Pin<Box<Sleep>>)>,
}

impl Driver {
    fn new(conf: &ClientConf, publish: watch::Sender<Option<Notification>>) -> Result<Self, ClientError> {
        Ok(Driver {
            endpoint: conf.endpoint.clone(),
            website_url: conf.website_url.clone(),
            handler: NotificationHandler::new(conf)?,
            publish,
            socket: None,
            connecting: None,
            reconnect: None,
            dismiss: None,
        })
    }

    async fn run(mut self, mut events_rx: mpsc::Receiver<ClientEvent>, mut shutdown_rx: oneshot::Receiver<()>) {
        let commands = self.handler.handle(ClientEvent::Mount);
        self.execute(commands).await;

        loop {
            let events = tokio::select! {
                _ = &mut shutdown_rx => vec![ClientEvent::Teardown],
                result = finish_connect(&mut self.connecting) => self.connected(result),
                frame = next_frame(&mut self.socket) => self.received(frame),
                _ = expire(&mut self.reconnect) => {
                    self.reconnect = None;
                    vec![ClientEvent::ReconnectElapsed]
                }
                generation = expire_dismiss(&mut self.dismiss) => {
                    self.dismiss = None;
                    vec![ClientEvent::DisplayElapsed(generation)]
                }
                Some(event) = events_rx.recv() => vec![event],
            };

            let teardown = events.iter().any(|event| matches!(event, ClientEvent::Teardown));
            for event in events {
                let commands = self.handler.handle(event);
                self.execute(commands).await;
            }

            if teardown {
                info!("Client stopped");
                break;
            }
        }
    }

    fn connected(&mut self, result: Result<WsStream, Error>) -> Vec<ClientEvent> {
        self.connecting = None;
        match result {
            Ok(stream) => {
                self.socket = Some(stream);
                vec![ClientEvent::Open]
            }
            Err(e) => vec![ClientEvent::Error(e.into()), ClientEvent::Close],
        }
    }

    fn received(&mut self, frame: Option<Result<Message, Error>>) -> Vec<ClientEvent> {
        match frame {
            Some(Ok(Message::Text(text))) => vec![ClientEvent::Message(text)],
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes) {
                Ok(text) => vec![ClientEvent::Message(text)],
                Err(e) => {
                    warn!("Dropping binary frame: {}", e);
                    Vec::new()
                }
            },
            Some(Ok(Message::Close(frame))) => {
                debug!("Close frame: {:?}", frame);
                self.socket = None;
                vec![ClientEvent::Close]
            }
            Some(Ok(_)) => Vec::new(),
            Some(Err(e)) => {
                self.socket = None;
                vec![ClientEvent::Error(e.into()), ClientEvent::Close]
            }
            None => {
                self.socket = None;
                vec![ClientEvent::Close]
            }
        }
    }

    async fn execute(&mut self, commands: Vec<ClientCommand>) {
        for command in commands {
            match command {
                ClientCommand::Connect => {
                    info!("Connecting to {}", self.endpoint);
                    self.connecting = Some(Box::pin(connect(self.endpoint.clone(), self.website_url.clone())));
                }
                ClientCommand::Send(text) => match self.socket.as_mut() {
                    Some(socket) => {
                        if let Err(e) = socket.send(Message::Text(text)).await {
                            error!("Failed to send websocket message: {}", e);
                        }
                    }
                    None => warn!("Not connected, dropping outbound message"),
                },
                ClientCommand::ScheduleReconnect(delay) => {
                    self.reconnect = Some(Box::pin(sleep(delay)));
                }
                ClientCommand::CancelReconnect => {
                    self.reconnect = None;
                }
                ClientCommand::CloseSocket => {
                    self.connecting = None;
                    self.dismiss = None;
                    if let Some(mut socket) = self.socket.take() {
                        if let Err(e) = socket.close(None).await {
                            debug!("Error while closing socket: {}", e);
                        }
                    }
                }
                ClientCommand::Show(notification) => {
                    self.dismiss = None;
                    self.publish.send_replace(Some(notification));
                }
                ClientCommand::ScheduleDismiss { generation, after } => {
                    self.dismiss = Some((generation, Box::pin(sleep(after))));
                }
                ClientCommand::Clear => {
                    self.dismiss = None;
                    self.publish.send_replace(None);
                }
            }
        }
    }
}

async fn connect(endpoint: String, website_url: String) -> Result<WsStream, Error> {
    let mut request = endpoint.into_client_request()?;
    match HeaderValue::from_str(&website_url) {
        Ok(origin) => {
            request.headers_mut().insert(ORIGIN, origin);
        }
        Err(e) => warn!("Not sending Origin header: {}", e),
    }

    let (stream, _) = connect_async(request).await?;
    Ok(stream)
}

async fn finish_connect(connecting: &mut Option<Connecting>) -> Result<WsStream, Error> {
    match connecting {
        Some(future) => future.await,
        None => pending().await,
    }
}

async fn next_frame(socket: &mut Option<WsStream>) -> Option<Result<Message, Error>> {
    match socket {
        Some(stream) => stream.next().await,
        None => pending().await,
    }
}

async fn expire(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(delay) => delay.as_mut().await,
        None => pending().await,
    }
}

async fn expire_dismiss(timer: &mut Option<(u64, Pin<Box<Sleep>>)>) -> u64 {
    match timer {
        Some((generation, delay)) => {
            delay.as_mut().await;
            *generation
        }
        None => pending().await,
    }
}
