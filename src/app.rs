use std::error::Error;

use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

use crate::config::{ClientConf, Config};
use crate::handlers::render_handler::{render, TerminalRenderer};
use crate::models::notification::Notification;
use crate::websocket::{self, ClientHandle};

const DISMISS: &str = "dismiss";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Navigate(String),
    Dismiss,
}

pub fn launch(conf: &Config) -> Result<(), Box<dyn Error>> {
    // Print welcome message
    info!("Starting Droplert client in {}", conf.app.environment);

    // Build a multi-threaded Tokio runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("droplert-worker-thread")
        .enable_all()
        .build()?;

    runtime.block_on(run(&conf.client))
}

async fn run(conf: &ClientConf) -> Result<(), Box<dyn Error>> {
    let client = websocket::spawn(conf)?;
    let render_handle = tokio::spawn(render_notifications(client.notifications()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    error!("Failed to listen for CTRL+C: {}", e);
                }
                break;
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => forward_input(&client, &line).await,
                Ok(None) => stdin_open = false,
                Err(e) => {
                    error!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            }
        }
    }

    client.shutdown().await;
    render_handle.abort();
    Ok(())
}

async fn forward_input(client: &ClientHandle, line: &str) {
    match parse_input(line) {
        Some(Input::Navigate(path)) => client.navigate(path).await,
        Some(Input::Dismiss) => client.dismiss().await,
        None => {
            if !line.trim().is_empty() {
                info!("Type a path starting with '/' or '{}'", DISMISS);
            }
        }
    }
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    if line.starts_with('/') {
        Some(Input::Navigate(line.to_string()))
    } else if line.eq_ignore_ascii_case(DISMISS) {
        Some(Input::Dismiss)
    } else {
        None
    }
}

async fn render_notifications(mut rx: watch::Receiver<Option<Notification>>) {
    let mut renderer = TerminalRenderer::new(std::io::stdout());

    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().clone();
        if let Err(e) = render(&mut renderer, current.as_ref()) {
            error!("Failed to render notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_navigate() {
        assert_eq!(parse_input(" /docs/guide \n"), Some(Input::Navigate("/docs/guide".to_string())));
        assert_eq!(parse_input("/"), Some(Input::Navigate("/".to_string())));
    }

    #[test]
    fn dismiss_command() {
        assert_eq!(parse_input("dismiss"), Some(Input::Dismiss));
        assert_eq!(parse_input("DISMISS"), Some(Input::Dismiss));
    }

    #[test]
    fn anything_else_is_ignored() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("docs"), None);
    }
}
