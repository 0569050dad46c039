use std::io::{self, Write};

use log::debug;

use crate::models::notification::{Notification, NotificationType};

/// One method per presentation. `clear` removes whatever is on screen.
pub trait NotificationRenderer {
    fn alert(&mut self, notification: &Notification) -> io::Result<()>;
    fn alert_dialog(&mut self, notification: &Notification) -> io::Result<()>;
    fn toast(&mut self, notification: &Notification) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// Picks the presentation for the current notification, if any.
pub fn render<R: NotificationRenderer + ?Sized>(renderer: &mut R, current: Option<&Notification>) -> io::Result<()> {
    let notification = match current {
        Some(notification) => notification,
        None => return renderer.clear(),
    };

    match notification.kind {
        NotificationType::Alert => renderer.alert(notification),
        NotificationType::AlertDialog => renderer.alert_dialog(notification),
        NotificationType::Toast => renderer.toast(notification),
        NotificationType::Unknown => {
            debug!("No presentation for notification '{}'", notification.title);
            renderer.clear()
        }
    }
}

/// Writes notifications as plain lines.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, label: &str, notification: &Notification) -> io::Result<()> {
        write!(self.out, "[{}] {}: {}", label, notification.title, notification.message)?;
        if let Some(logo) = notification.logo_path() {
            write!(self.out, " ({})", logo)?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> NotificationRenderer for TerminalRenderer<W> {
    fn alert(&mut self, notification: &Notification) -> io::Result<()> {
        self.line("alert", notification)
    }

    fn alert_dialog(&mut self, notification: &Notification) -> io::Result<()> {
        self.line("dialog", notification)?;
        writeln!(self.out, "  type 'dismiss' to close")?;
        self.out.flush()
    }

    fn toast(&mut self, notification: &Notification) -> io::Result<()> {
        self.line("toast", notification)
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(kind: &str) -> Notification {
        serde_json::from_value(json!({
            "title": "Hi",
            "message": "There",
            "type": kind,
            "fileName": "Abstract1.png"
        }))
        .unwrap()
    }

    fn rendered(current: Option<&Notification>) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new());
        render(&mut renderer, current).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn renders_by_type() {
        assert_eq!(rendered(Some(&notification("toast"))), "[toast] Hi: There (/Abstract1.png)\n");
        assert_eq!(rendered(Some(&notification("alert"))), "[alert] Hi: There (/Abstract1.png)\n");
        assert!(rendered(Some(&notification("alert_dialog"))).starts_with("[dialog] Hi: There"));
    }

    #[test]
    fn unknown_type_renders_nothing() {
        assert_eq!(rendered(Some(&notification("popup"))), "");
        assert_eq!(rendered(None), "");
    }
}
