use serde_derive::{Deserialize, Serialize};

use crate::enums::client_error::ClientError;
use crate::models::notification::Notification;

const NOTIFICATION_TYPE: &str = "notification";

/// Sent once, right after the socket opens.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeMessage<'a> {
    pub action: &'static str,
    pub droplert_id: &'a str,
    pub website_url: &'a str,
}

impl<'a> SubscribeMessage<'a> {
    pub fn new(droplert_id: &'a str, website_url: &'a str) -> Self {
        SubscribeMessage {
            action: "subscribe",
            droplert_id,
            website_url,
        }
    }
}

/// Any frame the server pushes.
#[derive(Deserialize, Debug)]
pub struct InboundMessage {
    #[serde(rename = "type")]
    pub t: Option<String>, // Event type
    #[serde(default, rename = "data")]
    pub d: serde_json::Value, // Data
}

impl InboundMessage {
    /// `Ok(None)` for frames that are not notifications.
    pub fn parse(text: &str) -> Result<Option<Notification>, ClientError> {
        let message: InboundMessage = serde_json::from_str(text)?;
        if message.t.as_deref() != Some(NOTIFICATION_TYPE) {
            return Ok(None);
        }
        let notification = serde_json::from_value(message.d)?;
        Ok(Some(notification))
    }
}
