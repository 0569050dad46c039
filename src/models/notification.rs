use std::time::Duration;

use serde::Deserializer;
use serde_derive::Deserialize;
use serde_json::Value;

/// Which presentation a notification asks for.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Alert,
    AlertDialog,
    Toast,
    /// Anything else the server sends. Still becomes the current
    /// notification but renders nothing.
    #[serde(other)]
    Unknown,
}

/// A notification as carried in the `data` object of a `notification` frame.
///
/// Colours, style and border radius are opaque and passed through as received.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    #[serde(default, deserialize_with = "string_or_none")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub background_color: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub text_color: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub border_color: String,
    #[serde(default, rename = "fileName")]
    pub logo_file_name: Option<String>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub border_radius: Option<f64>,
    #[serde(default, deserialize_with = "routes_or_empty")]
    pub routes: Vec<String>,
}

impl Notification {
    /// Static asset path of the logo, if the notification names one.
    pub fn logo_path(&self) -> Option<String> {
        match self.logo_file_name.as_deref() {
            Some(name) if !name.is_empty() => Some(format!("/{}", name.trim_start_matches('/'))),
            _ => None,
        }
    }

    /// How long the notification stays up on its own. Dialogs wait for the user.
    pub fn display_timeout(&self, timeout: Duration) -> Option<Duration> {
        match self.kind {
            NotificationType::Alert | NotificationType::Toast => Some(timeout),
            NotificationType::AlertDialog | NotificationType::Unknown => None,
        }
    }
}

// Styling values are opaque: null becomes empty, other JSON is kept as its text.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_or_none(deserializer)?.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Option<Value> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

// "8px" and friends are dropped rather than failing the notification.
fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Option<Value> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

// Anything that is not an array counts as "no routes". Non-string entries are skipped.
fn routes_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Option<Value> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(route) => Some(route),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
