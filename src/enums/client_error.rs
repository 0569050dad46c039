use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Missing Droplert ID")]
    MissingDroplertId,

    #[error("Socket error: {0}")]
    Transport(#[from] tungstenite::Error),

    #[error("Parse error: {0}")]
    ProtocolParse(#[from] serde_json::Error),
}
