pub mod app;
pub mod common;
pub mod config;
pub mod enums;
pub mod handlers;
pub mod log;
pub mod models;
pub mod websocket;
