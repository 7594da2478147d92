//! Minecraft Pi client API and transports

pub mod api;
pub mod connection;
pub mod names;

pub use api::Minecraft;
pub use connection::{Connection, DEFAULT_PORT};
pub use names::{CONNECTION_NAMES, MINECRAFT_NAMES};
