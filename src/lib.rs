//! SelectionsSaver: workspace-scoped selection bookmarks and a swap slot.
//!
//! The library exposes the core ([`saver::SelectionSaver`]), its storage,
//! host collaborator traits and the command/RPC front ends.

pub mod app;
pub mod commands;
pub mod database;
pub mod host;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod saver;
pub mod services;
pub mod types;
