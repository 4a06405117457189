//! Discord surface of the bot: configuration, state, events and commands.

pub mod commands;
pub mod config;
pub mod data;
pub mod embed;
pub mod event_handler;
pub mod inspect;
