//! Subcommand implementations

pub mod ask;
pub mod chat;
pub mod classify;
pub mod config;
pub mod doctor;
pub mod examples;
pub mod status;
