// ABOUTME: Remote entity gateway for the Crewboard backend
// ABOUTME: One function per (entity, operation) pair, returning core types instead of raw rows

pub mod client;
pub mod parts;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod todos;
pub mod users;

pub use client::{Gateway, GatewayError, GatewayResult};
pub use tasks::{HistoryAction, TaskComment};
pub use todos::TodoScope;
