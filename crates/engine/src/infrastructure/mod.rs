//! Infrastructure - Ports and in-process adapters.

pub mod auto_prompt;
pub mod corruption_bar;
pub mod local_roller;
pub mod notifications;
pub mod ports;
pub mod random;
pub mod settings;
