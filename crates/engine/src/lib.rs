//! Davokar Engine library.
//!
//! Orchestrates the domain rules against the host: dialogs, the dice roller,
//! notifications and token drawing are all reached through ports.
//!
//! ## Structure
//!
//! - `use_cases/` - Roll, attack, push and wrath flows
//! - `infrastructure/` - Port traits plus in-process adapters and settings

pub mod infrastructure;
pub mod use_cases;
