//! Hwbot Core - shared logic for the homework status bot.
//!
//! This crate provides:
//! - The homework-review API client with response validation
//! - The Telegram delivery client
//! - Shared models (status enum, verdict table, wire records)
//! - The error taxonomy the poll loop translates into user messages

pub mod clients;
pub mod errors;
pub mod models;

pub use errors::PollError;
