//! chat-moderator: concurrent translate-and-score batch moderation with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
