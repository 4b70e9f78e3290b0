//! Data models for cards and configuration.

pub mod card;
pub mod config;
