//! Core types shared across Tariff Watch facilities
//!
//! This crate provides the canonical field keys and event names used by
//! the logging macros and by tests that assert on captured log events.

pub mod schema;
