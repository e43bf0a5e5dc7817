//! Infrastructure adapters. Implement outbound ports.
//!
//! HTTP catalogs, JSON history, terminal UI. Map errors to DomainError.

pub mod catalog;
pub mod persistence;
pub mod recipes;
pub mod ui;
