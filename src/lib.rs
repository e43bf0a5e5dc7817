//! lent-scanner: Orthodox fasting calendar and ingredient checker with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
