//! Backends module - External tool integrations
//!
//! Provides:
//! - backend: the SearchBackend capability and its request/response types
//! - process: grep/find run as child processes
//! - doctor: Dependency checking

pub mod backend;
pub mod doctor;
pub mod process;
