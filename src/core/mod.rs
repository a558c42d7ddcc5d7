//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Result model (match records, file and path lists)
//! - Error types
//! - Rendering functions for different output formats
//! - Common utilities

pub mod error;
pub mod model;
pub mod render;
pub mod util;
