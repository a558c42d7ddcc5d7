//! Parse module - Interprets raw backend output
//!
//! Provides:
//! - context: grep context blocks into match records
//! - files: newline-delimited path lists

pub mod context;
pub mod files;
