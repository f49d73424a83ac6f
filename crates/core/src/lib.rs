//! Core business logic for Salesjournal.
//!
//! This crate turns a monthly point-of-sale report into balanced
//! double-entry journal lines. It has ZERO spreadsheet or UI dependencies:
//! readers hand over a [`source::RawWorkbook`], the engine returns a
//! [`journal::JournalRun`], and writers serialize it.
//!
//! # Modules
//!
//! - `normalize` - Lenient amount, rate and label parsing
//! - `source` - Report sections and their typed rows
//! - `period` - Reporting period detection
//! - `accounts` - Per-client account mapping and resolution
//! - `journal` - Entry generators, balance check and run service
//! - `export` - Journal writers

pub mod accounts;
pub mod export;
pub mod journal;
pub mod normalize;
pub mod period;
pub mod source;
