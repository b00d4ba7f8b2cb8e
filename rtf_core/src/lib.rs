#![forbid(unsafe_code)]

//! Core domain model and business logic for the Reps to Failure calculator.
//!
//! This crate provides:
//! - Domain types (styles, configs, performance, weekly logs)
//! - Weekly tables and TM adjustment rules
//! - Program generation engine and legacy hypertrophy calculators
//! - TM trend extraction
//! - History import and program export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod tables;
pub mod progression;
pub mod engine;
pub mod basic_hypertrophy;
pub mod trend;
pub mod batch;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use engine::{generate_hypertrophy_program, generate_program};
pub use batch::{generate_many, ProgramRequest};
pub use trend::{parse_action, tm_trend, TmTrendPoint};
pub use export::{load_history, ProgramExport};
