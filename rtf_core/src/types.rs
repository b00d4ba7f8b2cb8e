//! Core domain types for the Reps to Failure progression system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Program styles and duplicate-week handling
//! - Program configuration
//! - Weekly performance observations
//! - Generated weekly log entries and TM adjustment events

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Program Style
// ============================================================================

/// Selects the weekly goal table and the TM adjustment policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramStyle {
    /// 5 sets per week, heavier and lower-rep AMRAP targets
    #[serde(alias = "standard")]
    Standard,
    /// 4 sets per week, higher-rep AMRAP targets
    #[serde(alias = "hypertrophy")]
    Hypertrophy,
}

impl ProgramStyle {
    /// Rounding increment used when the config leaves it unset
    pub fn default_increment_kg(self) -> f64 {
        match self {
            ProgramStyle::Standard => 2.5,
            ProgramStyle::Hypertrophy => 5.0,
        }
    }
}

impl fmt::Display for ProgramStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramStyle::Standard => write!(f, "STANDARD"),
            ProgramStyle::Hypertrophy => write!(f, "HYPERTROPHY"),
        }
    }
}

impl FromStr for ProgramStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(ProgramStyle::Standard),
            "hypertrophy" => Ok(ProgramStyle::Hypertrophy),
            other => Err(Error::Config(format!("Unknown program style: {}", other))),
        }
    }
}

/// How repeated performance entries for one week are resolved
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The entry appearing later in the list is used; a warning is logged
    #[default]
    LastWins,
    /// Any repeated week is a data error
    Reject,
}

// ============================================================================
// Configuration and Input
// ============================================================================

/// Per-invocation program configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressionConfig {
    pub initial_weight: f64,
    pub style: ProgramStyle,
    pub with_deloads: bool,
    #[serde(default)]
    pub rounding_increment_kg: Option<f64>,
    #[serde(default)]
    pub duplicate_weeks: DuplicatePolicy,
}

impl ProgressionConfig {
    /// Config with the style's default rounding and last-wins duplicates
    pub fn new(initial_weight: f64, style: ProgramStyle, with_deloads: bool) -> Self {
        Self {
            initial_weight,
            style,
            with_deloads,
            rounding_increment_kg: None,
            duplicate_weeks: DuplicatePolicy::default(),
        }
    }

    pub fn with_increment(mut self, increment_kg: f64) -> Self {
        self.rounding_increment_kg = Some(increment_kg);
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_weeks = policy;
        self
    }

    /// Effective rounding increment
    pub fn increment_kg(&self) -> f64 {
        self.rounding_increment_kg
            .unwrap_or_else(|| self.style.default_increment_kg())
    }

    /// Number of weeks the program spans
    pub fn total_weeks(&self) -> u32 {
        if self.with_deloads {
            21
        } else {
            18
        }
    }

    /// Reject configs the engine cannot compute with
    pub fn validate(&self) -> Result<()> {
        if !self.initial_weight.is_finite() || self.initial_weight < 0.0 {
            return Err(Error::Config(format!(
                "initial weight must be a finite number >= 0, got {}",
                self.initial_weight
            )));
        }

        let increment = self.increment_kg();
        if !increment.is_finite() || increment <= 0.0 {
            return Err(Error::Config(format!(
                "rounding increment must be a positive number, got {}",
                increment
            )));
        }

        Ok(())
    }
}

/// Reported performance for one program week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserPerformance {
    pub week: u32,
    pub reps_on_last_set: u32,
    #[serde(default)]
    pub sets_completed: u32,
    /// Week-1 TM override, only read by the basic hypertrophy calculator
    #[serde(default)]
    pub weight: Option<f64>,
}

impl UserPerformance {
    pub fn new(week: u32, reps_on_last_set: u32) -> Self {
        Self {
            week,
            reps_on_last_set,
            sets_completed: 0,
            weight: None,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// A training max change, recorded on the week it takes effect
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TmAdjustment {
    pub previous_tm: f64,
    pub new_tm: f64,
    pub percent_change: f64,
}

/// One generated program week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyLog {
    pub week: u32,
    pub goal: String,
    pub weight: f64,
    pub action: String,
    pub sets: u32,
    pub reps: u32,
    pub intensity: f64,
    pub amrap_target: Option<u32>,
    pub is_deload: bool,
    /// TM this week's weight was computed from
    pub training_max: f64,
    pub adjustment: Option<TmAdjustment>,
}
