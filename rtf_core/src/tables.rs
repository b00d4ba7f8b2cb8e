//! Static weekly tables for each program style.
//!
//! Each style is a 21-week layout with deloads at weeks 7, 14 and 21.
//! The 18-week layout is the same table with the deload rows removed.

use crate::ProgramStyle;

/// Fraction of the TM used on every deload week
pub const DELOAD_FRACTION: f64 = 0.6;

/// Prescription for one week of the 21-week layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeekPlan {
    /// Week number in the 21-week layout
    pub week: u32,
    pub sets: u32,
    pub reps: u32,
    /// Fraction of TM
    pub intensity: f64,
    /// Reps the last set is expected to reach; `None` on deloads
    pub amrap_target: Option<u32>,
    pub is_deload: bool,
}

const fn work(week: u32, sets: u32, reps: u32, intensity: f64, target: u32) -> WeekPlan {
    WeekPlan {
        week,
        sets,
        reps,
        intensity,
        amrap_target: Some(target),
        is_deload: false,
    }
}

const fn deload(week: u32) -> WeekPlan {
    WeekPlan {
        week,
        sets: 3,
        reps: 5,
        intensity: DELOAD_FRACTION,
        amrap_target: None,
        is_deload: true,
    }
}

const STANDARD: [WeekPlan; 21] = [
    work(1, 5, 5, 0.700, 10),
    work(2, 5, 5, 0.725, 9),
    work(3, 5, 5, 0.750, 8),
    work(4, 5, 5, 0.725, 9),
    work(5, 5, 5, 0.750, 8),
    work(6, 5, 5, 0.775, 7),
    deload(7),
    work(8, 5, 4, 0.750, 8),
    work(9, 5, 4, 0.775, 7),
    work(10, 5, 4, 0.800, 6),
    work(11, 5, 4, 0.775, 7),
    work(12, 5, 4, 0.800, 6),
    work(13, 5, 4, 0.825, 5),
    deload(14),
    work(15, 5, 3, 0.800, 6),
    work(16, 5, 3, 0.825, 5),
    work(17, 5, 3, 0.850, 4),
    work(18, 5, 3, 0.825, 5),
    work(19, 5, 3, 0.850, 4),
    work(20, 5, 3, 0.875, 3),
    deload(21),
];

const HYPERTROPHY: [WeekPlan; 21] = [
    work(1, 4, 10, 0.700, 12),
    work(2, 4, 10, 0.725, 11),
    work(3, 4, 10, 0.750, 10),
    work(4, 4, 10, 0.725, 11),
    work(5, 4, 10, 0.750, 10),
    work(6, 4, 10, 0.775, 9),
    deload(7),
    work(8, 4, 8, 0.750, 10),
    work(9, 4, 8, 0.775, 9),
    work(10, 4, 8, 0.800, 8),
    work(11, 4, 8, 0.775, 9),
    work(12, 4, 8, 0.800, 8),
    work(13, 4, 8, 0.825, 7),
    deload(14),
    work(15, 4, 6, 0.800, 8),
    work(16, 4, 6, 0.825, 7),
    work(17, 4, 6, 0.850, 6),
    work(18, 4, 6, 0.825, 7),
    work(19, 4, 6, 0.850, 6),
    work(20, 4, 6, 0.875, 5),
    deload(21),
];

/// Full 21-week table for a style
pub fn table(style: ProgramStyle) -> &'static [WeekPlan; 21] {
    match style {
        ProgramStyle::Standard => &STANDARD,
        ProgramStyle::Hypertrophy => &HYPERTROPHY,
    }
}

/// Rows of the program in output order
///
/// Without deloads the deload rows are dropped; callers number the
/// remaining rows 1..=18 by position.
pub fn layout(style: ProgramStyle, with_deloads: bool) -> Vec<WeekPlan> {
    table(style)
        .iter()
        .filter(|plan| with_deloads || !plan.is_deload)
        .copied()
        .collect()
}
