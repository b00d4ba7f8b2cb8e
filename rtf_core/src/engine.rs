//! Program generation engine.
//!
//! A single forward pass over the style's weekly table:
//! - Each week's weight is `round(TM * intensity)` from the TM entering that week
//! - A reported AMRAP result on a training week adjusts the TM for the next week
//! - Deload weeks hold the TM and ignore reported reps
//!
//! The running TM is local to one call; the engine keeps no state.

use crate::progression::{
    adjust_training_max, format_adjustment, format_kg, round_to_increment,
};
use crate::tables::{layout, WeekPlan};
use crate::{
    DuplicatePolicy, Error, ProgramStyle, ProgressionConfig, Result, TmAdjustment,
    UserPerformance, WeeklyLog,
};
use std::collections::HashMap;

/// Generate the full weekly log for a config and performance history
///
/// History entries are matched by `week` in the numbering selected by
/// `with_deloads`, not by list position. Missing weeks simply mean no
/// adjustment.
pub fn generate_program(
    config: &ProgressionConfig,
    history: &[UserPerformance],
) -> Result<Vec<WeeklyLog>> {
    config.validate()?;
    generate_from_seed(config, config.initial_weight, history)
}

/// Generate starting from an explicit TM, ignoring `config.initial_weight`
pub(crate) fn generate_from_seed(
    config: &ProgressionConfig,
    seed_tm: f64,
    history: &[UserPerformance],
) -> Result<Vec<WeeklyLog>> {
    let increment = config.increment_kg();
    let plans = layout(config.style, config.with_deloads);
    let total_weeks = config.total_weeks();
    debug_assert_eq!(plans.len(), total_weeks as usize);
    let by_week = index_history(history, total_weeks, config.duplicate_weeks)?;

    let mut logs = Vec::with_capacity(plans.len());
    let mut current_tm = seed_tm;
    let mut pending: Option<TmAdjustment> = None;

    for (idx, plan) in plans.iter().enumerate() {
        let week = idx as u32 + 1;
        let weight = round_to_increment(current_tm * plan.intensity, increment);
        let entering = pending.take();

        let goal = build_goal(plan, weight);
        let action = build_action(plan, entering.as_ref(), current_tm);

        if let (Some(target), Some(perf)) = (plan.amrap_target, by_week.get(&week)) {
            pending = adjust_training_max(config.style, current_tm, target, perf.reps_on_last_set);
        } else if plan.is_deload && by_week.contains_key(&week) {
            tracing::debug!("Week {} is a deload; reported reps ignored", week);
        }

        logs.push(WeeklyLog {
            week,
            goal,
            weight,
            action,
            sets: plan.sets,
            reps: plan.reps,
            intensity: plan.intensity,
            amrap_target: plan.amrap_target,
            is_deload: plan.is_deload,
            training_max: current_tm,
            adjustment: entering,
        });

        if let Some(adj) = &pending {
            current_tm = adj.new_tm;
        }
    }

    // An adjustment from the final training week has no week to land on.
    if let Some(adj) = pending {
        tracing::debug!("Final week adjustment to {}kg falls outside the program", adj.new_tm);
    }

    tracing::info!(
        "Generated {} week {} program from TM {}kg ({} performance entries)",
        logs.len(),
        config.style,
        format_kg(seed_tm),
        by_week.len()
    );

    Ok(logs)
}

/// Convenience wrapper fixed to HYPERTROPHY with 5 kg rounding
pub fn generate_hypertrophy_program(
    initial_weight: f64,
    with_deloads: bool,
    history: &[UserPerformance],
) -> Result<Vec<WeeklyLog>> {
    let config = ProgressionConfig::new(initial_weight, ProgramStyle::Hypertrophy, with_deloads)
        .with_increment(ProgramStyle::Hypertrophy.default_increment_kg());
    generate_program(&config, history)
}

/// Index performance by week, enforcing range and the duplicate policy
fn index_history(
    history: &[UserPerformance],
    total_weeks: u32,
    policy: DuplicatePolicy,
) -> Result<HashMap<u32, &UserPerformance>> {
    let mut by_week = HashMap::with_capacity(history.len());

    for perf in history {
        if perf.week == 0 || perf.week > total_weeks {
            return Err(Error::Data(format!(
                "performance week {} is outside the program (1..={})",
                perf.week, total_weeks
            )));
        }

        if let Some(previous) = by_week.insert(perf.week, perf) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(Error::Data(format!(
                        "duplicate performance entries for week {}",
                        perf.week
                    )));
                }
                DuplicatePolicy::LastWins => {
                    tracing::warn!(
                        "Duplicate performance for week {}: using {} reps, discarding {}",
                        perf.week,
                        perf.reps_on_last_set,
                        previous.reps_on_last_set
                    );
                }
            }
        }
    }

    Ok(by_week)
}

fn build_goal(plan: &WeekPlan, weight: f64) -> String {
    match plan.amrap_target {
        Some(target) if !plan.is_deload => format!(
            "{}x{} @ {}kg (last set AMRAP {}+)",
            plan.sets,
            plan.reps,
            format_kg(weight),
            target
        ),
        _ => format!(
            "Deload: {}x{} @ {}kg, no rep targets",
            plan.sets,
            plan.reps,
            format_kg(weight)
        ),
    }
}

fn build_action(plan: &WeekPlan, entering: Option<&TmAdjustment>, current_tm: f64) -> String {
    match (plan.is_deload, entering) {
        (false, None) => "-".to_string(),
        (false, Some(adj)) => format_adjustment(adj),
        (true, None) => format!("Deload week, TM held at {}kg", format_kg(current_tm)),
        (true, Some(adj)) => format!("Deload week, {}", format_adjustment(adj)),
    }
}
