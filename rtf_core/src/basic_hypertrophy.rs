//! Basic hypertrophy calculator.
//!
//! Differs from the RtF engine only in how week 1 is seeded: a week-1
//! performance entry carrying a `weight` sets the starting TM directly,
//! otherwise `initial_weight` is used. Week generation is the engine's.

use crate::engine::generate_from_seed;
use crate::{Error, ProgramStyle, ProgressionConfig, Result, UserPerformance, WeeklyLog};

/// Starting TM for the basic calculator
///
/// When several week-1 entries carry a weight, the last one wins, matching
/// the engine's default duplicate handling.
pub fn resolve_seed(initial_weight: f64, history: &[UserPerformance]) -> Result<f64> {
    let override_weight = history
        .iter()
        .filter(|p| p.week == 1)
        .filter_map(|p| p.weight)
        .last();

    match override_weight {
        Some(weight) if !weight.is_finite() || weight < 0.0 => Err(Error::Data(format!(
            "week 1 weight override must be a finite number >= 0, got {}",
            weight
        ))),
        Some(weight) => {
            tracing::info!("Seeding TM from week 1 override: {}kg", weight);
            Ok(weight)
        }
        None => Ok(initial_weight),
    }
}

/// Generate a HYPERTROPHY program with 5 kg rounding, honouring the week-1 override
pub fn generate(
    initial_weight: f64,
    with_deloads: bool,
    history: &[UserPerformance],
) -> Result<Vec<WeeklyLog>> {
    let config = ProgressionConfig::new(initial_weight, ProgramStyle::Hypertrophy, with_deloads)
        .with_increment(ProgramStyle::Hypertrophy.default_increment_kg());
    config.validate()?;

    let seed = resolve_seed(initial_weight, history)?;
    generate_from_seed(&config, seed, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_hypertrophy_program;

    fn week_one_override(weight: f64, reps: u32) -> UserPerformance {
        UserPerformance {
            week: 1,
            reps_on_last_set: reps,
            sets_completed: 4,
            weight: Some(weight),
        }
    }

    #[test]
    fn test_override_seeds_week_one() {
        let logs = generate(100.0, true, &[week_one_override(120.0, 12)]).unwrap();
        assert_eq!(logs[0].training_max, 120.0);
        assert_eq!(logs[0].weight, 85.0); // 120 * 0.7 = 84 -> 85
    }

    #[test]
    fn test_no_override_uses_initial_weight() {
        let logs = generate(100.0, true, &[UserPerformance::new(1, 12)]).unwrap();
        assert_eq!(logs[0].training_max, 100.0);
    }

    #[test]
    fn test_rtf_wrapper_ignores_override() {
        let history = vec![week_one_override(120.0, 12)];
        let logs = generate_hypertrophy_program(100.0, true, &history).unwrap();
        assert_eq!(logs[0].training_max, 100.0);
    }

    #[test]
    fn test_override_still_counts_as_performance() {
        let logs = generate(100.0, true, &[week_one_override(120.0, 15)]).unwrap();
        assert_eq!(logs[1].training_max, 121.8);
        assert!(logs[1].action.contains("+1.5%"));
    }

    #[test]
    fn test_negative_override_rejected() {
        let result = generate(100.0, true, &[week_one_override(-10.0, 12)]);
        assert!(matches!(result, Err(Error::Data(_))));
    }

    #[test]
    fn test_later_week_weight_is_ignored() {
        let history = vec![UserPerformance {
            week: 3,
            reps_on_last_set: 10,
            sets_completed: 4,
            weight: Some(200.0),
        }];
        assert_eq!(resolve_seed(90.0, &history).unwrap(), 90.0);
    }
}
