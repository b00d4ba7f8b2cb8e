//! Training max adjustment rules and weight rounding.
//!
//! The TM moves by a fixed percentage chosen from a step table over the
//! AMRAP rep delta (`actual - target`), one table per style:
//!
//! | delta | STANDARD | HYPERTROPHY |
//! |-------|----------|-------------|
//! | >= +5 | +2%      | +3%         |
//! | +4    | +2%      | +2%         |
//! | +3    | +2%      | +1.5%       |
//! | +2    | +2%      | +1%         |
//! | +1    | 0        | +0.5%       |
//! | 0     | 0        | 0           |
//! | -1    | -2%      | -2%         |
//! | <= -2 | -5%      | -5%         |

use crate::{ProgramStyle, TmAdjustment};

/// Percentage TM change for a rep delta under the given style
pub fn adjustment_percent(style: ProgramStyle, rep_delta: i64) -> f64 {
    match style {
        ProgramStyle::Standard => match rep_delta {
            d if d >= 2 => 2.0,
            0 | 1 => 0.0,
            -1 => -2.0,
            _ => -5.0,
        },
        ProgramStyle::Hypertrophy => match rep_delta {
            d if d >= 5 => 3.0,
            4 => 2.0,
            3 => 1.5,
            2 => 1.0,
            1 => 0.5,
            0 => 0.0,
            -1 => -2.0,
            _ => -5.0,
        },
    }
}

/// Apply the style's rule to an AMRAP result
///
/// Returns `None` when the delta calls for no change.
pub fn adjust_training_max(
    style: ProgramStyle,
    current_tm: f64,
    target_reps: u32,
    actual_reps: u32,
) -> Option<TmAdjustment> {
    let rep_delta = i64::from(actual_reps) - i64::from(target_reps);
    let percent_change = adjustment_percent(style, rep_delta);
    if percent_change == 0.0 {
        tracing::debug!("AMRAP delta {:+}: TM held at {}", rep_delta, current_tm);
        return None;
    }

    let new_tm = round_tm(current_tm * (1.0 + percent_change / 100.0));
    tracing::debug!(
        "AMRAP delta {:+}: TM {} -> {} ({:+.1}%)",
        rep_delta,
        current_tm,
        new_tm,
        percent_change
    );

    Some(TmAdjustment {
        previous_tm: current_tm,
        new_tm,
        percent_change,
    })
}

/// Round a value to the nearest multiple of `increment`
///
/// The result is snapped to 1e-9 so exact multiples like 72.5 do not
/// carry float noise into comparisons or output. Values too large to
/// scale are already integral and are returned as rounded.
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    let rounded = (value / increment).round() * increment;
    snap(rounded, 1e9)
}

/// TMs are kept to 0.01 kg; only working weights are quantized to plates
pub fn round_tm(value: f64) -> f64 {
    snap(value, 100.0)
}

fn snap(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// Shortest plain decimal that reads back as the same value: `100`, `101.5`, `72.25`
pub fn format_kg(value: f64) -> String {
    if value == 0.0 {
        // avoids "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// `TM adjusted from X to Ykg (+Z.Z%)`
pub fn format_adjustment(adjustment: &TmAdjustment) -> String {
    format!(
        "TM adjusted from {} to {}kg ({:+.1}%)",
        format_kg(adjustment.previous_tm),
        format_kg(adjustment.new_tm),
        adjustment.percent_change
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_steps() {
        let s = ProgramStyle::Standard;
        assert_eq!(adjustment_percent(s, 4), 2.0);
        assert_eq!(adjustment_percent(s, 2), 2.0);
        assert_eq!(adjustment_percent(s, 1), 0.0);
        assert_eq!(adjustment_percent(s, 0), 0.0);
        assert_eq!(adjustment_percent(s, -1), -2.0);
        assert_eq!(adjustment_percent(s, -2), -5.0);
        assert_eq!(adjustment_percent(s, -7), -5.0);
    }

    #[test]
    fn test_hypertrophy_policy_steps() {
        let h = ProgramStyle::Hypertrophy;
        assert_eq!(adjustment_percent(h, 1), 0.5);
        assert_eq!(adjustment_percent(h, 3), 1.5);
        assert_eq!(adjustment_percent(h, 4), 2.0);
        assert_eq!(adjustment_percent(h, 9), 3.0);
        assert_eq!(adjustment_percent(h, -1), -2.0);
        assert_eq!(adjustment_percent(h, -3), -5.0);
    }

    #[test]
    fn test_adjust_training_max() {
        let adj = adjust_training_max(ProgramStyle::Standard, 100.0, 10, 14).unwrap();
        assert_eq!(adj.previous_tm, 100.0);
        assert_eq!(adj.new_tm, 102.0);
        assert_eq!(adj.percent_change, 2.0);

        assert!(adjust_training_max(ProgramStyle::Standard, 100.0, 10, 11).is_none());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to_increment(72.1, 2.5), 72.5);
        assert_eq!(round_to_increment(70.0, 5.0), 70.0);
        assert_eq!(round_to_increment(73.5875, 5.0), 75.0);
        assert_eq!(round_to_increment(0.0, 5.0), 0.0);
        let fine = round_to_increment(10.04, 0.1);
        assert!((fine - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounding_huge_values_stays_finite() {
        let weight = round_to_increment(1e300 * 0.7, 2.5);
        assert!(weight.is_finite());
        assert_eq!(round_tm(1e307), 1e307);
        assert!(!format_kg(weight).contains("inf"));
    }

    #[test]
    fn test_format_kg_keeps_fine_increments() {
        assert_eq!(format_kg(102.125), "102.125");
        assert_eq!(format_kg(round_to_increment(10.0037, 0.001)), "10.004");
        assert_eq!(format_kg(-0.0), "0");
    }

    #[test]
    fn test_format_adjustment() {
        let adj = TmAdjustment {
            previous_tm: 120.0,
            new_tm: 114.0,
            percent_change: -5.0,
        };
        assert_eq!(format_adjustment(&adj), "TM adjusted from 120 to 114kg (-5.0%)");

        let adj = TmAdjustment {
            previous_tm: 100.0,
            new_tm: 101.5,
            percent_change: 1.5,
        };
        assert_eq!(format_adjustment(&adj), "TM adjusted from 100 to 101.5kg (+1.5%)");
    }
}
