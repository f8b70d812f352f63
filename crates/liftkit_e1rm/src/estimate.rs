//! Epley one-repetition-maximum estimator.

use crate::conf::N_EPLEY_REPS_DIVISOR;
use crate::spec::E1rmError;

/// Estimate a one-rep max from one set.
///
/// A single is returned unchanged. Otherwise `weight * (1 + reps / 30)` is rounded
/// to the nearest integer, halves away from zero.
pub fn estimate_e1rm(reps: u32, weight: f64) -> Result<f64, E1rmError> {
    if reps == 0 || !weight.is_finite() || weight <= 0.0 {
        return Err(E1rmError::InvalidLiftInput { reps, weight });
    }
    if reps == 1 {
        return Ok(weight);
    }
    Ok((weight * (1.0 + f64::from(reps) / N_EPLEY_REPS_DIVISOR)).round())
}

#[cfg(test)]
mod tests {
    use super::estimate_e1rm;
    use crate::spec::E1rmError;

    #[test]
    fn estimate_e1rm_single_is_exact() {
        for weight in [20.0, 62.5, 142.75, 0.5] {
            assert_eq!(estimate_e1rm(1, weight), Ok(weight));
        }
    }

    #[test]
    fn estimate_e1rm_epley_examples() {
        assert_eq!(estimate_e1rm(5, 100.0), Ok(117.0));
        assert_eq!(estimate_e1rm(10, 80.0), Ok(107.0));
        assert_eq!(estimate_e1rm(3, 110.0), Ok(121.0));
    }

    #[test]
    fn estimate_e1rm_rounds_half_away_from_zero() {
        // 15 reps gives an exact factor of 1.5, so these land exactly on a half.
        assert_eq!(estimate_e1rm(15, 35.0), Ok(53.0));
        assert_eq!(estimate_e1rm(15, 25.0), Ok(38.0));
        assert_eq!(estimate_e1rm(15, 100.0), Ok(150.0));
        assert_eq!(estimate_e1rm(3, 75.0), Ok(83.0));
    }

    #[test]
    fn estimate_e1rm_rejects_invalid_input() {
        assert_eq!(
            estimate_e1rm(0, 100.0),
            Err(E1rmError::InvalidLiftInput {
                reps: 0,
                weight: 100.0
            })
        );
        assert!(estimate_e1rm(5, 0.0).is_err());
        assert!(estimate_e1rm(5, -20.0).is_err());
        assert!(estimate_e1rm(5, f64::NAN).is_err());
    }
}
