//! Damage formula - asymmetric attack-versus-defence resolution

use serde::{Deserialize, Serialize};

/// Floor multiplier: a hopelessly outclassed attacker still chips
pub const MIN_DAMAGE_MULTIPLIER: f64 = 0.1;
/// Cap multiplier: an overwhelming attacker cannot one-shot past 10x
pub const MAX_DAMAGE_MULTIPLIER: f64 = 10.0;

/// Resolve base power against attack and defence. Negative inputs are
/// clamped to zero first.
///
/// A disadvantaged attacker (`attack < defence`) gets
/// `clamp(attack / (defence + 1), 0.1, 10)` with the quotient taken in
/// integer arithmetic, which lands the branch on the 0.1 floor. An attacker
/// at or above the target's defence gets
/// `clamp(log3((attack - defence) + 1), 0.1, 10)`: logarithmic growth, so
/// out-attacking defence pays off with diminishing returns. The result is
/// `floor(base_power * multiplier)`.
pub fn compute_damage(base_power: i32, attack: i32, defence: i32) -> i32 {
    let base_power = base_power.max(0);
    let attack = attack.max(0);
    let defence = defence.max(0);

    let multiplier = if attack < defence {
        (attack / (defence + 1)) as f64
    } else {
        (((attack - defence) + 1) as f64).ln() / 3f64.ln()
    };
    let multiplier = multiplier.clamp(MIN_DAMAGE_MULTIPLIER, MAX_DAMAGE_MULTIPLIER);

    (base_power as f64 * multiplier).floor() as i32
}

/// Monotonic map from held-charge seconds to released projectile power.
///
/// Power grows linearly from `base_power` to `max_power` over
/// `full_charge_time` seconds and saturates there; releasing instantly
/// yields `base_power`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeCurve {
    pub base_power: i32,
    pub max_power: i32,
    pub full_charge_time: f64,
}

impl ChargeCurve {
    /// Power released after holding the charge for `charge_time` seconds.
    pub fn power_at(&self, charge_time: f64) -> i32 {
        let floor = self.base_power.min(self.max_power);
        let ceiling = self.base_power.max(self.max_power);
        if self.full_charge_time <= 0.0 {
            return ceiling;
        }
        let t = (charge_time / self.full_charge_time).clamp(0.0, 1.0);
        let span = (ceiling - floor) as f64;
        floor + (span * t).floor() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disadvantaged_attacker_lands_on_floor() {
        // Linear branch: 50 / 201 is 0 in integer arithmetic, clamped to 0.1
        assert_eq!(compute_damage(100, 50, 200), 10);
        assert_eq!(compute_damage(100, 1, 2), 10);
    }

    #[test]
    fn test_advantaged_attacker_logarithmic() {
        // log3(251) = 5.0295 -> floor(100 * 5.0295) = 502
        assert_eq!(compute_damage(100, 300, 50), 502);
    }

    #[test]
    fn test_equal_attack_and_defence_floors() {
        // log3(1) = 0, clamped up to 0.1
        assert_eq!(compute_damage(100, 50, 50), 10);
    }

    #[test]
    fn test_cap_for_extreme_advantage() {
        // log3(100000) > 10, clamped to the 10x cap
        assert_eq!(compute_damage(100, 100_000, 1), 1000);
    }

    #[test]
    fn test_negative_inputs_clamped() {
        assert_eq!(compute_damage(-50, 10, 10), 0);
        assert_eq!(compute_damage(100, -10, 5), 10);
        // Negative defence clamps to 0: advantaged branch, log3(11) = 2.18
        assert_eq!(compute_damage(100, 10, -5), 218);
    }

    #[test]
    fn test_multiplier_monotonic_in_attack() {
        let mut last = 0;
        for attack in [10, 60, 110, 500, 5000] {
            let damage = compute_damage(100, attack, 50);
            assert!(damage >= last);
            last = damage;
        }
    }

    #[test]
    fn test_charge_curve_endpoints() {
        let curve = ChargeCurve {
            base_power: 10,
            max_power: 50,
            full_charge_time: 2.0,
        };
        assert_eq!(curve.power_at(0.0), 10);
        assert_eq!(curve.power_at(1.0), 30);
        assert_eq!(curve.power_at(2.0), 50);
        // Saturates past full charge
        assert_eq!(curve.power_at(60.0), 50);
        // Negative hold time clamps to instant release
        assert_eq!(curve.power_at(-1.0), 10);
    }

    #[test]
    fn test_charge_curve_monotonic() {
        let curve = ChargeCurve {
            base_power: 5,
            max_power: 40,
            full_charge_time: 1.5,
        };
        let mut last = 0;
        let mut t = 0.0;
        while t <= 2.0 {
            let power = curve.power_at(t);
            assert!(power >= last);
            last = power;
            t += 0.05;
        }
    }

    #[test]
    fn test_charge_curve_degenerate_time() {
        let curve = ChargeCurve {
            base_power: 10,
            max_power: 50,
            full_charge_time: 0.0,
        };
        assert_eq!(curve.power_at(0.0), 50);
    }
}
