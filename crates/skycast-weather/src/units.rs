//! Temperature and wind-speed conversion.
//!
//! Values stay unrounded inside the pipeline; rounding happens only where a
//! number is shown.

use crate::types::UnitSystem;

const MPH_PER_METER_PER_SECOND: f64 = 2.23694;

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Nearest whole number, with halves going toward positive infinity
/// (`-2.5` becomes `-2`, `2.5` becomes `3`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Wind speed in whole miles per hour
pub fn meters_per_second_to_mph(mps: f64) -> f64 {
    round_half_up(mps * MPH_PER_METER_PER_SECOND)
}

impl UnitSystem {
    /// Convert a Celsius reading into this unit system (unrounded)
    pub fn display_temperature(&self, celsius: f64) -> f64 {
        match self {
            Self::Metric => celsius,
            Self::Imperial => celsius_to_fahrenheit(celsius),
        }
    }

    /// Temperature in whole degrees of this unit system
    pub fn whole_degrees(&self, celsius: f64) -> i32 {
        round_half_up(self.display_temperature(celsius)) as i32
    }

    /// Convert a m/s reading into this unit system
    pub fn display_wind(&self, mps: f64) -> f64 {
        match self {
            Self::Metric => mps,
            Self::Imperial => meters_per_second_to_mph(mps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_known_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for x in [-273.15, -40.0, -12.345, 0.0, 0.1, 17.77, 36.6, 1e6] {
            let back = fahrenheit_to_celsius(celsius_to_fahrenheit(x));
            assert!((back - x).abs() < EPSILON * x.abs().max(1.0), "{} -> {}", x, back);
        }
    }

    #[test]
    fn test_wind_rounds_to_whole_mph() {
        assert_eq!(meters_per_second_to_mph(0.0), 0.0);
        assert_eq!(meters_per_second_to_mph(1.0), 2.0);
        assert_eq!(meters_per_second_to_mph(4.47), 10.0);
    }

    #[test]
    fn test_display_conversion_is_unrounded() {
        assert_eq!(UnitSystem::Metric.display_temperature(21.4), 21.4);
        let f = UnitSystem::Imperial.display_temperature(21.4);
        assert!((f - 70.52).abs() < 1e-9);
    }

    #[test]
    fn test_halves_round_toward_positive_infinity() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-0.51), -1.0);
        assert_eq!(round_half_up(-3.4), -3.0);
    }

    #[test]
    fn test_whole_degrees() {
        assert_eq!(UnitSystem::Metric.whole_degrees(-2.5), -2);
        assert_eq!(UnitSystem::Metric.whole_degrees(-0.5), 0);
        // -19.75 °C is -3.55 °F
        assert_eq!(UnitSystem::Imperial.whole_degrees(-19.75), -4);
    }

    #[test]
    fn test_display_wind() {
        assert_eq!(UnitSystem::Metric.display_wind(3.6), 3.6);
        assert_eq!(UnitSystem::Imperial.display_wind(3.6), 8.0);
    }
}
