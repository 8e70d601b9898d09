//! Conversions between the Celsius, Kelvin and Fahrenheit scales.

/// Offset between the Kelvin and Celsius scales.
pub const ABSOLUTE_ZERO_CELSIUS: f64 = 273.15;

/// `K = C + 273.15`
pub fn celsius_to_kelvins(celsius: f64) -> f64 {
    celsius + ABSOLUTE_ZERO_CELSIUS
}

/// `C = K - 273.15`
pub fn kelvins_to_celsius(kelvins: f64) -> f64 {
    kelvins - ABSOLUTE_ZERO_CELSIUS
}

/// `F = C * 1.8 + 32`
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

/// Converts through Celsius: `F = (K - 273.15) * 1.8 + 32`.
pub fn kelvins_to_fahrenheit(kelvins: f64) -> f64 {
    celsius_to_fahrenheit(kelvins_to_celsius(kelvins))
}
