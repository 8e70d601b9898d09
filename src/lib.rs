#![cfg_attr(not(test), no_std)]

//! Temperature readings from an NTC thermistor wired as a voltage divider
//! to an `embedded-hal` ADC.
//!
//! [`NtcThermistor`] converts each ADC sample into a resistance and then
//! into a temperature with the Beta equation. [`AverageThermistor`] and
//! [`SmoothThermistor`] wrap any [`Thermistor`] to reduce noise, and can be
//! stacked in either order.
//!
//! ```
//! use ntc_thermistor::{
//!     AdcCounts, AverageThermistor, Config, NtcThermistor, SmoothThermistor, Thermistor,
//! };
//! # use embedded_hal_mock::{adc::{Mock, MockChan0, Transaction}, delay::MockNoop};
//! # let expectations = vec![Transaction::read(0, 511u16); 10];
//! # let adc = Mock::new(&expectations);
//! # let pin = MockChan0 {};
//! # let delay = MockNoop::new();
//!
//! let config = Config {
//!     reference_resistance: 10_000.0,
//!     nominal_resistance: 10_000.0,
//!     nominal_temperature: 25.0,
//!     b_value: 3950.0,
//!     adc_resolution: 1023,
//! };
//!
//! let thermistor = NtcThermistor::new(AdcCounts::new(adc, pin), config);
//! let thermistor = AverageThermistor::new(thermistor, delay, 5, 10);
//! let mut thermistor = SmoothThermistor::new(thermistor, 1);
//!
//! let celsius = thermistor.read_celsius().unwrap();
//! let fahrenheit = thermistor.read_fahrenheit().unwrap();
//! # assert!((celsius - 25.0).abs() < 0.1);
//! # assert!((fahrenheit - 77.0).abs() < 0.1);
//! ```

mod fmt;

mod average;
pub mod convert;
mod ntc;
mod smooth;
mod voltage;

pub use average::{AverageThermistor, DEFAULT_DELAY_TIME, DEFAULT_READINGS_NUMBER};
pub use ntc::{
    Config, NtcThermistor, ARDUINO_ADC_RESOLUTION, DEFAULT_ADC_RESOLUTION, ESP32_ADC_RESOLUTION,
};
pub use smooth::SmoothThermistor;
pub use voltage::{AdcCounts, AdcMillivolts, MillivoltRead, Voltage};

/// A sensor that reads temperatures in Celsius, Kelvin and Fahrenheit.
///
/// Every read takes a fresh measurement; out-of-range samples come back as
/// non-finite or physically impossible values rather than errors. `Error`
/// is reserved for failures of the underlying hardware.
pub trait Thermistor {
    type Error;

    /// Reads the temperature in degrees Celsius.
    fn read_celsius(&mut self) -> Result<f64, Self::Error>;

    /// Reads the temperature in Kelvin.
    fn read_kelvin(&mut self) -> Result<f64, Self::Error>;

    /// Reads the temperature in degrees Fahrenheit.
    fn read_fahrenheit(&mut self) -> Result<f64, Self::Error>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::Thermistor;
    use embedded_hal::blocking::delay::DelayMs;

    #[derive(Debug, PartialEq)]
    pub(crate) struct FakeError;

    /// Replays `values` in a loop, whatever the scale, and counts calls per
    /// scale as `[celsius, kelvin, fahrenheit]`.
    pub(crate) struct FakeThermistor {
        values: Vec<f64>,
        next: usize,
        fail_after: Option<usize>,
        pub(crate) calls: [u32; 3],
    }

    impl FakeThermistor {
        pub(crate) fn sequence(values: &[f64]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
                fail_after: None,
                calls: [0; 3],
            }
        }

        pub(crate) fn constant(value: f64) -> Self {
            Self::sequence(&[value])
        }

        /// Reads `0.0` for the first `readings` calls, then fails.
        pub(crate) fn failing_after(readings: usize) -> Self {
            Self {
                fail_after: Some(readings),
                ..Self::constant(0.0)
            }
        }

        fn read(&mut self, scale: usize) -> Result<f64, FakeError> {
            self.calls[scale] += 1;
            if self.fail_after.map_or(false, |n| self.next >= n) {
                return Err(FakeError);
            }
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            Ok(value)
        }
    }

    impl Thermistor for FakeThermistor {
        type Error = FakeError;

        fn read_celsius(&mut self) -> Result<f64, FakeError> {
            self.read(0)
        }

        fn read_kelvin(&mut self) -> Result<f64, FakeError> {
            self.read(1)
        }

        fn read_fahrenheit(&mut self) -> Result<f64, FakeError> {
            self.read(2)
        }
    }

    /// Records every requested delay instead of sleeping.
    #[derive(Default)]
    pub(crate) struct CountingDelay {
        pub(crate) delays: Vec<u32>,
    }

    impl DelayMs<u32> for CountingDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.delays.push(ms);
        }
    }
}
