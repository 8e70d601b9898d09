use crate::Thermistor;

/// Exponentially smooths the readings of the wrapped thermistor.
///
/// Every call blends one fresh reading into the last output for the same
/// scale: `output = (previous * (factor - 1) + input) / factor`. The three
/// scales keep separate histories, all starting at zero, so reading Celsius
/// never moves the Kelvin or Fahrenheit output.
#[derive(Debug)]
pub struct SmoothThermistor<T> {
    origin: T,
    factor: u32,
    celsius: f64,
    kelvin: f64,
    fahrenheit: f64,
}

impl<T> SmoothThermistor<T> {
    /// Wraps `origin`. A `factor` of `0` or `1` disables smoothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use ntc_thermistor::{AdcCounts, Config, NtcThermistor, SmoothThermistor, Thermistor};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// # let expectations: [Transaction<u16>; 2] = [
    /// #     Transaction::read(0, 500),
    /// #     Transaction::read(0, 500),
    /// # ];
    /// # let adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    /// # let config = Config {
    /// #     reference_resistance: 10_000.0,
    /// #     nominal_resistance: 10_000.0,
    /// #     nominal_temperature: 25.0,
    /// #     b_value: 3950.0,
    /// #     adc_resolution: 1000,
    /// # };
    ///
    /// let thermistor = NtcThermistor::new(AdcCounts::new(adc, pin), config);
    /// let mut thermistor = SmoothThermistor::new(thermistor, 5);
    ///
    /// // Output starts at zero and converges on the sensor's 25 °C
    /// let first = thermistor.read_celsius().unwrap();
    /// let second = thermistor.read_celsius().unwrap();
    /// assert!(first < second && second < 25.0);
    /// ```
    pub fn new(origin: T, factor: u32) -> Self {
        Self {
            origin,
            factor,
            celsius: 0.0,
            kelvin: 0.0,
            fahrenheit: 0.0,
        }
    }

    /// Destroys the wrapper and returns the wrapped thermistor.
    pub fn free(self) -> T {
        self.origin
    }

    /// The smoothing factor; `1` or less means no smoothing.
    pub fn factor(&self) -> u32 {
        self.factor
    }

    fn smooth(&self, input: f64, previous: f64) -> f64 {
        if self.factor > 1 {
            let factor = f64::from(self.factor);
            (previous * (factor - 1.0) + input) / factor
        } else {
            input
        }
    }
}

impl<T: Thermistor> Thermistor for SmoothThermistor<T> {
    type Error = T::Error;

    fn read_celsius(&mut self) -> Result<f64, Self::Error> {
        let input = self.origin.read_celsius()?;
        self.celsius = self.smooth(input, self.celsius);
        Ok(self.celsius)
    }

    fn read_kelvin(&mut self) -> Result<f64, Self::Error> {
        let input = self.origin.read_kelvin()?;
        self.kelvin = self.smooth(input, self.kelvin);
        Ok(self.kelvin)
    }

    fn read_fahrenheit(&mut self) -> Result<f64, Self::Error> {
        let input = self.origin.read_fahrenheit()?;
        self.fahrenheit = self.smooth(input, self.fahrenheit);
        Ok(self.fahrenheit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{CountingDelay, FakeThermistor};
    use crate::AverageThermistor;
    use approx::assert_abs_diff_eq;

    #[test]
    fn factor_one_passes_input_through() {
        let source = FakeThermistor::sequence(&[10.0, 30.0, -5.0]);
        let mut thermistor = SmoothThermistor::new(source, 1);

        assert_eq!(thermistor.read_celsius(), Ok(10.0));
        assert_eq!(thermistor.read_celsius(), Ok(30.0));
        assert_eq!(thermistor.read_celsius(), Ok(-5.0));
    }

    #[test]
    fn factor_zero_passes_input_through() {
        let mut thermistor = SmoothThermistor::new(FakeThermistor::constant(42.0), 0);

        assert_eq!(thermistor.read_kelvin(), Ok(42.0));
    }

    #[test]
    fn first_reading_is_blended_with_zero() {
        let mut thermistor = SmoothThermistor::new(FakeThermistor::constant(50.0), 10);

        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 5.0);
    }

    #[test]
    fn readings_converge_on_input() {
        let mut thermistor = SmoothThermistor::new(FakeThermistor::constant(20.0), 2);

        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 10.0);
        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 15.0);
        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 17.5);
    }

    #[test]
    fn scales_keep_separate_history() {
        let mut thermistor = SmoothThermistor::new(FakeThermistor::constant(100.0), 4);

        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 25.0);
        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 43.75);
        assert_abs_diff_eq!(thermistor.read_kelvin().unwrap(), 25.0);
        assert_abs_diff_eq!(thermistor.read_fahrenheit().unwrap(), 25.0);
        assert_abs_diff_eq!(thermistor.read_fahrenheit().unwrap(), 43.75);

        let source = thermistor.free();
        assert_eq!(source.calls, [2, 1, 2]);
    }

    #[test]
    fn error_keeps_history() {
        let mut thermistor = SmoothThermistor::new(FakeThermistor::failing_after(1), 2);

        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 0.0);
        assert!(thermistor.read_celsius().is_err());
        assert_eq!(thermistor.celsius, 0.0);
    }

    #[test]
    fn composes_with_averaging() {
        let source = FakeThermistor::sequence(&[10.0, 30.0]);
        let average = AverageThermistor::new(source, CountingDelay::default(), 2, 1);
        let mut thermistor = SmoothThermistor::new(average, 2);

        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 10.0);

        let (source, delay) = thermistor.free().free();
        assert_eq!(source.calls[0], 2);
        assert_eq!(delay.delays, [1]);
    }

    #[test]
    fn averaging_wraps_smoothing() {
        let smooth = SmoothThermistor::new(FakeThermistor::constant(40.0), 2);
        let mut thermistor = AverageThermistor::new(smooth, CountingDelay::default(), 3, 1);

        // History advances once per averaged reading: 20, 30, 35
        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 85.0 / 3.0);
        // Then 37.5, 38.75, 39.375
        assert_abs_diff_eq!(thermistor.read_celsius().unwrap(), 115.625 / 3.0);

        let (smooth, delay) = thermistor.free();
        assert_eq!(smooth.celsius, 39.375);
        assert_eq!(smooth.free().calls[0], 6);
        assert_eq!(delay.delays, [1, 1, 1, 1]);
    }
}
