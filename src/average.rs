use crate::fmt::debug;
use crate::Thermistor;
use embedded_hal::blocking::delay::DelayMs;

/// Default number of readings averaged per call.
pub const DEFAULT_READINGS_NUMBER: u32 = 10;
/// Default delay between readings (ms).
pub const DEFAULT_DELAY_TIME: u32 = 1;

/// Averages several readings of the wrapped thermistor.
///
/// Each call reads the wrapped thermistor `readings_number` times, waiting
/// `delay_time` milliseconds between readings, and returns the mean of the
/// converted temperatures.
#[derive(Debug)]
pub struct AverageThermistor<T, D> {
    origin: T,
    delay: D,
    readings_number: u32,
    delay_time: u32,
}

impl<T, D> AverageThermistor<T, D> {
    /// Wraps `origin`, using `delay` between readings.
    ///
    /// A `readings_number` or `delay_time` of zero is replaced with
    /// [`DEFAULT_READINGS_NUMBER`] or [`DEFAULT_DELAY_TIME`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ntc_thermistor::{AdcCounts, AverageThermistor, Config, NtcThermistor, Thermistor};
    /// # use embedded_hal_mock::{adc::{Mock, MockChan0, Transaction}, delay::MockNoop};
    /// # let expectations: [Transaction<u16>; 3] = [
    /// #     Transaction::read(0, 400),
    /// #     Transaction::read(0, 500),
    /// #     Transaction::read(0, 600),
    /// # ];
    /// # let adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    /// # let delay = MockNoop::new();
    /// # let config = Config {
    /// #     reference_resistance: 10_000.0,
    /// #     nominal_resistance: 10_000.0,
    /// #     nominal_temperature: 25.0,
    /// #     b_value: 3950.0,
    /// #     adc_resolution: 1000,
    /// # };
    ///
    /// let thermistor = NtcThermistor::new(AdcCounts::new(adc, pin), config);
    /// let mut thermistor = AverageThermistor::new(thermistor, delay, 3, 5);
    ///
    /// let celsius = thermistor.read_celsius().unwrap();
    /// # assert!(celsius > 25.0 && celsius < 26.0);
    /// ```
    pub fn new(origin: T, delay: D, readings_number: u32, delay_time: u32) -> Self {
        Self {
            origin,
            delay,
            readings_number: validate(readings_number, DEFAULT_READINGS_NUMBER),
            delay_time: validate(delay_time, DEFAULT_DELAY_TIME),
        }
    }

    /// Wraps `origin` with the default readings number and delay.
    pub fn with_defaults(origin: T, delay: D) -> Self {
        Self::new(origin, delay, DEFAULT_READINGS_NUMBER, DEFAULT_DELAY_TIME)
    }

    /// Destroys the wrapper and returns the wrapped thermistor and delay.
    pub fn free(self) -> (T, D) {
        (self.origin, self.delay)
    }

    /// Readings taken per call.
    pub fn readings_number(&self) -> u32 {
        self.readings_number
    }

    /// Delay between readings (ms).
    pub fn delay_time(&self) -> u32 {
        self.delay_time
    }
}

impl<T, D> AverageThermistor<T, D>
where
    T: Thermistor,
    D: DelayMs<u32>,
{
    fn average(&mut self, read: fn(&mut T) -> Result<f64, T::Error>) -> Result<f64, T::Error> {
        let mut sum = 0.0;
        for i in 0..self.readings_number {
            if i > 0 {
                self.delay.delay_ms(self.delay_time);
            }
            sum += read(&mut self.origin)?;
        }
        Ok(sum / f64::from(self.readings_number))
    }
}

impl<T, D> Thermistor for AverageThermistor<T, D>
where
    T: Thermistor,
    D: DelayMs<u32>,
{
    type Error = T::Error;

    fn read_celsius(&mut self) -> Result<f64, Self::Error> {
        self.average(T::read_celsius)
    }

    fn read_kelvin(&mut self) -> Result<f64, Self::Error> {
        self.average(T::read_kelvin)
    }

    fn read_fahrenheit(&mut self) -> Result<f64, Self::Error> {
        self.average(T::read_fahrenheit)
    }
}

fn validate(value: u32, alternative: u32) -> u32 {
    if value > 0 {
        value
    } else {
        debug!("invalid averaging parameter 0, using {}", alternative);
        alternative
    }
}
