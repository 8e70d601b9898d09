use crate::convert::{celsius_to_kelvins, kelvins_to_celsius, kelvins_to_fahrenheit};
use crate::fmt::{debug, trace};
use crate::voltage::Voltage;
use crate::Thermistor;

/// ADC full scale of 10-bit Arduino boards.
pub const ARDUINO_ADC_RESOLUTION: u32 = 1023;
/// ADC full scale of 12-bit ESP32 boards.
pub const ESP32_ADC_RESOLUTION: u32 = 4095;
/// ADC full scale used by [`Config::new`].
pub const DEFAULT_ADC_RESOLUTION: u32 = ARDUINO_ADC_RESOLUTION;

/// Configuration for an `NtcThermistor`.
///
/// - `reference_resistance`: The resistor in series with the thermistor (Ω)
/// - `nominal_resistance`: The thermistor's resistance at `nominal_temperature` (Ω)
/// - `nominal_temperature`: The temperature the nominal resistance is rated at (°C)
/// - `b_value`: The B (beta) coefficient of the thermistor material
/// - `adc_resolution`: The largest value the ADC reports (eg. `1023` for 10 bits)
///
/// # Examples
///
/// ```
/// use ntc_thermistor::{Config, ESP32_ADC_RESOLUTION};
///
/// // NTC 3950 100K with an 8K reference resistor on an ESP32
/// let config = Config {
///     reference_resistance: 8_000.0,
///     nominal_resistance: 100_000.0,
///     nominal_temperature: 25.0,
///     b_value: 3950.0,
///     adc_resolution: ESP32_ADC_RESOLUTION,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub reference_resistance: f64,
    pub nominal_resistance: f64,
    pub nominal_temperature: f64,
    pub b_value: f64,
    pub adc_resolution: u32,
}

impl Config {
    /// Returns a configuration for a board with the default
    /// [`DEFAULT_ADC_RESOLUTION`] (10-bit Arduino) full scale.
    ///
    /// # Examples
    ///
    /// ```
    /// use ntc_thermistor::{Config, DEFAULT_ADC_RESOLUTION, ESP32_ADC_RESOLUTION};
    ///
    /// let config = Config::new(8_000.0, 100_000.0, 25.0, 3950.0);
    /// assert_eq!(config.adc_resolution, DEFAULT_ADC_RESOLUTION);
    ///
    /// let config = config.with_adc_resolution(ESP32_ADC_RESOLUTION);
    /// assert_eq!(config.adc_resolution, 4095);
    /// ```
    pub fn new(
        reference_resistance: f64,
        nominal_resistance: f64,
        nominal_temperature: f64,
        b_value: f64,
    ) -> Self {
        Self {
            reference_resistance,
            nominal_resistance,
            nominal_temperature,
            b_value,
            adc_resolution: DEFAULT_ADC_RESOLUTION,
        }
    }

    /// Replaces the ADC full scale.
    pub fn with_adc_resolution(self, adc_resolution: u32) -> Self {
        Self {
            adc_resolution,
            ..self
        }
    }
}

/// Reads an NTC thermistor through a voltage divider, converting each
/// sample with the Beta equation.
#[derive(Debug)]
pub struct NtcThermistor<V> {
    voltage: V,
    config: Config,
    nominal_kelvins: f64,
    adc_resolution: f64,
}

impl<V> NtcThermistor<V> {
    /// Returns a thermistor sampling through `voltage`.
    ///
    /// An `adc_resolution` of zero is replaced with `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ntc_thermistor::{AdcCounts, Config, NtcThermistor, Thermistor};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// # let expectations: [Transaction<u16>; 1] = [Transaction::read(0, 500)];
    /// # let adc = Mock::new(&expectations);
    /// # let pin = MockChan0 {};
    ///
    /// let config = Config {
    ///     reference_resistance: 10_000.0,
    ///     nominal_resistance: 10_000.0,
    ///     nominal_temperature: 25.0,
    ///     b_value: 3950.0,
    ///     adc_resolution: 1000,
    /// };
    ///
    /// let mut thermistor = NtcThermistor::new(AdcCounts::new(adc, pin), config);
    ///
    /// // Half of full scale: the thermistor is at its nominal resistance
    /// let celsius = thermistor.read_celsius().unwrap();
    /// assert!((celsius - 25.0).abs() < 1e-9);
    /// ```
    pub fn new(voltage: V, mut config: Config) -> Self {
        config.adc_resolution = validate_resolution(config.adc_resolution);

        Self {
            voltage,
            nominal_kelvins: celsius_to_kelvins(config.nominal_temperature),
            adc_resolution: f64::from(config.adc_resolution),
            config,
        }
    }

    /// Destroys the thermistor and returns the voltage strategy.
    pub fn free(self) -> V {
        self.voltage
    }

    /// The configuration in use, with `adc_resolution` already validated.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The nominal temperature in Kelvin, as used by the Beta equation.
    pub fn nominal_kelvins(&self) -> f64 {
        self.nominal_kelvins
    }

    /// `1/K = 1/K0 + ln(R/R0)/B`
    fn resistance_to_kelvins(&self, resistance: f64) -> f64 {
        let inverse_kelvins = 1.0 / self.nominal_kelvins
            + libm::log(resistance / self.config.nominal_resistance) / self.config.b_value;
        1.0 / inverse_kelvins
    }
}

impl<V: Voltage> NtcThermistor<V> {
    /// Samples the divider once and returns the thermistor's resistance:
    /// `R = Rref / (ADC / sample - 1)`.
    ///
    /// A sample at full scale gives an infinite resistance; a sample above
    /// it gives a negative one.
    pub fn read_resistance(&mut self) -> Result<f64, V::Error> {
        let sample = self.voltage.read_voltage(self.adc_resolution)?;
        let resistance = self.config.reference_resistance / (self.adc_resolution / sample - 1.0);
        trace!("sample={} resistance={}", sample, resistance);
        Ok(resistance)
    }
}

impl<V: Voltage> Thermistor for NtcThermistor<V> {
    type Error = V::Error;

    fn read_celsius(&mut self) -> Result<f64, Self::Error> {
        self.read_kelvin().map(kelvins_to_celsius)
    }

    fn read_kelvin(&mut self) -> Result<f64, Self::Error> {
        let resistance = self.read_resistance()?;
        Ok(self.resistance_to_kelvins(resistance))
    }

    fn read_fahrenheit(&mut self) -> Result<f64, Self::Error> {
        self.read_kelvin().map(kelvins_to_fahrenheit)
    }
}

fn validate_resolution(adc_resolution: u32) -> u32 {
    if adc_resolution == 0 {
        debug!("adc_resolution 0 clamped to 1");
        1
    } else {
        adc_resolution
    }
}
