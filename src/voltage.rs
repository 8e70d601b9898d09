//! Strategies for acquiring one voltage sample from the thermistor's
//! voltage divider.
//!
//! A sample is always expressed in ADC counts, on the `0..=adc_resolution`
//! scale the thermistor equation works with. Boards with trustworthy raw
//! counts use [`AdcCounts`]; boards whose raw counts are uncalibrated but
//! whose millivolt readout is (several ESP32 chips) use [`AdcMillivolts`],
//! which back-calculates the equivalent count.

use core::marker::PhantomData;
use embedded_hal::adc::{Channel, OneShot};

/// Source of voltage samples for an [`NtcThermistor`](crate::NtcThermistor).
pub trait Voltage {
    /// Error raised by the underlying ADC.
    type Error;

    /// Reads one sample, scaled to `0..=adc_resolution` counts.
    fn read_voltage(&mut self, adc_resolution: f64) -> Result<f64, Self::Error>;
}

/// A calibrated ADC readout in millivolts.
///
/// Implement this for HALs that expose the chip's factory calibration
/// only through a millivolt reading.
pub trait MillivoltRead<Pin> {
    /// Error raised by the ADC.
    type Error;

    /// Reads the voltage on `pin` in millivolts.
    fn read_millivolts(&mut self, pin: &mut Pin) -> nb::Result<u16, Self::Error>;
}

/// Raw count strategy: returns the ADC reading unchanged.
#[derive(Debug)]
pub struct AdcCounts<Adc, ADC, Word, Pin> {
    adc: Adc,
    pin: Pin,
    _marker: PhantomData<(ADC, Word)>,
}

impl<Adc, ADC, Word, Pin> AdcCounts<Adc, ADC, Word, Pin> {
    /// Samples `pin` through the one-shot `adc`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ntc_thermistor::AdcCounts;
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// # let expectations: [Transaction<u16>; 0] = [];
    /// # let adc = Mock::new(&expectations);
    ///
    /// let voltage = AdcCounts::new(adc, MockChan0 {});
    /// # let _: AdcCounts<_, _, u16, _> = voltage;
    /// ```
    pub fn new(adc: Adc, pin: Pin) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self {
            adc,
            pin,
            _marker: PhantomData,
        }
    }

    /// Destroys the strategy and returns the ADC and the pin.
    pub fn free(self) -> (Adc, Pin) {
        (self.adc, self.pin)
    }
}

impl<Adc, ADC, Word, Pin> Voltage for AdcCounts<Adc, ADC, Word, Pin>
where
    Adc: OneShot<ADC, Word, Pin>,
    Pin: Channel<ADC>,
    Word: Into<f64>,
{
    type Error = Adc::Error;

    fn read_voltage(&mut self, _adc_resolution: f64) -> Result<f64, Self::Error> {
        let counts = nb::block!(self.adc.read(&mut self.pin))?;
        Ok(counts.into())
    }
}

/// Millivolt strategy: `counts = millivolts / vref_mv * adc_resolution`.
#[derive(Debug)]
pub struct AdcMillivolts<Adc, Pin> {
    adc: Adc,
    pin: Pin,
    vref_mv: u16,
}

impl<Adc, Pin> AdcMillivolts<Adc, Pin> {
    /// Samples `pin` through `adc`, whose full scale corresponds to
    /// `vref_mv` millivolts (typically 3300 on a 3.3 V board).
    pub fn new(adc: Adc, pin: Pin, vref_mv: u16) -> Self {
        Self { adc, pin, vref_mv }
    }

    /// Destroys the strategy and returns the ADC and the pin.
    pub fn free(self) -> (Adc, Pin) {
        (self.adc, self.pin)
    }

    /// The ADC reference voltage (mV).
    pub fn vref_mv(&self) -> u16 {
        self.vref_mv
    }
}

impl<Adc, Pin> Voltage for AdcMillivolts<Adc, Pin>
where
    Adc: MillivoltRead<Pin>,
{
    type Error = Adc::Error;

    fn read_voltage(&mut self, adc_resolution: f64) -> Result<f64, Self::Error> {
        let millivolts = nb::block!(self.adc.read_millivolts(&mut self.pin))?;
        Ok(millivolts_to_counts(millivolts, self.vref_mv, adc_resolution))
    }
}

fn millivolts_to_counts(millivolts: u16, vref_mv: u16, adc_resolution: f64) -> f64 {
    f64::from(millivolts) / f64::from(vref_mv) * adc_resolution
}
