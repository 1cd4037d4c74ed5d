//! Settings and error types for the Madgwick filter

use core::fmt;

/// Madgwick filter settings
///
/// Configuration fixed at construction time. To change either value,
/// construct a new filter.
///
/// # Example
/// ```
/// use madgwick_ahrs::{Madgwick, MadgwickSettings};
///
/// let settings = MadgwickSettings {
///     sample_period: 1.0 / 512.0, // 512 Hz sensor
///     beta: 0.041,                // Madgwick's suggested gain for a low-noise gyroscope
/// };
/// let filter = Madgwick::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MadgwickSettings {
    /// Time between successive `update` calls in seconds
    pub sample_period: f64,
    /// Gradient-descent gain
    ///
    /// Higher values pull the estimate toward the accelerometer/magnetometer
    /// reference faster but pass more of their noise through. Zero disables the
    /// correction entirely and leaves pure gyroscope integration.
    pub beta: f64,
}

impl MadgwickSettings {
    /// Build settings from a sample rate in Hz instead of a period
    ///
    /// # Example
    /// ```
    /// use madgwick_ahrs::MadgwickSettings;
    ///
    /// let settings = MadgwickSettings::from_sample_rate(256.0, 0.1);
    /// assert_eq!(settings, MadgwickSettings::default());
    /// ```
    pub fn from_sample_rate(sample_rate: f64, beta: f64) -> Self {
        Self {
            sample_period: 1.0 / sample_rate,
            beta,
        }
    }

    /// Check that the settings describe a meaningful filter
    ///
    /// The filter itself accepts anything; this is for callers that want to
    /// reject a bad configuration up front.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.sample_period.is_finite() {
            return Err(SettingsError::NonFiniteSamplePeriod);
        }
        if self.sample_period <= 0.0 {
            return Err(SettingsError::NonPositiveSamplePeriod(self.sample_period));
        }
        if !self.beta.is_finite() {
            return Err(SettingsError::NonFiniteBeta);
        }
        if self.beta < 0.0 {
            return Err(SettingsError::NegativeBeta(self.beta));
        }
        Ok(())
    }
}

impl Default for MadgwickSettings {
    fn default() -> Self {
        Self {
            sample_period: 1.0 / 256.0,
            beta: 0.1,
        }
    }
}

/// Reasons [`MadgwickSettings::validate`] rejects a configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsError {
    /// Sample period is NaN or infinite
    NonFiniteSamplePeriod,
    /// Sample period is zero or negative
    NonPositiveSamplePeriod(f64),
    /// Beta is NaN or infinite
    NonFiniteBeta,
    /// Beta is negative
    NegativeBeta(f64),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NonFiniteSamplePeriod => write!(f, "sample period must be finite"),
            SettingsError::NonPositiveSamplePeriod(period) => {
                write!(f, "sample period must be positive, got {period}")
            }
            SettingsError::NonFiniteBeta => write!(f, "beta must be finite"),
            SettingsError::NegativeBeta(beta) => write!(f, "beta must not be negative, got {beta}"),
        }
    }
}

impl core::error::Error for SettingsError {}
