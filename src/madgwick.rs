//! Madgwick's gradient-descent orientation filter

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::math::{QuaternionExt, Vector3Ext};
use crate::types::{MadgwickSettings, SettingsError};

/// MARG orientation filter
///
/// Integrates the gyroscope and corrects the result with one normalized
/// gradient-descent step per sample, pulling the estimate toward the gravity
/// and magnetic-field directions measured by the accelerometer and
/// magnetometer.
#[derive(Debug, Clone, Copy)]
pub struct Madgwick {
    /// Filter settings, fixed at construction
    settings: MadgwickSettings,
    /// Current orientation quaternion (WXYZ format)
    quaternion: UnitQuaternion<f64>,
}

impl Madgwick {
    /// Create a filter with the given sample period (seconds) and gain
    ///
    /// Neither value is validated; see [`Madgwick::try_with_settings`].
    pub fn new(sample_period: f64, beta: f64) -> Self {
        Self::with_settings(MadgwickSettings { sample_period, beta })
    }

    /// Create a filter from settings, starting at the identity orientation
    pub fn with_settings(settings: MadgwickSettings) -> Self {
        Madgwick {
            settings,
            quaternion: UnitQuaternion::identity(),
        }
    }

    /// Create a filter after checking the settings with [`MadgwickSettings::validate`]
    pub fn try_with_settings(settings: MadgwickSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::with_settings(settings))
    }

    /// Get filter settings
    pub fn settings(&self) -> MadgwickSettings {
        self.settings
    }

    /// Seconds between updates
    pub fn sample_period(&self) -> f64 {
        self.settings.sample_period
    }

    /// Gradient-descent gain
    pub fn beta(&self) -> f64 {
        self.settings.beta
    }

    /// Advance the filter by one sample period
    ///
    /// # Arguments
    /// * `gyroscope` - Angular rate in radians per second
    /// * `accelerometer` - Acceleration in any unit, only the direction is used
    /// * `magnetometer` - Magnetic field in any unit, only the direction is used
    ///
    /// If the accelerometer or magnetometer reading is exactly zero the call
    /// does nothing. A reading that exactly matches the current estimate has a
    /// zero gradient, and normalizing it leaves the orientation non-finite
    /// from then on; [`Madgwick::is_finite`] reports this.
    pub fn update(
        &mut self,
        gyroscope: Vector3<f64>,
        accelerometer: Vector3<f64>,
        magnetometer: Vector3<f64>,
    ) {
        let Some(a) = accelerometer.normalize_nonzero() else {
            log::trace!("skipping update: accelerometer reading has zero norm");
            return;
        };
        let Some(m) = magnetometer.normalize_nonzero() else {
            log::trace!("skipping update: magnetometer reading has zero norm");
            return;
        };

        let gradient = self.objective_gradient(&a, &m);
        if gradient.norm_squared() == 0.0 {
            log::debug!("objective gradient is zero, orientation will become non-finite");
        }
        let step = gradient.normalize();

        // Quaternion derivative: dq/dt = 0.5 * q * ω - β * ∇f / |∇f|
        let omega = Quaternion::from_parts(0.0, gyroscope);
        let rate = self.quaternion.as_ref() * omega * 0.5 - step * self.settings.beta;

        let integrated = self.quaternion.as_ref() + rate * self.settings.sample_period;
        self.quaternion = UnitQuaternion::new_normalize(integrated);
    }

    /// Current orientation as `[w, x, y, z]`
    pub fn orientation(&self) -> [f64; 4] {
        let q = self.quaternion.as_ref();
        [q.w, q.i, q.j, q.k]
    }

    /// Current orientation quaternion
    pub fn quaternion(&self) -> UnitQuaternion<f64> {
        self.quaternion
    }

    /// Current orientation as (roll, pitch, yaw) in radians
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        let euler = self.quaternion.to_euler();
        (euler.x, euler.y, euler.z)
    }

    /// Whether every quaternion component is finite
    ///
    /// Once this is false, no further update can recover the estimate.
    pub fn is_finite(&self) -> bool {
        self.quaternion.coords.iter().all(|c| c.is_finite())
    }

    /// Gradient of the gravity and magnetic-field objective at the current estimate
    ///
    /// `a` and `m` must be unit vectors. The result is returned unnormalized
    /// with `s1` as the scalar part.
    fn objective_gradient(&self, a: &Vector3<f64>, m: &Vector3<f64>) -> Quaternion<f64> {
        let q = self.quaternion.as_ref();
        let (q1, q2, q3, q4) = (q.w, q.i, q.j, q.k);
        let (mx, my, mz) = (m.x, m.y, m.z);

        let two_q1 = 2.0 * q1;
        let two_q2 = 2.0 * q2;
        let two_q3 = 2.0 * q3;
        let two_q4 = 2.0 * q4;
        let two_q1mx = 2.0 * q1 * mx;
        let two_q1my = 2.0 * q1 * my;
        let two_q1mz = 2.0 * q1 * mz;
        let two_q2mx = 2.0 * q2 * mx;

        // Earth-frame direction of the measured field
        let hx = mx * q1 * q1 - two_q1my * q4 + two_q1mz * q3 + mx * q2 * q2 + two_q2 * my * q3
            + two_q2 * mz * q4
            - mx * q3 * q3
            - mx * q4 * q4;
        let hy = two_q1mx * q4 + my * q1 * q1 - two_q1mz * q2 + two_q2mx * q3 - my * q2 * q2
            + my * q3 * q3
            + two_q3 * mz * q4
            - my * q4 * q4;
        // Reference field constrained to the earth x-z plane
        let two_bx = (hx * hx + hy * hy).sqrt();
        let two_bz = 2.0 * mx * (q2 * q4 - q1 * q3)
            + 2.0 * my * (q3 * q4 + q1 * q2)
            + 2.0 * mz * (0.5 - q2 * q2 - q3 * q3);
        let four_bx = 2.0 * two_bx;
        let four_bz = 2.0 * two_bz;

        // Gravity residuals
        let g1 = 2.0 * q2 * q4 - 2.0 * q1 * q3 - a.x;
        let g2 = 2.0 * q1 * q2 + 2.0 * q3 * q4 - a.y;
        let g3 = 1.0 - 2.0 * q2 * q2 - 2.0 * q3 * q3 - a.z;

        // Magnetic field residuals
        let e1 = two_bx * (0.5 - q3 * q3 - q4 * q4) + two_bz * (q2 * q4 - q1 * q3) - mx;
        let e2 = two_bx * (q2 * q3 - q1 * q4) + two_bz * (q1 * q2 + q3 * q4) - my;
        let e3 = two_bx * (q1 * q3 + q2 * q4) + two_bz * (0.5 - q2 * q2 - q3 * q3) - mz;

        let s1 = -two_q3 * g1 + two_q2 * g2 - two_bz * q3 * e1
            + (-two_bx * q4 + two_bz * q2) * e2
            + two_bx * q3 * e3;
        let s2 = two_q4 * g1 + two_q1 * g2 - 4.0 * q2 * g3
            + two_bz * q4 * e1
            + (two_bx * q3 + two_bz * q1) * e2
            + (two_bx * q4 - four_bz * q2) * e3;
        let s3 = -two_q1 * g1 + two_q4 * g2 - 4.0 * q3 * g3
            + (-four_bx * q3 - two_bz * q1) * e1
            + (two_bx * q2 + two_bz * q4) * e2
            + (two_bx * q1 - four_bz * q3) * e3;
        let s4 = two_q2 * g1 + two_q3 * g2
            + (-four_bx * q4 + two_bz * q2) * e1
            + (-two_bx * q1 + two_bz * q3) * e2
            + two_bx * q2 * e3;

        Quaternion::new(s1, s2, s3, s4)
    }
}

impl Default for Madgwick {
    fn default() -> Self {
        Self::with_settings(MadgwickSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_new_madgwick() {
        let filter = Madgwick::new(0.01, 0.2);
        assert_eq!(filter.quaternion(), UnitQuaternion::identity());
        assert_eq!(filter.orientation(), [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(filter.sample_period(), 0.01);
        assert_eq!(filter.beta(), 0.2);
        assert!(filter.is_finite());
    }

    #[test]
    fn test_default_matches_reference_driver() {
        let filter = Madgwick::default();
        assert_eq!(filter.sample_period(), 1.0 / 256.0);
        assert_eq!(filter.beta(), 0.1);
        assert_eq!(filter.quaternion(), UnitQuaternion::identity());
    }

    #[test]
    fn test_single_update_reference_value() {
        let mut filter = Madgwick::new(1.0 / 256.0, 0.1);
        filter.update(
            Vector3::new(0.01, 0.02, 0.03),
            Vector3::new(0.4, 0.8, 9.8),
            Vector3::new(0.3, 0.1, 0.5),
        );

        let expected = [
            0.9999999229639408,
            0.0003880300697979349,
            -3.1045627725160695e-05,
            -5.040779882816852e-05,
        ];
        for (actual, expected) in filter.orientation().iter().zip(expected) {
            assert!(
                (actual - expected).abs() < EPSILON,
                "{actual} != {expected}"
            );
        }
    }

    #[test]
    fn test_gradient_vanishes_at_matching_reading() {
        let filter = Madgwick::default();
        let gradient = filter.objective_gradient(&Vector3::z(), &Vector3::x());
        assert_eq!(gradient.norm_squared(), 0.0);
    }

    #[test]
    fn test_zero_gradient_poisons_state() {
        let mut filter = Madgwick::default();

        // Identity already explains gravity along +Z and a field along +X exactly
        filter.update(Vector3::zeros(), Vector3::z(), Vector3::x());
        assert!(!filter.is_finite());

        filter.update(
            Vector3::new(0.01, 0.02, 0.03),
            Vector3::new(0.4, 0.8, 9.8),
            Vector3::new(0.3, 0.1, 0.5),
        );
        assert!(!filter.is_finite());
        assert!(filter.orientation().iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_degenerate_readings_skip_update() {
        let mut filter = Madgwick::default();
        let gyro = Vector3::new(0.5, -0.2, 0.1);

        filter.update(gyro, Vector3::zeros(), Vector3::new(0.3, 0.1, 0.5));
        assert_eq!(filter.orientation(), [1.0, 0.0, 0.0, 0.0]);

        filter.update(gyro, Vector3::new(0.4, 0.8, 9.8), Vector3::zeros());
        assert_eq!(filter.orientation(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_try_with_settings() {
        let filter = Madgwick::try_with_settings(MadgwickSettings::default());
        assert!(filter.is_ok());

        let result = Madgwick::try_with_settings(MadgwickSettings {
            sample_period: -1.0,
            beta: 0.1,
        });
        assert_eq!(
            result.err(),
            Some(SettingsError::NonPositiveSamplePeriod(-1.0))
        );
    }

    #[test]
    fn test_euler_angles_follow_quaternion() {
        let mut filter = Madgwick::new(0.01, 0.0);

        // Pure yaw rotation at 0.5 rad/s for one second
        for _ in 0..100 {
            filter.update(
                Vector3::new(0.0, 0.0, 0.5),
                Vector3::new(0.1, 0.2, 1.0),
                Vector3::new(0.3, 0.1, 0.5),
            );
        }

        let (roll, pitch, yaw) = filter.euler_angles();
        assert!(roll.abs() < 1e-6);
        assert!(pitch.abs() < 1e-6);
        assert!((yaw - 0.5).abs() < 1e-3, "yaw: {yaw}");
    }
}
