//! Mathematical utilities and nalgebra extensions

use nalgebra::{UnitQuaternion, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Normalize the vector, or `None` if its norm is exactly zero
    ///
    /// Unlike `try_normalize`, there is no epsilon: tiny but non-zero readings
    /// are still scaled to unit length.
    fn normalize_nonzero(&self) -> Option<Vector3<f64>>;

    /// Convert degrees to radians
    fn deg_to_rad(&self) -> Vector3<f64>;

    /// Convert radians to degrees
    fn rad_to_deg(&self) -> Vector3<f64>;
}

impl Vector3Ext for Vector3<f64> {
    fn normalize_nonzero(&self) -> Option<Vector3<f64>> {
        let norm = self.norm();
        if norm == 0.0 { None } else { Some(*self / norm) }
    }

    fn deg_to_rad(&self) -> Vector3<f64> {
        *self * DEG_TO_RAD
    }

    fn rad_to_deg(&self) -> Vector3<f64> {
        *self * RAD_TO_DEG
    }
}

/// Extension trait for UnitQuaternion operations
pub trait QuaternionExt {
    /// Convert quaternion to Euler angles (roll, pitch, yaw) in radians
    fn to_euler(&self) -> Vector3<f64>;

    /// Convert quaternion to Euler angles in degrees
    fn to_euler_degrees(&self) -> Vector3<f64>;

    /// Create quaternion from Euler angles in radians
    fn from_euler(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64>;

    /// Create quaternion from Euler angles in degrees
    fn from_euler_degrees(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64>;
}

impl QuaternionExt for UnitQuaternion<f64> {
    fn to_euler(&self) -> Vector3<f64> {
        let (roll, pitch, yaw) = self.euler_angles();
        Vector3::new(roll, pitch, yaw)
    }

    fn to_euler_degrees(&self) -> Vector3<f64> {
        self.to_euler().rad_to_deg()
    }

    fn from_euler(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64> {
        UnitQuaternion::from_euler_angles(roll, pitch, yaw)
    }

    fn from_euler_degrees(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64> {
        let euler_rad = Vector3::new(roll, pitch, yaw).deg_to_rad();
        Self::from_euler(euler_rad.x, euler_rad.y, euler_rad.z)
    }
}
