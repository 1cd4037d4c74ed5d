#![no_std]

//! Madgwick AHRS - gradient-descent orientation filter for MARG sensors
//!
//! Estimates the orientation of a rigid body as a unit quaternion from
//! gyroscope, accelerometer and magnetometer readings sampled at a fixed rate.
//! Each update integrates the gyroscope and applies one normalized
//! gradient-descent step toward the gravity and magnetic-field directions,
//! which cancels the drift pure integration would accumulate.
//!
//! # Features
//!
//! - Full 9-DOF (MARG) fusion with a single gain parameter, `beta`
//! - Fixed-size `nalgebra` types only, no allocation in the update path
//! - Zero-norm accelerometer or magnetometer readings are skipped
//! - `#![no_std]` compatible for embedded systems
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use madgwick_ahrs::Madgwick;
//!
//! // 256 Hz sample rate, beta = 0.1
//! let mut filter = Madgwick::new(1.0 / 256.0, 0.1);
//!
//! // Sensor readings
//! let gyroscope = Vector3::new(0.01, 0.02, 0.03);   // rad/s
//! let accelerometer = Vector3::new(0.4, 0.8, 9.8);  // m/s², only direction matters
//! let magnetometer = Vector3::new(0.3, 0.1, 0.5);   // any unit
//!
//! filter.update(gyroscope, accelerometer, magnetometer);
//!
//! // Scalar-first [w, x, y, z]
//! let [w, x, y, z] = filter.orientation();
//! assert!((w * w + x * x + y * y + z * z - 1.0).abs() < 1e-9);
//!
//! // Convert to Euler angles (roll, pitch, yaw)
//! let (roll, pitch, yaw) = filter.euler_angles();
//! ```
//!
//! # Diagnostics
//!
//! The crate logs through the [`log`] facade: skipped updates at `trace`
//! level and a vanishing objective gradient at `debug` level.

mod madgwick;
pub mod math;
mod types;

pub use madgwick::Madgwick;
pub use math::{DEG_TO_RAD, QuaternionExt, RAD_TO_DEG, Vector3Ext};
pub use types::*;
