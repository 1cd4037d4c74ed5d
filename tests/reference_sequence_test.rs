use madgwick_ahrs::Madgwick;
use nalgebra::Vector3;
use serde::Deserialize;
use std::error::Error;

#[derive(Debug, Deserialize)]
struct ReferenceStep {
    gyroscope_x: f64,
    gyroscope_y: f64,
    gyroscope_z: f64,
    accelerometer_x: f64,
    accelerometer_y: f64,
    accelerometer_z: f64,
    magnetometer_x: f64,
    magnetometer_y: f64,
    magnetometer_z: f64,
    quaternion_w: f64,
    quaternion_x: f64,
    quaternion_y: f64,
    quaternion_z: f64,
}

const REFERENCE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/reference_sequence.csv");
const TOLERANCE: f64 = 1e-9;

fn load_reference() -> Result<Vec<ReferenceStep>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(REFERENCE_PATH)?;
    let mut steps = Vec::new();
    for result in reader.deserialize() {
        let record: ReferenceStep = result?;
        steps.push(record);
    }
    Ok(steps)
}

/// Replays a 256 Hz recording (with one zero accelerometer and one zero
/// magnetometer sample) and checks the orientation after every step against
/// independently computed double-precision values.
#[test]
fn test_reference_sequence() -> Result<(), Box<dyn Error>> {
    let steps = load_reference()?;
    assert_eq!(steps.len(), 64);

    let mut filter = Madgwick::new(1.0 / 256.0, 0.1);
    let mut skipped = 0;

    for (i, step) in steps.iter().enumerate() {
        let before = filter.orientation();

        let accelerometer = Vector3::new(step.accelerometer_x, step.accelerometer_y, step.accelerometer_z);
        let magnetometer = Vector3::new(step.magnetometer_x, step.magnetometer_y, step.magnetometer_z);
        filter.update(
            Vector3::new(step.gyroscope_x, step.gyroscope_y, step.gyroscope_z),
            accelerometer,
            magnetometer,
        );

        if accelerometer.norm() == 0.0 || magnetometer.norm() == 0.0 {
            assert_eq!(filter.orientation(), before, "degenerate sample {} changed state", i);
            skipped += 1;
        }

        let expected = [step.quaternion_w, step.quaternion_x, step.quaternion_y, step.quaternion_z];
        for (axis, (actual, expected)) in filter.orientation().iter().zip(expected).enumerate() {
            assert!(
                (actual - expected).abs() < TOLERANCE,
                "step {} component {}: {} != {}",
                i,
                axis,
                actual,
                expected
            );
        }
    }

    assert_eq!(skipped, 2);
    Ok(())
}
