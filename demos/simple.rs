use madgwick_ahrs::Madgwick;
use nalgebra::Vector3;

const SAMPLE_PERIOD: f64 = 1.0 / 256.0; // 256 Hz
const BETA: f64 = 0.1;

fn main() {
    let mut filter = Madgwick::new(SAMPLE_PERIOD, BETA);

    // this call should repeat each time new sensor data is available
    let gyroscope = Vector3::new(0.01, 0.02, 0.03); // replace this with actual gyroscope data in rad/s
    let accelerometer = Vector3::new(0.4, 0.8, 9.8); // replace this with actual accelerometer data
    let magnetometer = Vector3::new(0.3, 0.1, 0.5); // replace this with actual magnetometer data

    filter.update(gyroscope, accelerometer, magnetometer);

    let [w, x, y, z] = filter.orientation();
    println!("Estimated Quaternion: [{w:.9}, {x:.9}, {y:.9}, {z:.9}]");

    let (roll, pitch, yaw) = filter.euler_angles();
    println!(
        "Roll: {:.4}, Pitch: {:.4}, Yaw: {:.4}",
        roll.to_degrees(),
        pitch.to_degrees(),
        yaw.to_degrees()
    );
}
