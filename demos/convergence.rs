//! Convergence demonstration
//!
//! Simulates a stationary sensor held at a fixed tilt and heading, and plots
//! how quickly the filter's roll, pitch and yaw settle for several values of
//! beta. The output is written to `convergence.png`.
//!
//! Run with: `cargo run --example convergence`

use madgwick_ahrs::{Madgwick, QuaternionExt};
use nalgebra::{UnitQuaternion, Vector3};
use plotters::prelude::*;
use std::error::Error;

const SAMPLE_RATE: f64 = 256.0; // Hz
const DURATION: f64 = 6.0; // seconds
const BETAS: [f64; 3] = [0.05, 0.1, 0.5];

// Sensor pose in degrees
const ROLL: f64 = 25.0;
const PITCH: f64 = -15.0;
const YAW: f64 = 40.0;

struct Trace {
    beta: f64,
    time: Vec<f64>,
    euler: Vec<Vector3<f64>>,
}

fn simulate(beta: f64, truth: UnitQuaternion<f64>) -> Trace {
    // Gravity and a northern-hemisphere field as seen by the rotated sensor
    let accelerometer = truth.inverse() * Vector3::new(0.0, 0.0, 9.81);
    let magnetometer = truth.inverse() * Vector3::new(20.0, 0.0, -45.0);

    let mut filter = Madgwick::new(1.0 / SAMPLE_RATE, beta);
    let samples = (DURATION * SAMPLE_RATE) as usize;
    let mut time = Vec::with_capacity(samples);
    let mut euler = Vec::with_capacity(samples);

    for i in 0..samples {
        // A slowly decaying gyroscope bias keeps the first update off the zero-gradient point
        let gyroscope = Vector3::new(0.02, -0.01, 0.015) * (-(i as f64) / SAMPLE_RATE).exp();
        filter.update(gyroscope, accelerometer, magnetometer);

        time.push(i as f64 / SAMPLE_RATE);
        euler.push(filter.quaternion().to_euler_degrees());
    }

    Trace { beta, time, euler }
}

fn main() -> Result<(), Box<dyn Error>> {
    let truth = UnitQuaternion::from_euler_degrees(ROLL, PITCH, YAW);
    let traces: Vec<Trace> = BETAS.iter().map(|&beta| simulate(beta, truth)).collect();

    for trace in &traces {
        let last = trace.euler.last().copied().unwrap_or_else(Vector3::zeros);
        println!(
            "beta {:.2}: roll {:7.3}, pitch {:7.3}, yaw {:7.3} after {:.1} s",
            trace.beta, last.x, last.y, last.z, DURATION
        );
    }

    let root = BitMapBackend::new("convergence.png", (1000, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((3, 1));

    let panels = [("Roll", ROLL, 0), ("Pitch", PITCH, 1), ("Yaw", YAW, 2)];
    for (area, (name, target, axis)) in areas.iter().zip(panels) {
        plot_axis(area, &traces, name, target, axis)?;
    }

    root.present()?;
    println!("Plot written to convergence.png");
    Ok(())
}

fn plot_axis(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    traces: &[Trace],
    name: &str,
    target: f64,
    axis: usize,
) -> Result<(), Box<dyn Error>> {
    let low = target.min(0.0) - 10.0;
    let high = target.max(0.0) + 10.0;

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{name} (target {target:.0}°)"), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..DURATION, low..high)?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Degrees")
        .draw()?;

    chart.draw_series(LineSeries::new(
        [(0.0, target), (DURATION, target)],
        BLACK.mix(0.4),
    ))?;

    let colors = [RED, GREEN, BLUE];
    for (trace, color) in traces.iter().zip(colors) {
        chart
            .draw_series(LineSeries::new(
                trace.time.iter().zip(&trace.euler).map(|(&t, e)| (t, e[axis])),
                color,
            ))?
            .label(format!("beta = {}", trace.beta))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
