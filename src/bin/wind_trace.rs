use nalgebra::Vector3;
use std::env;

use gustwind::resources::{EntityId, Telemetry, VesselState, WindBasis, WindConfig, WindEngine};

const USAGE: &str = "usage: wind_trace [steps] [dt] [median_speed] [altitude_above_ground] [airspeed] [seed]";

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("invalid argument '{}'\n{}", raw, USAGE)),
        None => Ok(default),
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let steps: usize = parse_arg(&args, 0, 6000)?;
    let dt: f64 = parse_arg(&args, 1, 0.02)?;
    let median_speed: f64 = parse_arg(&args, 2, 8.0)?;
    let altitude_above_ground: f64 = parse_arg(&args, 3, 500.0)?;
    let airspeed: f64 = parse_arg(&args, 4, 60.0)?;
    let seed: u64 = parse_arg(&args, 5, 42)?;

    let config = WindConfig::default()
        .with_median_speed(median_speed)
        .with_seed(seed);
    let mut engine = WindEngine::new(config);

    let basis = WindBasis::default();
    let velocity = basis.to_world(airspeed, 0.0, 0.0);
    let mut telemetry = Telemetry {
        entity: EntityId(0),
        vessel: VesselState {
            altitude: altitude_above_ground,
            altitude_above_ground,
            velocity,
            basis,
            ..VesselState::default()
        },
        submerged: Vec::new(),
    };

    let mut gust_axes: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for step in 0..steps {
        let time = step as f64 * dt;
        telemetry.vessel.time = time;
        // fly north, one degree of latitude is roughly 111 km
        telemetry.vessel.latitude = airspeed * time / 111_000.0;
        engine.tick(Some(&telemetry));

        let mean = engine.mean_wind_world();
        let gust = engine.gust_world();
        let total = engine.total();
        for (axis, values) in gust_axes.iter_mut().enumerate() {
            values.push(gust[axis]);
        }

        let line = serde_json::json!({
            "time": time,
            "mean": [mean.x, mean.y, mean.z],
            "gust": [gust.x, gust.y, gust.z],
            "total": [total.x, total.y, total.z],
            "speed": total.norm(),
            "burst_duration": engine.burst_duration(),
        });
        println!("{}", line);
    }

    let summary = serde_json::json!({
        "seed": engine.master_seed(),
        "gust_std_dev": gust_axes.iter().map(|v| std_dev(v)).collect::<Vec<_>>(),
        "final_mean_speed": Vector3::new(
            engine.mean_wind_world().x,
            engine.mean_wind_world().y,
            engine.mean_wind_world().z
        ).norm(),
    });
    eprintln!("{}", summary);

    Ok(())
}
