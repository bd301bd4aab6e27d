//! Run a wheel-odometry validation pass against the mock differential
//! drive plant and report the pose-error metrics.
//!
//! ```bash
//! # With defaults (Pioneer P3DX-like base, 20 s scripted drive)
//! cargo run --release
//!
//! # With a custom config file
//! cargo run --release -- --config gati-odom.toml
//!
//! # Shorter run with wheel slip, verbose logging
//! RUST_LOG=debug cargo run --release -- --duration 5 --slip 0.02
//! ```

use clap::Parser;

use gati_odom::sources::ParameterSource;
use gati_odom::{AppConfig, Error, KinematicParams, MockSim, Result, SampleLoop};

/// Wheel-odometry validation harness
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML); built-in defaults when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Override the simulated run duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Override the wheel slip noise std-dev
    #[arg(long)]
    slip: Option<f64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(duration) = args.duration {
        config.run.duration = duration;
    }
    if let Some(slip) = args.slip {
        config.drive.slip_stddev = slip;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.clone()),
    )
    .init();

    log::info!(
        "gati-odom starting: mode={:?}, duration={:.1}s, slip={}",
        config.run.mode,
        config.run.duration,
        config.drive.slip_stddev
    );

    let mut sim = MockSim::new(config.mock_sim_config());

    // Ctrl-C flips the plant to Stopped; the loop observes it at the top
    // of the next tick.
    let stop = sim.stop_handle();
    ctrlc::set_handler(move || {
        log::info!("received shutdown signal");
        stop.store(true, std::sync::atomic::Ordering::Relaxed);
    })
    .map_err(|e| Error::Source(format!("failed to set Ctrl-C handler: {}", e)))?;

    // Kinematic parameters come from the source, as they would from a
    // live scene.
    let params = KinematicParams::new(sim.wheel_radius()?, sim.half_track()?)?;
    log::info!(
        "parameters: R={:.4}m, L_half={:.4}m, dt(scene)={:.4}s",
        params.wheel_radius,
        params.half_track,
        sim.reference_time_step()?
    );

    let mut run = SampleLoop::new(params, config.runner_config());
    let result = run.run(&mut sim);
    if let Err(e) = &result {
        log::error!("run aborted: {}", e);
    }

    report(&run);
    result
}

/// Console report over the finished (or aborted) run.
fn report(run: &SampleLoop) {
    let Some(last) = run.history().last() else {
        log::warn!("no samples recorded; nothing to report");
        return;
    };

    println!(
        "run complete: {} samples over {:.2} s",
        run.history().len(),
        last.t
    );
    println!(
        "  final odometry:     x={:+.4} m  y={:+.4} m  heading={:+.2}°",
        last.odometry.x,
        last.odometry.y,
        last.odometry.theta.to_degrees()
    );
    println!(
        "  final ground truth: x={:+.4} m  y={:+.4} m  heading={:+.2}°",
        last.ground_truth.x,
        last.ground_truth.y,
        last.ground_truth.theta.to_degrees()
    );

    match run.summary() {
        Ok(summary) => {
            println!("  rmse position:      {:.4} m", summary.rmse_position);
            println!(
                "  max |heading err|:  {:.2}°",
                summary.max_heading_error_deg
            );
        }
        Err(e) => log::warn!("no summary: {}", e),
    }
}
