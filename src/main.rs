use std::path::PathBuf;

use chrono::Local;
use clap::Parser;
use drag_trajectory::core::ballistics::{DEFAULT_STEP_S, SimulationInput, SolverConfig, Termination};
use drag_trajectory::core::error::Result;
use drag_trajectory::core::forces::force_scale_ceiling;
use drag_trajectory::core::plot::{export_chart, timestamped_file_name};
use drag_trajectory::core::simulation::Simulation;
use drag_trajectory::core::window::Viewport;

#[derive(Parser, Debug)]
#[command(name = "drag-trajectory")]
#[command(version)]
#[command(about = "Projectile range under gravity and quadratic drag", long_about = None)]
struct Cli {
    /// Initial speed (m/s, clamped to 0..=50)
    #[arg(short = 'v', long, default_value_t = 20.0)]
    speed: f64,

    /// Launch angle (degrees)
    #[arg(short = 'a', long, default_value_t = 45.0, allow_negative_numbers = true)]
    angle: f64,

    /// Drag coefficient
    #[arg(short = 'd', long, default_value_t = 0.0, allow_negative_numbers = true)]
    drag: f64,

    /// Gravity (m/s^2, floored at 1)
    #[arg(short = 'g', long, default_value_t = 9.8, allow_negative_numbers = true)]
    gravity: f64,

    /// Integration step (seconds, 0.0001 to 0.1)
    #[arg(long, default_value_t = DEFAULT_STEP_S)]
    dt: f64,

    /// Viewport used for view scaling, as <width>x<height>
    #[arg(long, default_value = "800x600")]
    viewport: Viewport,

    /// Zoom factor applied after autoscaling
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,

    /// Print every Nth sample as a table (0 disables)
    #[arg(long, default_value_t = 0)]
    every: usize,

    /// Write a chart (.svg or .png). Without a value a timestamped PNG is used.
    #[arg(long, num_args = 0..=1, default_missing_value = "")]
    plot: Option<String>,
}

fn run(cli: Cli) -> Result<()> {
    let input = SimulationInput::validated(cli.speed, cli.angle, cli.drag, cli.gravity)?;
    let solver = SolverConfig::with_step(cli.dt)?;

    let mut sim = Simulation::with_solver(input, solver, cli.viewport);
    if cli.zoom != 1.0 && !sim.zoom(cli.zoom) {
        eprintln!("Zoom x{} ignored: view would leave the allowed range.", cli.zoom);
    }

    let trajectory = sim.trajectory();
    let view = sim.view();
    let peak = trajectory.peak();

    println!("Run at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Input: speed {:.2} m/s | angle {:.2} deg | drag {:.4} | g {:.2} m/s^2",
        input.speed_mps, input.angle_deg, input.drag, input.gravity_mps2
    );
    println!("\nTime of flight: {:.4} s", trajectory.flight_time_s());
    println!("Horizontal distance: {:.4} m", trajectory.range_m());
    println!("Peak height: {:.4} m at x = {:.4} m", peak.y, peak.x);
    println!("Samples: {} (dt = {} s)", trajectory.len(), trajectory.step_s());
    if trajectory.termination() == Termination::CeilingReached {
        println!("Stopped at the safety ceiling before landing.");
    }
    println!(
        "Force scale: {:.0} N/kg",
        force_scale_ceiling(trajectory, input.drag, input.gravity_mps2, trajectory.len())
    );

    println!(
        "\nView ({}): max_x {:.2} m, max_y {:.2} m, scale {:.3} x {:.3} px/m, ticks {} / {} m",
        cli.viewport,
        view.max_x,
        view.max_y,
        view.scale_x,
        view.scale_y,
        view.x_tick_interval,
        view.y_tick_interval
    );

    if cli.every > 0 {
        println!(
            "\n{:>8} {:>10} {:>10} {:>10} {:>10}",
            "t (s)", "x (m)", "y (m)", "vx (m/s)", "vy (m/s)"
        );
        for (i, s) in trajectory.decimated(cli.every) {
            println!(
                "{:>8.2} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                trajectory.time_at(i),
                s.x,
                s.y,
                s.vx,
                s.vy
            );
        }
    }

    if let Some(path) = cli.plot {
        let path = if path.is_empty() {
            timestamped_file_name(Local::now())
        } else {
            PathBuf::from(path)
        };
        export_chart(&path, trajectory, input, view, sim.viewport())?;
        println!("\nChart written to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
