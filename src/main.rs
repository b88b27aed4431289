use bevy::app::App;
use bevy::log::{Level, LogPlugin, info};
use clap::Parser;
use driftlab::cli::{self, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.list_integrators {
        cli::handle_list_integrators();
        return ExitCode::SUCCESS;
    }

    // Headless app, used only to install the log subscriber
    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level: if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        },
        ..Default::default()
    });

    let result = cli::load_and_apply_config(&args).and_then(|config| {
        info!(
            "Integrating {} with {} (t_max = {}, h = {}, mass = {})",
            cli::describe_force(&config),
            config.integration.integrator,
            config.integration.t_max,
            config.integration.step_size,
            config.physics.mass
        );
        cli::run(&args, &config)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
