use std::process;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use signal_hook::consts::SIGTERM;
use tracing::{error, info};

use berth::app;
use berth::config::{Args, Config};
use berth::docker::DockerClient;
use berth::error::ConsoleError;
use berth::logging;

fn main() {
    let config = Config::from(Args::parse());

    let guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("berth: {}", e);
            process::exit(1);
        }
    };

    let code = match run(config) {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "exiting");
            eprintln!("berth: {}", e);
            1
        }
    };
    // Flush buffered log lines before exiting.
    drop(guard);
    process::exit(code);
}

fn run(config: Config) -> Result<(), ConsoleError> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .build()
        .map_err(ConsoleError::Runtime)?;

    let client = rt.block_on(DockerClient::connect(&config.gateway))?;
    info!("connected to container runtime");

    let should_quit = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&should_quit))?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        app::restore_terminal();
        default_hook(info);
    }));

    app::run(&config, Arc::new(client), rt.handle().clone(), should_quit)
}
