#![allow(dead_code)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

mod config;
mod constants;
mod coupled;
mod devs;
mod io;
mod logger;
mod messages;
mod models;
mod util;

use std::path::Path;
use std::{env, process};

use crate::coupled::landing::Landing;
use crate::devs::runner::Runner;
use crate::io::script::read_script;

/// Results directory for the file-driven simulation, fixed at build time.
const RESULTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/simulation_results");

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let args: Vec<String> = env::args().collect();

    let config = config::load().unwrap_or_else(|err| {
        error!("Could not load configuration: {err}");
        process::exit(1);
    });

    if args.iter().any(|arg| arg == "--realtime") {
        if let Err(err) = io::realtime::run(config).await {
            error!("Real-time host failed to start: {err}");
            process::exit(1);
        }
        return;
    }

    let Some(input_path) = args.get(1) else {
        println!("The program should be invoked as follows");
        println!("{} path/to/input/file [--realtime]", args[0]);
        process::exit(1);
    };
    let input_path = Path::new(input_path);
    if !input_path.exists() {
        println!("The input file does not exist");
        process::exit(1);
    }

    let schedule = read_script(input_path).unwrap_or_else(|err| {
        error!("Could not read input script: {err}");
        process::exit(1);
    });

    let landing = Landing::new(config.landing_timers());
    let mut runner = Runner::with_sinks(landing, schedule, Path::new(RESULTS_DIR))
        .unwrap_or_else(|err| {
            error!("Could not open result sinks: {err}");
            process::exit(1);
        });
    runner.run_until_passivate();
    info!("Results written to {RESULTS_DIR}");
}
