//! Entry point for the `waterpoint` command-line interface.
#![forbid(unsafe_code)]

use waterpoint_cli::{CliError, run};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("waterpoint: {err}");
            std::process::exit(1);
        }
    }
}
