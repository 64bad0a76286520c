use std::process::ExitCode;

use env_logger::{Env, Target};

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    init_logging();

    let ctx = display::Context::new(cli.output.quiet);

    if ctx.interactive {
        display::print_banner();
    }

    match commands::dispatch(cli, ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format_timestamp(None)
        .init();
}
