mod global;
mod series;

use global::run_global;
use series::run_series;

use anyhow::Result;

use crate::cli::Cli;
use crate::display::Context;

pub fn dispatch(cli: Cli, ctx: Context) -> Result<()> {
    if cli.global.global_lib {
        run_global(cli, ctx)
    } else {
        run_series(cli, ctx)
    }
}
