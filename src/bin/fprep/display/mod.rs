mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_fragment_results, print_library_info, print_run_summary};

/// Whether decoration (banner, spinner, tables) is drawn on stderr.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    /// Interactive when stderr is a terminal and `--quiet` was not given.
    pub fn new(quiet: bool) -> Self {
        Self {
            interactive: !quiet && crate::io::stderr_is_tty(),
        }
    }
}
