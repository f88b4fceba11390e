//! Parse `.cfg` text from stdin and print the commands.
//!
//! Run with: `cargo run --features terminal < autoexec.cfg`
//!
//! Pass `--color` for ANSI-colored output. With the `persist` feature the
//! parser config is read from `quackit.ron` if present, and `exec <name>`
//! loads `<name>.cfg` from the configured exec root.

use std::io;
use std::process::ExitCode;

use quackit::Quackit;
use quackit::terminal::{TerminalConfig, render_commands};

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let config = TerminalConfig::from_args(std::env::args().skip(1));
    #[cfg(not(feature = "persist"))]
    let mut quackit = Quackit::new();

    #[cfg(feature = "persist")]
    let mut quackit = {
        let config = quackit::QuackitConfig::load_or_default(quackit::persist::DEFAULT_CONFIG_FILE);
        Quackit::with_config(config)
    };

    #[cfg(feature = "persist")]
    {
        if let Err(e) = quackit::register_exec(&mut quackit) {
            eprintln!("Failed to register exec: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = quackit.parse_reader(io::stdin().lock()) {
        eprintln!("Failed to parse stdin contents: {}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = render_commands(quackit.parsed_commands(), config, &mut io::stdout().lock()) {
        eprintln!("Failed to write output: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
