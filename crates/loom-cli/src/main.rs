// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Loom CLI - builds the bundled kernels and prints their IR.

mod demos;
mod output;

use clap::{Parser, Subcommand};
use loom_emit::EmitError;
use std::process;
use tracing_subscriber::EnvFilter;

/// Emit affine IR from symbolic kernels
#[derive(Parser, Debug)]
#[command(name = "loom")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log every binding and emitted op to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the bundled demo kernels
    List,

    /// Emit a demo kernel and print its IR
    Emit {
        /// Demo name, see `loom list`
        demo: String,
    },
}

fn main() {
    let cli = Cli::parse();
    output::init(cli.no_color);
    init_logging(cli.verbose);

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Emit { ref demo } => cmd_emit(demo),
    }
}

/// `LOOM_LOG` takes a tracing filter; `--verbose` forces `debug`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("LOOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_list() {
    println!("{}", output::section_header("Demos:"));
    for demo in demos::DEMOS {
        println!("  {:<10} {}", output::demo_name(demo.name), demo.about);
    }
}

fn cmd_emit(name: &str) {
    let Some(demo) = demos::find(name) else {
        eprintln!("{}: unknown demo `{}`", output::error_label(), name);
        eprintln!(
            "  {}: {}",
            output::hint_label(),
            output::hint_text("run `loom list` to see the available demos")
        );
        process::exit(2);
    };

    match demo.build() {
        Ok(function) => {
            for line in function.to_string().lines() {
                println!("{}", output::ir_line(line));
            }
            eprintln!("{}", output::banner_ok("Emit"));
        }
        Err(err) => {
            show_error(&err);
            eprintln!("{}", output::banner_fail("Emit"));
            process::exit(1);
        }
    }
}

fn show_error(err: &EmitError) {
    eprintln!("{}: {}", output::error_label(), err);
    let hint = if err.is_fatal() {
        "the symbolic program is inconsistent; the partial IR was discarded"
    } else {
        "bind every placeholder before emitting the statements that use it"
    };
    eprintln!("  {}: {}", output::hint_label(), output::hint_text(hint));
}
