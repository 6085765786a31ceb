use cliproc::{Cli, ExitCode};
use scry::commands::scry::Scry;
use std::env;

fn main() -> ExitCode {
    Cli::default().parse(env::args()).go::<Scry>()
}
