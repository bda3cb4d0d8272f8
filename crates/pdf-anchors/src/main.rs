mod anchor;
mod cli;
mod error;
mod extract;
mod logging;
mod output;

use std::io::{self, Write};

use clap::Parser;
use cli::Cli;
use pdfplumber::WordOptions;

use crate::error::AnchorError;
use crate::extract::ExtractSettings;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version land here too and are not failures.
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), AnchorError> {
    let settings = ExtractSettings {
        words: WordOptions {
            x_tolerance: cli.x_tolerance,
            y_tolerance: cli.y_tolerance,
            keep_blank_chars: cli.keep_blank_chars,
            ..WordOptions::default()
        },
        origin: cli.origin,
        password: cli.password,
    };

    let anchors = extract::run(&cli.file, cli.page, &settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_json(&mut out, &anchors)?;
    out.flush()?;
    Ok(())
}
