// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

use securefin::commands::{self, Flow};
use securefin::config::Config;
use securefin::utils::{init_logging, split_line};
use securefin::{SecureFin, cli};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(
        matches.get_one::<String>("log_level").map(|s| s.as_str()),
        matches.get_flag("log_json"),
    )?;
    let config = Config::load(matches.get_one::<String>("config").map(Path::new))?;
    let mut app = SecureFin::new(config);

    match matches.get_one::<String>("script") {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Open script at {}", path))?;
            run(&mut app, io::BufReader::new(file), false)
        }
        None => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                println!("SecureFin shell. Type 'help' for commands, 'quit' to leave.");
            }
            run(&mut app, stdin.lock(), interactive)
        }
    }
}

fn run<R: BufRead>(app: &mut SecureFin, input: R, interactive: bool) -> Result<()> {
    let mut lines = input.lines();
    loop {
        if interactive {
            print!("securefin> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens = match split_line(line) {
            Ok(t) => t,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };
        let matches = match cli::build_shell().try_get_matches_from(tokens) {
            Ok(m) => m,
            Err(e) => {
                // Covers `help` and `--help` too.
                e.print()?;
                continue;
            }
        };
        match commands::dispatch(app, &matches) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("error: {:#}", e),
        }
    }
    Ok(())
}
