/*!
 * Command-line interface for usefullm
 */

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use usefullm::clipboard::{Clipboard, SystemClipboard};
use usefullm::commands::{completions, App, DirtreeOptions, SummOptions};
use usefullm::config::{Args, Command, ConfigStore};
use usefullm::error::Result;
use usefullm::history::HistoryStore;
use usefullm::llm::LlmClient;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("usefullm={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_app(clipboard: &dyn Clipboard) -> Result<App<'_>> {
    Ok(App::new(
        clipboard,
        HistoryStore::open_default()?,
        ConfigStore::open_default()?,
    ))
}

fn run(command: Command) -> Result<String> {
    let clipboard = SystemClipboard;

    match command {
        Command::Cpdir { dir, all } => open_app(&clipboard)?.cpdir(&dir, all),
        Command::Dirtree {
            dir,
            depth,
            ignore,
            all,
            format,
        } => open_app(&clipboard)?.dirtree(&DirtreeOptions {
            dir,
            depth,
            ignore,
            all,
            format,
        }),
        Command::Summ { path, tokens, all } => {
            let app = open_app(&clipboard)?;
            let client = LlmClient::new(app.config.load()?)?;
            app.summ(&SummOptions { path, tokens, all }, &client)
        }
        Command::Config { key, value } => {
            open_app(&clipboard)?.config(key.as_deref(), value.as_deref())
        }
        Command::History { index } => open_app(&clipboard)?.history(index),
        Command::Last => open_app(&clipboard)?.last(),
        // Completions need no state directory
        Command::Completions { shell } => Ok(completions(shell)),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args.command) {
        Ok(status) => println!("{}", status.trim_end()),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
