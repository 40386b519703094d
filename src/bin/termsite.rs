//! Console host for the terminal.
//!
//! Reads one line per submission from stdin and prints the HTML the
//! terminal produces. An arrow-key escape sequence on its own line recalls
//! history. Settings persist in `$TERMSITE_SETTINGS` (default
//! `.termsite-settings`).

use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use termsite::build::{Verbosity, logging};
use termsite::settings::PersistentSettings;
use termsite::storage::FileStorage;
use termsite::terminal::{Key, KeyResponse, Session, StdPlatform, Surface};

const SETTINGS_CAPACITY: usize = 1024;

#[derive(Debug)]
struct ConsoleSurface;

impl Surface for ConsoleSurface {
    fn append(&mut self, html: &str) {
        println!("{}", html);
    }

    fn replace(&mut self, html: &str) {
        print!("\x1b[2J\x1b[H");
        println!("{}", html);
    }

    fn rearm_input(&mut self, prompt: &str, _placeholder: &str) {
        print!("{} ", prompt);
        let _ = io::stdout().flush();
    }
}

fn main() -> ExitCode {
    let verbosity = Verbosity::from_args(std::env::args().skip(1));
    if let Err(e) = logging::init(verbosity) {
        eprintln!("logger setup failed: {}", e);
    }

    let path = std::env::var_os("TERMSITE_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".termsite-settings"));
    let storage = match FileStorage::open(&path, SETTINGS_CAPACITY) {
        Ok(storage) => storage,
        Err(e) => {
            error!("cannot open settings file {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = Session::new(ConsoleSurface, PersistentSettings::open(storage), StdPlatform);
    info!("effects enabled: {}", session.effects().enabled());

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("stdin read failed: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let key = match line.as_str() {
            "\u{1b}[A" => Key::ArrowUp,
            "\u{1b}[B" => Key::ArrowDown,
            text => Key::Enter(text),
        };
        if let KeyResponse::Recall(text) = session.handle_key(key) {
            println!("{}", text);
        }
    }

    ExitCode::SUCCESS
}
