// SPDX-License-Identifier: MIT
//
// screen-display — blink demo for the screen crates.
//
// Wires the pieces together:
//
//   sd-term   → ANSI writers and the live terminal host
//   sd-style  → colors, intensity, text styles
//   sd-screen → screen, fragments, render/erase, blink driver
//
// Usage:
//
//   screen-display [key=value ...]
//
// Keys: width, height, fg, bg, intensity, terminal, offset (see
// `ScreenConfig::set`), plus interval (milliseconds between phases) and
// cycles (stop after N blinks instead of waiting for Enter).
//
// Logs go to stderr; set RUST_LOG=debug to see screen events.

use std::io::{self, BufRead};
use std::process;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use sd_screen::config::{parse_option, parse_value};
use sd_screen::{Blinker, Result, Screen, ScreenConfig, ScreenError, TextFragment};
use sd_style::{Color, Intensity, TextStyle};
use sd_term::TtyHost;

// ─── Options ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    config: ScreenConfig,
    interval: Duration,
    /// `None` blinks until Enter is pressed.
    cycles: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: ScreenConfig::new(),
            interval: sd_screen::blink::DEFAULT_INTERVAL,
            cycles: None,
        }
    }
}

/// Parse `key=value` arguments (program name already stripped).
fn parse_args<I, S>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = Options::default();
    for arg in args {
        let (key, value) = parse_option(arg.as_ref())?;
        if options.config.set(key, value)? {
            continue;
        }
        match key {
            "interval" => options.interval = Duration::from_millis(parse_value(key, value)?),
            "cycles" => options.cycles = Some(parse_value(key, value)?),
            _ => return Err(ScreenError::Config(format!("unknown option: {key}"))),
        }
    }
    Ok(options)
}

// ─── Demo ───────────────────────────────────────────────────────────────────

fn fragments() -> Vec<TextFragment> {
    vec![
        TextFragment::new("screen-display", 2, 1).with_style(
            TextStyle::INHERIT
                .with_fg(Color::LightCyan)
                .with_intensity(Intensity::Bright),
        ),
        TextFragment::new("press Enter to stop", 2, 3),
        TextFragment::new("*", 20, 5).with_style(TextStyle::INHERIT.with_fg(Color::LightYellow)),
        TextFragment::new("warning", 2, 5).with_style(TextStyle::new(
            Color::Black,
            Color::Red,
            Intensity::Normal,
        )),
    ]
}

fn run(options: &Options) -> Result<u64> {
    let mut screen = Screen::new(io::stdout(), TtyHost::new(), options.config.clone())?;
    screen.add_fragments(fragments())?;
    screen.render()?;
    screen.flush()?;

    let blinker = Blinker::new(options.interval);
    let blinks = if let Some(cycles) = options.cycles {
        blinker.run_cycles(&mut screen, cycles)?;
        cycles
    } else {
        let (stop, stopped) = mpsc::channel();
        // Any line or EOF on stdin ends the loop; the sender drops with the
        // thread either way.
        thread::spawn(move || {
            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line).is_ok() {
                let _ = stop.send(());
            }
        });
        blinker.run(&mut screen, &stopped)?
    };

    screen.render()?;
    screen.dispose()?;
    Ok(blinks)
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    init_logging();

    let options = parse_args(std::env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("screen-display: {e}");
        process::exit(2);
    });

    match run(&options) {
        Ok(blinks) => tracing::info!(blinks, "done"),
        Err(e) => {
            eprintln!("screen-display: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
