use anyhow::Context;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use dino_dash::{build_info, FrameLoop, GameConfig, SpriteAtlas};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Dino Dash - terminal endless runner

Usage: dino-dash [options]

Options:
  --seed <N>        Seed the obstacle spawner for a reproducible run
  --sprites <PATH>  Load the sprite sheet from a JSON file
  --log <PATH>      Write logs to PATH (filter with RUST_LOG)
  --version, -v     Show version information
  --help, -h        Show this help message

Controls:
  Space / Up        Jump
  Down              Crouch (release to stand)
  R                 Restart after a crash
  Esc / q           Quit";

/// Options collected from the command line.
#[derive(Debug, Default, PartialEq)]
struct Options {
    seed: Option<u64>,
    sprites: Option<PathBuf>,
    log: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum CliAction {
    Run(Options),
    Help,
    Version,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliAction, String> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(CliAction::Help),
            "--version" | "-v" => return Ok(CliAction::Version),
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--sprites" => {
                let value = args.next().ok_or("--sprites needs a path")?;
                options.sprites = Some(PathBuf::from(value));
            }
            "--log" => {
                let value = args.next().ok_or("--log needs a path")?;
                options.log = Some(PathBuf::from(value));
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(CliAction::Run(options))
}

/// Log to a file; stdout belongs to the game screen.
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

/// Restores the terminal on drop, including on error and panic unwinds.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut guard = Self {
            keyboard_enhanced: false,
        };
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
            .context("failed to enter alternate screen")?;

        // Key release events need the kitty keyboard protocol
        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("failed to enable key release reporting")?;
            guard.keyboard_enhanced = true;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = disable_raw_mode();
    }
}

fn main() -> anyhow::Result<()> {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(CliAction::Run(options)) => options,
        Ok(CliAction::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliAction::Version) => {
            println!("{}", build_info::version_string());
            return Ok(());
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'dino-dash --help' for usage.");
            std::process::exit(2);
        }
    };

    if let Some(path) = &options.log {
        init_tracing(path)?;
    }

    // Assets are required before anything is drawn; failure aborts startup
    let atlas = match &options.sprites {
        Some(path) => SpriteAtlas::load(path),
        None => SpriteAtlas::builtin(),
    }
    .context("failed to load sprites")?;

    let config = GameConfig {
        seed: options.seed,
        ..Default::default()
    };
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?config.seed, "starting {}", build_info::version_string());

    let guard = TerminalGuard::enter()?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to create terminal")?;
    terminal.clear()?;

    let mut frame_loop = FrameLoop::new(config, atlas, rng, guard.keyboard_enhanced);
    let result = frame_loop.run(&mut terminal);

    drop(guard);
    result.context("frame loop failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_runs_with_defaults() {
        assert_eq!(
            parse_args(args(&[])),
            Ok(CliAction::Run(Options::default()))
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["--help"])), Ok(CliAction::Help));
        assert_eq!(parse_args(args(&["-v"])), Ok(CliAction::Version));
        // First flag wins
        assert_eq!(
            parse_args(args(&["--seed", "1", "-h"])),
            Ok(CliAction::Help)
        );
    }

    #[test]
    fn test_all_options() {
        let action = parse_args(args(&[
            "--seed", "42", "--sprites", "s.json", "--log", "run.log",
        ]));
        assert_eq!(
            action,
            Ok(CliAction::Run(Options {
                seed: Some(42),
                sprites: Some(PathBuf::from("s.json")),
                log: Some(PathBuf::from("run.log")),
            }))
        );
    }

    #[test]
    fn test_bad_args() {
        assert_eq!(
            parse_args(args(&["--seed"])),
            Err("--seed needs a value".to_string())
        );
        assert_eq!(
            parse_args(args(&["--seed", "abc"])),
            Err("invalid seed: abc".to_string())
        );
        assert_eq!(
            parse_args(args(&["--fast"])),
            Err("Unknown option: --fast".to_string())
        );
    }
}
