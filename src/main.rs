//! Super Ball launcher - text front-end
//!
//! Parses a command, runs it against the launcher library and prints the
//! resulting status line. Failures are printed as the user-facing message
//! and turn into a non-zero exit status.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::ExitCode;
use superball_launcher::{
    config::{ConfigStore, DEFAULT_CONFIG_FILE, Language, Theme, Version},
    controller::LauncherController,
    error::{LauncherError, get_user_friendly_error},
    utils,
};
use tracing::{error, info};

const USAGE: &str = "\
Super Ball Game Launcher

Usage: superball-launcher [--config PATH] [COMMAND]

Commands:
  start [LANGUAGE] [VERSION]  Launch the game (defaults to the saved selection)
  stats                       Show play statistics
  check                       Check that the game files exist
  browse [DIR]                Point the game paths at a folder (opens a picker without DIR)
  language <Chinese|English>  Save the selected language
  version <v1.0|v2.0>         Save the selected version
  theme <dark|light|gaming>   Save the launcher theme
  auto-launch <on|off>        Launch the saved selection when started without a command
  help                        Show this message

Without a command the saved selection is launched if auto-launch is on,
otherwise the status panel is shown.";

/// Parsed front-end command
#[derive(Debug, PartialEq)]
enum Command {
    Start {
        language: Option<Language>,
        version: Option<Version>,
    },
    Stats,
    Check,
    Browse(Option<PathBuf>),
    Language(Language),
    Version(Version),
    Theme(Theme),
    AutoLaunch(bool),
    Help,
}

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Cli {
    config_path: PathBuf,
    command: Option<Command>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;
    if cli.command == Some(Command::Help) {
        println!("{USAGE}");
        return Ok(());
    }

    // A launcher without a log file is still usable
    if let Err(e) = utils::init_logging(&utils::log_dir_for(&cli.config_path)) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let config = ConfigStore::open_shared(&cli.config_path);
    let mut controller = LauncherController::with_browser(config);

    match cli.command {
        None => {
            if let Some(result) = controller.auto_launch() {
                println!("{}", result?.message);
            } else {
                println!("{}", controller.status());
            }
        }
        Some(Command::Start { language, version }) => {
            let (saved_language, saved_version) = controller.selection();
            let report = controller.start_game(
                language.unwrap_or(saved_language),
                version.unwrap_or(saved_version),
            )?;
            println!("{}", report.message);
        }
        Some(Command::Stats) => {
            let summary = controller.summary();
            println!("🎮 Total Games Played: {}", summary.play_count);
            println!("📅 Last Played: {}", summary.last_played_display);
        }
        Some(Command::Check) => print!("{}", controller.file_report()),
        Some(Command::Browse(dir)) => {
            let picked = dir.or_else(|| {
                rfd::FileDialog::new()
                    .set_title("Select Game Folder")
                    .pick_folder()
            });
            let Some(folder) = picked else {
                info!("Folder selection cancelled");
                println!("Folder selection cancelled");
                return Ok(());
            };
            let outcome = controller.browse_folder(&folder);
            println!("{}", outcome.status_message());
            print!("{}", controller.file_report());
        }
        Some(Command::Language(language)) => println!("{}", controller.change_language(language)),
        Some(Command::Version(version)) => {
            println!("{}", controller.change_version(version));
            println!("{}", version.features());
        }
        Some(Command::Theme(theme)) => println!("{}", controller.change_theme(theme)),
        Some(Command::AutoLaunch(enabled)) => println!("{}", controller.set_auto_launch(enabled)),
        Some(Command::Help) => println!("{USAGE}"),
    }

    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Cli> {
    let mut config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    let mut words = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config_path = PathBuf::from(path);
            }
            "--help" | "-h" => words.push("help".to_string()),
            _ => words.push(arg),
        }
    }

    let mut words = words.into_iter();
    let Some(name) = words.next() else {
        return Ok(Cli {
            config_path,
            command: None,
        });
    };
    let mut rest: Vec<String> = words.collect();

    let command = match name.as_str() {
        "start" | "play" => {
            let mut language = None;
            let mut version = None;
            for word in rest.drain(..) {
                if let Ok(parsed) = word.parse::<Language>() {
                    language = Some(parsed);
                } else if let Ok(parsed) = word.parse::<Version>() {
                    version = Some(parsed);
                } else {
                    return Err(LauncherError::InvalidValue {
                        kind: "language or version",
                        value: word,
                    }
                    .into());
                }
            }
            Command::Start { language, version }
        }
        "stats" => Command::Stats,
        "check" | "test-files" => Command::Check,
        "browse" => match rest.as_slice() {
            [] => Command::Browse(None),
            [dir] => Command::Browse(Some(PathBuf::from(dir))),
            _ => bail!("`browse` takes at most one folder"),
        },
        "language" => Command::Language(single_value(&name, &rest)?.parse()?),
        "version" => Command::Version(single_value(&name, &rest)?.parse()?),
        "theme" => Command::Theme(single_value(&name, &rest)?.parse()?),
        "auto-launch" => Command::AutoLaunch(parse_switch(single_value(&name, &rest)?)?),
        "help" => Command::Help,
        other => bail!("Unknown command: {other}\n\n{USAGE}"),
    };

    Ok(Cli {
        config_path,
        command: Some(command),
    })
}

fn single_value<'a>(command: &str, rest: &'a [String]) -> Result<&'a str> {
    match rest {
        [value] => Ok(value.as_str()),
        _ => bail!("`{command}` takes exactly one value"),
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(LauncherError::InvalidValue {
            kind: "auto-launch switch",
            value: value.to_string(),
        }
        .into()),
    }
}

fn user_message(e: &anyhow::Error) -> String {
    if let Some(launcher_error) = e.downcast_ref::<LauncherError>() {
        get_user_friendly_error(launcher_error)
    } else {
        format!("{e:#}")
    }
}
