use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde_json::{Value, json};
use tracing::error;

use crate::panel::bounds::{max_width_for, parse_stored_width};
use crate::panel::{FileStore, TerminalViewport, Viewport, WidthStore};
use crate::settings::Settings;

const SCHEMA_VERSION: &str = "cli.v1";

#[derive(Debug, Clone, Subcommand)]
pub enum RootCommand {
    /// Print the stored panel width
    Width,
    /// Forget the stored panel width
    Reset,
    /// Print the effective settings
    Config(ConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Also write the effective settings to the config file
    #[arg(long)]
    pub write: bool,
}

pub fn run(
    command: RootCommand,
    settings: &Settings,
    store_path: Option<PathBuf>,
    json_output: bool,
) -> i32 {
    match execute(command, settings, store_path) {
        Ok(output) => {
            print_success(output, json_output);
            0
        }
        Err(err) => {
            print_error(&err, json_output);
            err.exit_code
        }
    }
}

struct CommandOutput {
    command: &'static str,
    data: Value,
    text: String,
}

#[derive(Debug)]
struct CliError {
    exit_code: i32,
    code: &'static str,
    message: String,
}

type CliResult<T> = Result<T, CliError>;

fn execute(
    command: RootCommand,
    settings: &Settings,
    store_path: Option<PathBuf>,
) -> CliResult<CommandOutput> {
    match command {
        RootCommand::Width => {
            let store = FileStore::open(resolve_store_path(store_path)?);
            let max_width = max_width_for(TerminalViewport.width());
            Ok(width_show(&store, settings, max_width))
        }
        RootCommand::Reset => {
            let mut store = FileStore::open(resolve_store_path(store_path)?);
            width_reset(&mut store, settings)
        }
        RootCommand::Config(args) => config_show(settings, args),
    }
}

fn resolve_store_path(store_path: Option<PathBuf>) -> CliResult<PathBuf> {
    store_path.or_else(FileStore::default_path).ok_or(CliError {
        exit_code: 3,
        code: "STORE_PATH_UNKNOWN",
        message: "unable to determine panel state path; pass --store".to_string(),
    })
}

/// Reports the stored width as the panel would read it at startup: `width`
/// is `null` when the stored value would be rejected for `max_width`.
fn width_show(store: &FileStore, settings: &Settings, max_width: u32) -> CommandOutput {
    let stored = store.get(&settings.storage_key);
    let width = stored
        .as_deref()
        .and_then(|raw| parse_stored_width(raw, settings.min_width, max_width));
    let text = match (stored.as_deref(), width) {
        (None, _) => "unset".to_string(),
        (Some(_), Some(width)) => width.to_string(),
        (Some(raw), None) => format!(
            "{raw} (ignored: outside {}..={max_width})",
            settings.min_width
        ),
    };

    CommandOutput {
        command: "width",
        data: json!({
            "key": settings.storage_key,
            "width": width,
            "valid": stored.is_none() || width.is_some(),
            "raw": stored,
            "min_width": settings.min_width,
            "max_width": max_width,
            "store": path_json(store.path()),
        }),
        text,
    }
}

fn width_reset(store: &mut FileStore, settings: &Settings) -> CliResult<CommandOutput> {
    let existed = store.get(&settings.storage_key).is_some();
    store
        .remove(&settings.storage_key)
        .map_err(|err| runtime_error(format!("{err:#}")))?;

    Ok(CommandOutput {
        command: "reset",
        data: json!({
            "key": settings.storage_key,
            "removed": existed,
            "store": path_json(store.path()),
        }),
        text: if existed {
            format!("removed stored width for '{}'", settings.storage_key)
        } else {
            "nothing stored".to_string()
        },
    })
}

fn config_show(settings: &Settings, args: ConfigArgs) -> CliResult<CommandOutput> {
    let text = settings
        .to_toml()
        .map_err(|err| runtime_error(format!("{err:#}")))?;

    let written = if args.write {
        let path = settings
            .save()
            .map_err(|err| runtime_error(format!("{err:#}")))?;
        Some(path)
    } else {
        None
    };

    Ok(CommandOutput {
        command: "config",
        data: json!({
            "settings": {
                "min_width": settings.min_width,
                "default_width": settings.default_width,
                "storage_key": settings.storage_key,
                "side_by_side_min_width": settings.side_by_side_min_width,
            },
            "written": written.as_deref().map(path_json),
        }),
        text: text.trim_end().to_string(),
    })
}

fn path_json(path: &Path) -> Value {
    Value::String(path.display().to_string())
}

fn runtime_error(message: String) -> CliError {
    CliError {
        exit_code: 5,
        code: "RUNTIME_ERROR",
        message,
    }
}

fn print_success(output: CommandOutput, json_output: bool) {
    if json_output {
        let payload = json!({
            "schema_version": SCHEMA_VERSION,
            "command": output.command,
            "data": output.data
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(value) => println!("{value}"),
            Err(_) => println!("{}", payload),
        }
        return;
    }

    println!("{}", output.text);
}

fn print_error(err: &CliError, json_output: bool) {
    error!(
        code = err.code,
        message = %err.message,
        "cli command failed"
    );

    if json_output {
        let payload = json!({
            "schema_version": SCHEMA_VERSION,
            "error": {
                "code": err.code,
                "message": err.message,
            }
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(value) => eprintln!("{value}"),
            Err(_) => eprintln!("{}", payload),
        }
        return;
    }

    eprintln!("error[{}]: {}", err.code, err.message);
}
