use std::{
    io::{self, Write},
    panic,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    style::ResetColor,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use tuirealm::{
    PollStrategy,
    terminal::{CrosstermTerminalAdapter, TerminalBridge},
};

use kanban_panel::{
    app::App,
    cli::{self, RootCommand},
    logging::{init_logging, log_panel_session, print_log_location},
    realm::{RootId, apply_message, init_application, should_quit},
    settings::Settings,
    terminal::{ButtonMotionReporting, PointerShape, PressReleaseReporting, SetPointerShape},
};

#[derive(Parser, Debug)]
#[command(
    name = "kanban-panel",
    about = "Kanban board host with a mouse-resizable task panel",
    version,
    author
)]
struct Cli {
    /// Panel state file (defaults to the local data directory)
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<RootCommand>,
}

enum RunOutcome {
    Continue,
    Exit(i32),
}

static TERMINAL_RESTORED: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    let log_path = match init_logging() {
        Ok(path) => Some(path),
        Err(err) => {
            eprintln!("warning: failed to initialize logging: {err}");
            None
        }
    };
    if let Some(path) = log_path.as_ref() {
        install_panic_hook_with_log(path.clone());
    }

    let outcome = run_app();
    if let Some(path) = log_path.as_ref()
        && !matches!(outcome, Ok(RunOutcome::Exit(_)))
    {
        print_log_location(path);
    }

    match outcome {
        Ok(RunOutcome::Continue) => Ok(()),
        Ok(RunOutcome::Exit(code)) => std::process::exit(code),
        Err(err) => Err(err),
    }
}

fn run_app() -> Result<RunOutcome> {
    let cli = Cli::parse();
    let settings = Settings::load();
    log_panel_session(&settings, cli.store.as_deref());

    if let Some(command) = cli.command {
        let code = cli::run(command, &settings, cli.store, cli.json);
        return Ok(RunOutcome::Exit(code));
    }

    let app = Arc::new(Mutex::new(App::new(&settings, cli.store)?));

    let _guard = TerminalGuard;
    let mut terminal = setup_terminal()?;
    let mut realm = init_application(Arc::clone(&app))?;

    let mut redraw = true;
    while !should_quit(&app)? {
        if redraw {
            terminal
                .draw(|frame| realm.view(&RootId::Root, frame, frame.area()))
                .context("failed to render frame")?;
            redraw = false;
        }

        let messages = realm
            .tick(PollStrategy::UpTo(16))
            .context("failed to process tui-realm tick")?;

        if !messages.is_empty() {
            redraw = true;
        }

        for message in messages {
            apply_message(&app, message)?;
        }
    }

    // Ends any gesture so its lease restores the pointer before teardown.
    drop(app);
    drop(realm);

    let _ = terminal.disable_raw_mode();
    let _ = terminal.leave_alternate_screen();
    let _ = terminal.clear_screen();
    let _ = execute!(io::stdout(), PressReleaseReporting(false));
    TERMINAL_RESTORED.store(true, Ordering::SeqCst);

    Ok(RunOutcome::Continue)
}

fn setup_terminal() -> Result<TerminalBridge<CrosstermTerminalAdapter>> {
    TERMINAL_RESTORED.store(false, Ordering::SeqCst);

    let mut terminal =
        TerminalBridge::new_crossterm().context("failed to initialize terminal bridge")?;

    terminal
        .enable_raw_mode()
        .context("failed to enable raw mode")?;
    terminal
        .enter_alternate_screen()
        .context("failed to enter alternate screen")?;
    execute!(io::stdout(), PressReleaseReporting(true))
        .context("failed to enable mouse reporting")?;

    Ok(terminal)
}

fn install_panic_hook_with_log(log_path: PathBuf) {
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        eprintln!();
        eprintln!("  Log file: {}", log_path.display());
        eprintln!();
        previous_hook(panic_info);
    }));
}

fn restore_terminal() {
    if TERMINAL_RESTORED.swap(true, Ordering::SeqCst) {
        return;
    }

    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        ButtonMotionReporting(false),
        PressReleaseReporting(false),
        SetPointerShape(PointerShape::Default),
        LeaveAlternateScreen,
        Show,
        ResetColor
    );
    let _ = stdout.flush();
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}
