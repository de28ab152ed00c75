use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use fresh_hex::app::HexEditor;
use fresh_hex::config::Config;
use fresh_hex::model::WindowedBuffer;
use fresh_hex::services::terminal_modes::{self, TerminalModes};
use fresh_hex::services::tracing_setup;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::{File, OpenOptions};
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;

/// Simple hex editor working directly on the file
#[derive(Parser, Debug)]
#[command(name = "fresh-hex")]
#[command(about = "Simple hex editor working directly on the file", long_about = None)]
#[command(version)]
struct Args {
    /// File to edit (must exist)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Size of the window cached from the file, in bytes
    #[arg(short = 'w', long, value_name = "BYTES")]
    window_size: Option<usize>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for editor diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };

    // CLI flag overrides config
    if let Some(window_size) = args.window_size {
        config.window_capacity = window_size;
    }
    Ok(config)
}

fn run_editor(editor: &mut HexEditor<File>) -> AnyhowResult<()> {
    let mut modes = TerminalModes::enable().context("Failed to enable terminal modes")?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).context("Failed to create terminal")?;
    terminal.clear().context("Failed to clear terminal")?;

    let result = event_loop(&mut terminal, editor);
    modes.undo();
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    editor: &mut HexEditor<File>,
) -> AnyhowResult<()> {
    loop {
        terminal
            .draw(|frame| editor.render(frame))
            .context("Failed to draw")?;

        match event::read().context("Failed to read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => editor.handle_key(key),
            // Redrawn on the next iteration
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {}x{}", width, height);
            }
            _ => {}
        }

        if editor.should_quit() {
            return Ok(());
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_file);
    tracing::info!("fresh-hex starting");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.dump_config {
        return match serde_json::to_string_pretty(&config) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to serialize config: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let file = match OpenOptions::new().read(true).write(true).open(&args.file) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Cannot open {}: {}", args.file.display(), e);
            eprintln!("Cannot open file: {}", args.file.display());
            return ExitCode::FAILURE;
        }
    };

    let buffer = match WindowedBuffer::create(config.window_capacity, file) {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::warn!("Buffer creation failed: {}", e);
            eprintln!("Could not create buffer.");
            return ExitCode::FAILURE;
        }
    };

    let mut editor = HexEditor::new(buffer, &config);
    let result = run_editor(&mut editor);
    tracing::info!("fresh-hex exiting");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::warn!("Editor failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
