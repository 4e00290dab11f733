mod agent;
mod brain;
mod browser;
mod tools;

use agent::{ChatAgent, ChatMessage, FileSurfer, SurferConfig};
use brain::{Brain, BrainConfig};
use browser::LocalRenderer;
use clap::Parser;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::fmt;

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "filesurfer")]
#[command(about = "Chat with an agent that pages through local files, directories and web pages")]
struct Args {
    /// Root directory for relative paths (overrides SURFER_BASE_PATH)
    #[arg(short, long)]
    base_path: Option<PathBuf>,

    /// Characters per viewport page (overrides SURFER_VIEWPORT_SIZE)
    #[arg(long)]
    viewport_size: Option<usize>,

    /// Name attached to your messages
    #[arg(short, long, default_value = "user")]
    user: String,

    /// History file path
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

const HELP: &str = "Commands: /status shows the viewport, /reset clears the conversation, /quit exits.";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    fmt()
        .with_max_level(args.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut surfer_config = SurferConfig::load(args.base_path.clone())?;
    if let Some(size) = args.viewport_size {
        if size == 0 {
            return Err("--viewport-size must be greater than zero".into());
        }
        surfer_config.viewport_size = size;
    }
    let brain_config = BrainConfig::from_env()?;

    info!(
        base_path = %surfer_config.base_path.display(),
        viewport_size = surfer_config.viewport_size,
        model = %brain_config.default_model,
        "Configuration loaded"
    );

    let brain = Brain::new(brain_config)?;
    let mut agent = FileSurfer::new(&surfer_config, brain, Arc::new(LocalRenderer::new()));

    let history_file = args.history_file.unwrap_or_else(|| {
        dirs::home_dir()
            .map(|p| p.join(".filesurfer_history"))
            .unwrap_or_else(|| PathBuf::from(".filesurfer_history"))
    });

    run_repl(&mut agent, &args.user, &history_file).await?;

    println!("\nGoodbye!");
    Ok(())
}

async fn run_repl(
    agent: &mut FileSurfer<Brain>,
    user: &str,
    history_file: &Path,
) -> Result<(), ReadlineError> {
    let mut rl: Editor<(), FileHistory> = Editor::new()?;

    if history_file.exists()
        && let Err(e) = rl.load_history(history_file)
    {
        warn!(path = %history_file.display(), error = %e, "Failed to load history");
    }

    println!("{}: {}", agent.name(), agent.description());
    println!("Base path: {}", agent.viewport().base_path().display());
    println!("{}", HELP);
    println!();

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("[error] Readline error: {}", e);
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(input);

        match input {
            "/quit" | "/exit" => break,
            "/help" => println!("{}", HELP),
            "/reset" => {
                agent.on_reset().await;
                println!("[conversation reset]");
            }
            "/status" => print_status(agent),
            _ => {
                // Ctrl+C while the model is thinking cancels this request only
                let cancel = CancellationToken::new();
                let watcher = {
                    let cancel = cancel.clone();
                    tokio::spawn(async move {
                        if signal::ctrl_c().await.is_ok() {
                            cancel.cancel();
                        }
                    })
                };

                let response = agent
                    .on_messages(&[ChatMessage::user(user, input)], cancel)
                    .await;
                watcher.abort();

                if response.is_error {
                    println!("[error] {}", response.message.content);
                } else {
                    println!("{}", response.message.content);
                }
            }
        }
    }

    if let Err(e) = rl.save_history(history_file) {
        warn!(path = %history_file.display(), error = %e, "Failed to save history");
    }
    Ok(())
}

fn print_status(agent: &FileSurfer<Brain>) {
    let viewport = agent.viewport();
    match (viewport.path(), viewport.current_page()) {
        (Some(path), Some(page)) => {
            println!("Path: {}", path);
            if let Some(title) = viewport.page_title() {
                println!("Title: {}", title);
            }
            println!(
                "Page {} of {} ({} chars per page)",
                page + 1,
                viewport.page_count(),
                viewport.viewport_size()
            );
        }
        _ => println!("No document open (base path {})", viewport.base_path().display()),
    }
    println!("History: {} messages", agent.history().len());
}
