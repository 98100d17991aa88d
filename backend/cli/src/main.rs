mod handlers;
mod host;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::Mutex;

use cellmate_assistant::{InitOptions, Session};
use cellmate_commands::{detect_command, CommandRegistry, CommandRequest};
use cellmate_notebook::LlmNotebookGenerator;

use handlers::build_dispatcher;
use host::TerminalHost;

#[derive(Parser)]
#[command(name = "cellmate")]
#[command(about = "Cellmate — AI assistant for notebook workflows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a prompt to the assistant
    Ask {
        /// The prompt text
        prompt: String,
        /// Execute generated code immediately instead of showing it
        #[arg(long)]
        auto_execute: bool,
        #[arg(long)]
        model: Option<String>,
        /// Symbolic endpoint name ("blablador", "ollama") or a base URL
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Add comments and docstrings to a source file's code
    Doc {
        /// File whose content should be documented
        file: PathBuf,
    },
    /// Initialize the assistant and persist the model configuration
    Init {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        vision_model: Option<String>,
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Route raw cell text ("%ask ...", "%%doc ...") through command detection
    Run {
        /// The raw cell text; read from stdin when omitted
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let host = Arc::new(TerminalHost);
    let mut session = Session::new();

    match cli.command {
        Commands::Ask { prompt, auto_execute, model, endpoint, api_key } => {
            session
                .init(
                    host.as_ref(),
                    InitOptions {
                        model,
                        auto_execute,
                        endpoint,
                        api_key,
                        silent: true,
                        ..Default::default()
                    },
                )
                .await?;
            dispatch_cell(session, host, "ask", CommandRequest {
                line: None,
                cell: Some(prompt),
            })
            .await
        }
        Commands::Doc { file } => {
            let code = tokio::fs::read_to_string(&file).await?;
            session
                .init(host.as_ref(), InitOptions { silent: true, ..Default::default() })
                .await?;
            dispatch_cell(session, host, "doc", CommandRequest { line: None, cell: Some(code) })
                .await
        }
        Commands::Init { model, vision_model, endpoint, api_key } => {
            session
                .init(
                    host.as_ref(),
                    InitOptions { model, vision_model, endpoint, api_key, ..Default::default() },
                )
                .await?;
            println!("Initialized with model {}.", session.active_model()?);
            Ok(())
        }
        Commands::Run { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    use tokio::io::AsyncReadExt;
                    let mut buf = String::new();
                    tokio::io::stdin().read_to_string(&mut buf).await?;
                    buf
                }
            };
            let registry = CommandRegistry::new();
            match detect_command(&text, &registry) {
                Some(invocation) => {
                    session
                        .init(host.as_ref(), InitOptions { silent: true, ..Default::default() })
                        .await?;
                    dispatch_cell(session, host, &invocation.key, invocation.request).await
                }
                None => {
                    eprintln!("Not a command invocation; try e.g. \"%ask <prompt>\".");
                    Ok(())
                }
            }
        }
    }
}

/// Wire the session into the command dispatcher and run one command.
async fn dispatch_cell(
    mut session: Session,
    host: Arc<TerminalHost>,
    key: &str,
    request: CommandRequest,
) -> Result<()> {
    let provider = session.provider();
    let model = session.active_model()?;
    let generator = Arc::new(LlmNotebookGenerator::new(provider, model));
    let dispatcher = build_dispatcher(Arc::new(Mutex::new(session)), host, generator);
    let outcome = dispatcher.dispatch(key, &request).await?;
    if let Some(text) = outcome.text {
        println!("{text}");
    }
    Ok(())
}
