use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use northumbria_client::{
    AgentClient, Attachment, AttachmentKind, ChatSession, Config, SendOutcome, SessionContext,
};

mod logging;
mod render;
mod repl;

use logging::init_logging;

#[derive(Parser)]
#[command(name = "asknorthumbria")]
#[command(about = "Chat with the AskNorthumbria student assistant")]
#[command(version)]
struct Cli {
    /// Agent base URL (defaults to config.toml, then http://localhost:8000)
    #[arg(long, env = "ASKNORTHUMBRIA_API_BASE")]
    server_url: Option<String>,

    /// Continue an existing conversation
    #[arg(long)]
    thread_id: Option<String>,

    /// Enable debug logging
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start interactive chat
    Chat,
    /// Send a single message and print the reply
    Send {
        /// Message text (may be omitted when a file is attached)
        message: Option<String>,

        /// File to upload with the message
        #[arg(long)]
        file: Option<PathBuf>,

        /// What the uploaded image shows
        #[arg(long, value_enum, requires = "file")]
        kind: Option<KindArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    IdCard,
    LiveImage,
}

impl From<KindArg> for AttachmentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::IdCard => AttachmentKind::IdCard,
            KindArg::LiveImage => AttachmentKind::LiveImage,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet, so a bad config file is reported directly.
    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("⚠️  {}; using defaults", e).yellow());
            Config::from_env()
        }
    };
    if let Some(server_url) = cli.server_url {
        config = config.with_api_base(server_url);
    }
    init_logging(cli.debug || config.debug);
    log::debug!("Agent endpoint: {}", config.chat_url());

    let client = AgentClient::new(&config)?;
    let mut session = ChatSession::new(client);
    if let Some(thread_id) = cli.thread_id {
        session = session.with_context(SessionContext::resume(thread_id));
    }

    match cli.command {
        Commands::Chat => repl::run_interactive_chat(session).await,
        Commands::Send {
            message,
            file,
            kind,
        } => send_once(session, message.unwrap_or_default(), file, kind).await,
    }
}

async fn send_once(
    mut session: ChatSession<AgentClient>,
    message: String,
    file: Option<PathBuf>,
    kind: Option<KindArg>,
) -> anyhow::Result<()> {
    if let Some(path) = file {
        let mut attachment = Attachment::from_path(&path).await?;
        if let Some(kind) = kind {
            attachment = attachment.with_kind(kind.into());
        }
        render::attachment(&attachment);
        session.attach(attachment);
    }

    match session.submit(&message).await {
        SendOutcome::Rejected => anyhow::bail!("nothing to send: provide a message or --file"),
        SendOutcome::Replied(_) => {
            for message in session.transcript() {
                render::message(message);
            }
            if let Some(thread_id) = session.context().thread_id() {
                println!(
                    "{}",
                    format!("Thread: {} (pass --thread-id to continue)", thread_id).dimmed()
                );
            }
            Ok(())
        }
        SendOutcome::Failed(err) => {
            for message in session.transcript() {
                render::message(message);
            }
            Err(err.into())
        }
    }
}
