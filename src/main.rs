use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use scarepi_remote::api::types::AudienceRegistration;
use scarepi_remote::notify::Notification;
use scarepi_remote::{ClientConfig, ClientError, CommandResult, RemoteControlClient, ScareKind};
use tokio::sync::broadcast::error::RecvError;

const WATCH_REFRESH_MS: u64 = 250;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("command failed: {0}")]
    CommandFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "scarepi-remote", about = "Remote control for the ScarePi haunted house")]
struct Cli {
    #[arg(long, env = "SCAREPI_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch system status once.
    Status,
    /// Fetch audience statistics once.
    Stats,
    Motion {
        #[command(subcommand)]
        action: MotionAction,
    },
    /// Trigger a scare effect: full, prop, sound or record.
    Scare { kind: ScareKind },
    Show {
        #[command(subcommand)]
        action: ShowAction,
    },
    /// Register an audience member.
    Join(JoinArgs),
    /// Print the QR code image URL.
    Qr,
    /// Poll continuously and print the display as it changes.
    Watch,
}

#[derive(Subcommand, Debug)]
enum MotionAction {
    Toggle,
}

#[derive(Subcommand, Debug)]
enum ShowAction {
    Start,
    Stop,
}

#[derive(Args, Debug)]
struct JoinArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    social_media: Option<String>,
    #[arg(long)]
    how_heard: Option<String>,
    #[arg(long = "interest")]
    interests: Vec<String>,
    #[arg(long, default_value_t = false)]
    subscribe_youtube: bool,
    #[arg(long, default_value_t = false)]
    no_updates: bool,
}

impl From<JoinArgs> for AudienceRegistration {
    fn from(args: JoinArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            phone: args.phone,
            social_media: args.social_media,
            how_heard: args.how_heard,
            interests: args.interests,
            subscribe_youtube: args.subscribe_youtube,
            subscribe_updates: !args.no_updates,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    let client = Arc::new(RemoteControlClient::new(&config)?);

    match cli.command {
        Command::Status => {
            client.poll_status().await.map_err(request_failed)?;
            println!("{}", client.view());
            Ok(())
        }
        Command::Stats => {
            let stats = client.poll_audience_stats().await.map_err(request_failed)?;
            println!(
                "audience: {} youtube: {} scares: {} show time: {}",
                stats.total_audience, stats.youtube_subscribers, stats.total_scares, stats.show_duration
            );
            Ok(())
        }
        Command::Motion { action: MotionAction::Toggle } => finish(client.toggle_motion().await),
        Command::Scare { kind } => finish(client.trigger_scare(kind).await),
        Command::Show { action: ShowAction::Start } => finish(client.start_show().await),
        Command::Show { action: ShowAction::Stop } => finish(client.stop_show().await),
        Command::Join(args) => finish(client.join_audience(&args.into()).await),
        Command::Qr => {
            let url = client.qr_code_url().await.map_err(request_failed)?;
            println!("{url}");
            Ok(())
        }
        Command::Watch => run_watch(&client).await,
    }
}

fn request_failed(err: ClientError) -> CliError {
    match err.status() {
        Some(status) => tracing::error!(status, error = %err, "backend rejected request"),
        None => tracing::error!(error = %err, "request failed"),
    }
    CliError::Client(err)
}

fn finish(result: CommandResult) -> Result<(), CliError> {
    if result.ok {
        println!("{}", result.message);
        Ok(())
    } else {
        Err(CliError::CommandFailed(result.message))
    }
}

async fn run_watch(client: &Arc<RemoteControlClient>) -> Result<(), CliError> {
    let mut notifications = client.subscribe();
    let _pollers = client.start();
    client.announce("Watching ScarePi, press Ctrl-C to stop");

    let mut refresh = tokio::time::interval(Duration::from_millis(WATCH_REFRESH_MS));
    let mut last_line = String::new();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("stopping watch");
                return Ok(());
            }
            received = notifications.recv() => match received {
                Ok(note) => print_notification(&note),
                Err(RecvError::Lagged(skipped)) => eprintln!("skipped {skipped} notifications"),
                Err(RecvError::Closed) => return Ok(()),
            },
            _ = refresh.tick() => {
                let line = client.view().to_string();
                if line != last_line {
                    println!("{line}");
                    last_line = line;
                }
            }
        }
    }
}

fn print_notification(note: &Notification) {
    println!("[{}] {}", note.kind, note.text);
}
