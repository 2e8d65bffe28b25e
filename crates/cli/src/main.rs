//! Command-line client for the vanity address generation service.
//!
//! Submits a search request, polls until the job finishes, and prints the
//! resulting key pair. Ctrl-C cancels polling and asks the server to stop
//! the job.

use std::env;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vanity_client::poller::PollConfig;
use vanity_client::{ClientError, Generator, JobEvent};
use vanity_core::pattern::is_base58;
use vanity_core::types::{GenerationRequest, Position};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3001";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
const DEFAULT_DEADLINE_SECS: u64 = 600;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <pattern> <prefix|suffix>");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {program} abc prefix    Address starting with 'abc'");
    eprintln!("  {program} xyz suffix    Address ending with 'xyz'");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VANITY_SERVER_URL        Server base URL (default: {DEFAULT_SERVER_URL})");
    eprintln!("  VANITY_POLL_INTERVAL_MS  Delay between status checks (default: {DEFAULT_POLL_INTERVAL_MS})");
    eprintln!("  VANITY_DEADLINE_SECS     Give up after this many seconds (default: {DEFAULT_DEADLINE_SECS}, 0 = never)");
    std::process::exit(2);
}

fn env_u64(name: &str, default: u64) -> u64 {
    match env::var(name) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("{name} must be a number, got '{value}'");
            std::process::exit(2);
        }),
        Err(_) => default,
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vanity_cli=info,vanity_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    let position: Position = match args[2].parse() {
        Ok(position) => position,
        Err(e) => {
            eprintln!("{e}");
            usage(&args[0]);
        }
    };
    let request = match GenerationRequest::new(args[1].clone(), position) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    if !is_base58(&request.pattern) {
        tracing::warn!(
            pattern = %request.pattern,
            "Pattern contains characters outside the base58 alphabet; the server may reject it or never find a match",
        );
    }

    let server_url = env::var("VANITY_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.into());
    let deadline_secs = env_u64("VANITY_DEADLINE_SECS", DEFAULT_DEADLINE_SECS);
    let poll_config = PollConfig {
        interval: Duration::from_millis(env_u64("VANITY_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)),
        deadline: (deadline_secs > 0).then(|| Duration::from_secs(deadline_secs)),
        ..Default::default()
    };

    let generator = Generator::with_config(server_url.clone(), poll_config);

    // Ctrl-C trips the token; the poll loop exits at its next suspension
    // point without issuing further status queries.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, cancelling");
                cancel.cancel();
            }
        });
    }

    // Forward job events to the log.
    let mut events = generator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                JobEvent::Submitted { job_id } => {
                    tracing::info!(%job_id, "Job started");
                }
                JobEvent::StatusUpdate { job_id, progress, .. } => match progress {
                    Some(progress) => tracing::info!(%job_id, progress, "Still searching"),
                    None => tracing::info!(%job_id, "Still searching"),
                },
                JobEvent::Completed { job_id } => {
                    tracing::info!(%job_id, "Address found");
                }
                JobEvent::Failed { job_id, status } => {
                    tracing::error!(%job_id, %status, "Job ended without a result");
                }
                JobEvent::Cancelled { job_id } => {
                    tracing::info!(%job_id, "Polling cancelled");
                }
            }
        }
    });

    tracing::info!(
        server = %server_url,
        pattern = %request.pattern,
        position = %request.position,
        "Requesting vanity address",
    );

    match generator.generate(&request, &cancel).await {
        Ok(result) => {
            println!();
            println!("PUBLIC KEY:");
            println!("{}", result.public_key);
            println!();
            println!("PRIVATE KEY:");
            println!("{}", result.private_key);
            println!();
            println!("Save the private key securely; it is not stored anywhere else.");
        }
        Err(ClientError::Cancelled) => {
            eprintln!("Cancelled before a result was found.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, ClientError::Transport(_)) {
                eprintln!("Is the server running at {server_url}?");
            }
            std::process::exit(1);
        }
    }
}
