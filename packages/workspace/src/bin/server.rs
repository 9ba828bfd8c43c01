use std::path::PathBuf;
use std::sync::Arc;

use scratchpad_common::{JsonFileStore, KeyValueStore, MemoryStore};
use scratchpad_suggest::{HttpSuggestionClient, StaticSuggestionClient, SuggestionClient};
use scratchpad_workspace::{server, PlaygroundSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let mut port: u16 = 3030;
    let mut state_file: Option<PathBuf> = None;
    let mut suggest_endpoint: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().expect("Invalid port number");
                    i += 2;
                } else {
                    eprintln!("--port requires a value");
                    std::process::exit(1);
                }
            }
            "--state-file" => {
                if i + 1 < args.len() {
                    state_file = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    eprintln!("--state-file requires a value");
                    std::process::exit(1);
                }
            }
            "--suggest-endpoint" => {
                if i + 1 < args.len() {
                    suggest_endpoint = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("--suggest-endpoint requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Usage: scratchpad-server [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -p, --port <PORT>            HTTP port to listen on (default: 3030)");
                println!("  --state-file <FILE>          Persist buffers to a JSON file");
                println!("  --suggest-endpoint <URL>     Remote completion service endpoint");
                println!("  -h, --help                   Show this help message");
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                std::process::exit(1);
            }
        }
    }

    let store: Arc<dyn KeyValueStore> = match state_file {
        Some(path) => {
            tracing::info!("Persisting buffers to {:?}", path);
            Arc::new(JsonFileStore::new(path))
        }
        None => {
            tracing::info!("No state file configured; buffers persist for this run only");
            Arc::new(MemoryStore::new())
        }
    };

    let client: Arc<dyn SuggestionClient> = match suggest_endpoint {
        Some(endpoint) => Arc::new(HttpSuggestionClient::new(endpoint)),
        None => {
            tracing::warn!("No completion endpoint configured; suggestions will be empty");
            Arc::new(StaticSuggestionClient::new())
        }
    };

    let session = PlaygroundSession::new(store, client);
    let handle = session.handle();
    tokio::spawn(session.run());

    let routes = server::routes(handle);

    println!("Scratchpad running at http://127.0.0.1:{port}");
    println!("  preview:  http://127.0.0.1:{port}/preview");
    println!("  archive:  http://127.0.0.1:{port}/archive");
    println!("  editor:   ws://127.0.0.1:{port}/ws");

    warp::serve(routes).run(([127, 0, 0, 1], port)).await;

    Ok(())
}
