//! Standalone web server binary
//!
//! Usage: cargo run -p arcana-web --bin arcana-web-server

use arcana_web::{ServerConfig, WebServer};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    arcana_web::init_logging();

    let args: Vec<String> = std::env::args().collect();
    let mut host = "127.0.0.1".to_string();
    let mut port = 8080u16;
    let mut assets_dir = PathBuf::from("assets");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" | "-h" => {
                host = value_of(&args, i, "--host");
                i += 2;
            }
            "--port" | "-p" => {
                port = value_of(&args, i, "--port").parse().unwrap_or_else(|_| {
                    eprintln!("Error: invalid port number");
                    std::process::exit(1);
                });
                i += 2;
            }
            "--assets-dir" | "-d" => {
                assets_dir = PathBuf::from(value_of(&args, i, "--assets-dir"));
                i += 2;
            }
            "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    if !assets_dir.exists() {
        tracing::warn!(assets = %assets_dir.display(), "assets directory does not exist");
    }

    let narrator = std::env::var("ARCANA_NARRATOR").unwrap_or_else(|_| "gemini".to_string());
    let config = ServerConfig::new(host, port, assets_dir).with_narrator(narrator);

    tracing::info!(
        host = %config.host(),
        port = config.port(),
        assets = %config.assets_dir().display(),
        narrator = %config.narrator(),
        "starting arcana web server"
    );

    let server = WebServer::new(config)?;
    let handle = server.start().await?;

    println!("Server running at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down server");
    handle.shutdown().await?;
    tracing::info!("server stopped cleanly");

    Ok(())
}

fn value_of(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires a value", flag);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("Arcana Web Server");
    println!();
    println!("Usage: arcana-web-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --host, -h <HOST>           Host to bind to (default: 127.0.0.1)");
    println!("  --port, -p <PORT>           Port to bind to (default: 8080)");
    println!("  --assets-dir, -d <DIR>      Assets root holding cards/ (default: assets)");
    println!("  --help                      Show this help message");
    println!();
    println!("Environment:");
    println!("  ARCANA_NARRATOR             Narrator kind: gemini (default) or template");
    println!("  GEMINI_TOKEN, GEMINI_MODEL  Gemini credentials and model");
    println!("  RUST_LOG, ARCANA_LOG_FORMAT Log filter and format (text or json)");
}
