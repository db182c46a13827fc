//! Ad Analytics API Server Binary
//!
//! Run with: `cargo run --bin ad-analytics-server`

use ad_analytics::{run_server, DruidConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Note: Tracing is initialized in run_server()
    // Set RUST_LOG environment variable to control log level:
    //   RUST_LOG=debug cargo run --bin ad-analytics-server

    // Create configuration from environment variables or defaults
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);
    let mut druid = DruidConfig::default();
    if let Ok(base_url) = std::env::var("DRUID_BASE_URL") {
        druid.base_url = base_url;
    }

    let config = ServerConfig::new(host, port, druid);

    println!("🚀 Starting Ad Analytics API Server...");
    println!("   Host: {}", config.host);
    println!("   Port: {}", config.port);
    println!("   Engine: {}", config.druid.base_url);
    println!();
    println!(
        "Server will be available at: http://{}:{}",
        config.host, config.port
    );
    println!();
    println!("Available endpoints:");
    println!("  GET  /health                    - Health check");
    println!("  GET  /api/analytics/channels    - Impressions by channel");
    println!("  GET  /api/analytics/regions     - Impressions by region");
    println!();

    // Run server
    run_server(config).await?;

    Ok(())
}
