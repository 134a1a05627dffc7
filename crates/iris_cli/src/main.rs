use clap::Parser;
use std::sync::Arc;
use tracing::{info, Level};

use iris_inference::{create_engine, EngineConfig, EngineKind, InferenceGate};
use iris_web::AppState;

#[derive(Parser, Debug)]
#[command(name = "iris", about = "Real-time visual question answering gateway")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Inference engine backend (dummy | moondream)
    #[arg(long, default_value = "moondream")]
    engine: EngineKind,

    /// Base URL of the engine HTTP endpoint
    #[arg(long, default_value = "http://127.0.0.1:11434")]
    engine_url: String,

    /// Model name passed to the engine
    #[arg(long, default_value = "moondream")]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args = Args::parse();

    let config = EngineConfig {
        kind: args.engine,
        endpoint: args.engine_url,
        model: args.model,
    };
    let engine = create_engine(&config)?;
    info!("using inference engine: {}", engine.name());

    let gate = Arc::new(InferenceGate::new(engine));
    let app = iris_web::create_app(AppState { gate }).await;

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
