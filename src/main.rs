use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use voice_assist::config::VoiceConfig;
use voice_assist::pipeline::{ConversationTurn, TurnProcessor};
use voice_assist::publish::ws::chat_routes;
use voice_assist::publish::{BroadcastPublisher, EventPublisher};
use voice_assist::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = VoiceConfig::from_env()?;

    eprintln!("🎙  Voice Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat WS: ws://0.0.0.0:{}/ws/chat", config.ws_port);
    eprintln!("   Feed turns as JSON lines on stdin:");
    eprintln!(r#"   {{"role": "assistant", "text": "...", "is_final": true}}"#);
    eprintln!();

    let publisher = BroadcastPublisher::with_capacity(config.broadcast_capacity);
    let session = Session::spawn(
        TurnProcessor::new(),
        Arc::clone(&publisher) as Arc<dyn EventPublisher>,
        config.session_queue_capacity,
    );

    // UI-facing WebSocket server
    let app = chat_routes(Arc::clone(&publisher));
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.ws_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.ws_port))?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "WebSocket server stopped");
        }
    });

    // Stdin stands in for the dialogue engine: one JSON turn per line.
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<ConversationTurn>(line) {
            Ok(turn) => session
                .submit(turn)
                .await
                .context("session worker is gone")?,
            Err(e) => warn!(error = %e, line, "Unrecognized turn input"),
        }
    }

    session.shutdown().await;
    Ok(())
}
