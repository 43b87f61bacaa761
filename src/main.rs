use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use fin_assist::config::AssistConfig;
use fin_assist::engine::{AgentEngine, Trigger};
use fin_assist::journey::{MessageBody, SessionEvent};
use fin_assist::service::service_routes;
use fin_assist::storage::{MemoryStore, ShellSession};

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

    let config = AssistConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    eprintln!("🏦 Fin Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat WS: ws://0.0.0.0:{}/ws", config.port);
    eprintln!("   Chat API: http://0.0.0.0:{}/api/dispatch", config.port);
    eprintln!("   Session API: http://0.0.0.0:{}/api/session", config.port);
    eprintln!("   Type a message and press Enter. /reset clears, /quit exits.\n");

    // ── Shell session ───────────────────────────────────────────────────
    let store = MemoryStore::new();
    let mut shell = ShellSession::load(store.as_ref()).await?;
    shell.authenticated = true;
    shell.save(store.as_ref()).await?;

    // ── Engine + HTTP service ───────────────────────────────────────────
    let port = config.port;
    let engine = Arc::new(AgentEngine::new(config));
    let app = service_routes(Arc::clone(&engine));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("HTTP server error: {e}");
        }
    });

    // ── Transcript printer ──────────────────────────────────────────────
    let mut events = engine.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => print_event(&event),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // ── CLI REPL ────────────────────────────────────────────────────────
    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "/quit" => break,
            "/reset" => engine.reset().await,
            _ => {
                if let Err(e) = engine.dispatch(Trigger::text(line)).await {
                    eprintln!("error: {e}");
                }
            }
        }
        eprint!("> ");
    }

    eprintln!("\nBye!");
    Ok(())
}

/// Render one session event to the terminal transcript.
fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::MessageAppended { message } => match &message.body {
            MessageBody::Agent { text } => println!("\nagent: {text}"),
            MessageBody::InfoCard(card) => {
                println!("\n[{}]", card.title);
                for item in &card.items {
                    println!("  {}: {}", item.label, item.value);
                }
                if let Some(input) = &card.input {
                    println!("  input <{}>: {}", input.id, input.placeholder);
                }
            }
            MessageBody::Interactive { prompt, fields } => {
                if let Some(prompt) = prompt {
                    println!("\n{prompt}");
                }
                for field in fields {
                    println!("  {}: {}", field.label, field.value);
                }
            }
            MessageBody::Confirmation { title, fields } => {
                println!("\n[{title}]");
                for field in fields {
                    println!("  {}: {}", field.label, field.value);
                }
            }
            MessageBody::Offer(offer) => {
                println!("\n[{}] {}", offer.title, offer.highlight);
            }
            MessageBody::Success(card) => {
                println!("\n✔ {}", card.title);
                for line in &card.details {
                    println!("  {line}");
                }
            }
            MessageBody::User { .. } | MessageBody::Thinking { .. } => {}
        },
        SessionEvent::ThinkingUpdated { steps } => {
            if let Some(last) = steps.last() {
                println!("  … {last}");
            }
        }
        SessionEvent::JourneyCompleted { journey } => {
            println!("\n── journey {journey} complete ──");
        }
        _ => {}
    }

    // Offer the available actions after each card
    if let SessionEvent::MessageAppended { message } = event {
        for action in &message.actions {
            println!("  [{}] {}", action.action, action.label);
        }
    }
}
