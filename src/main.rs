mod action;
mod command;
mod config;
mod context;
mod event;
mod handler;
mod health;
mod helper;
mod llm;
mod logging;
mod plugin;
mod responder;
mod text;
mod volatile_state;

#[cfg(test)]
mod test_support;

use serenity::{all::GatewayIntents, Client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    std::panic::set_hook(Box::new(|info| tracing::error!("Panic: {}", info)));

    let cfg = config::Config::load()
        .await
        .inspect_err(|err| tracing::error!("Could not load configuration: {:#}", err))?;
    let token = cfg.general.discord_token.clone();
    let vstate = volatile_state::VolatileState::new(cfg.history.max_turns);
    let backend = llm::Gemini::new(&cfg.gemini)?;

    let health = health::AppState::new();
    tokio::spawn(health::serve(health.clone(), cfg.health.port));

    let handler = handler::Handler::new(cfg, vstate, Box::new(backend), health);

    // Things we want discord to tell us about.
    let intents = GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await?;
    client
        .data
        .write()
        .await
        .insert::<handler::ShardManagerContainer>(client.shard_manager.clone());

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutting down");
        shard_manager.shutdown_all().await;
    });

    client.start().await.map_err(Into::into)
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Could not listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Could not listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
