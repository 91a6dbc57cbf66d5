use crate::{action::Action, event::*, plugin::*};
use anyhow::Result;

/// Publishes slash commands and presence once the connection to Discord is ready.
pub struct Ready;

#[serenity::async_trait]
impl Plugin for Ready {
    fn name(&self) -> &'static str {
        "ready"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Ready(_) = event else {
            return Ok(EventHandled::No);
        };

        // A failed registration leaves the previously registered commands in place, so carry on.
        if let Err(err) = ctx.gateway.perform(Action::RegisterCommands).await {
            tracing::error!("Could not register slash commands: {:#}", err);
        }
        ctx.gateway
            .perform(Action::SetPresence(ctx.cfg.general.presence.clone()))
            .await?;

        Ok(EventHandled::Yes)
    }
}
