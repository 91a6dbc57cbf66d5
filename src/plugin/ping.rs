use crate::{action::Action, command::Command, event::*, plugin::*};
use anyhow::Result;

/// Latency check.  The measuring itself happens on the Discord side of the gateway.
pub struct Ping;

#[serenity::async_trait]
impl Plugin for Ping {
    fn name(&self) -> &'static str {
        "ping"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Command(invocation) = event else {
            return Ok(EventHandled::No);
        };
        let Command::Ping = invocation.command else {
            return Ok(EventHandled::No);
        };

        ctx.gateway.perform(Action::Pong).await?;
        Ok(EventHandled::Yes)
    }
}
