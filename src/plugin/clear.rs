use crate::{action::Action, command::Command, event::*, plugin::*, text};
use anyhow::Result;

/// Forget the caller's conversation
pub struct Clear;

#[serenity::async_trait]
impl Plugin for Clear {
    fn name(&self) -> &'static str {
        "clear"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Command(invocation) = event else {
            return Ok(EventHandled::No);
        };
        let Command::Clear = invocation.command else {
            return Ok(EventHandled::No);
        };

        ctx.vstate.write().await.history.clear(invocation.author_id);
        ctx.gateway
            .perform(Action::respond_ephemeral(text::HISTORY_CLEARED))
            .await?;
        Ok(EventHandled::Yes)
    }
}
