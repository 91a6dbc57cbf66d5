use crate::{action, action::Action, command::Command, event::*, plugin::*, responder};
use anyhow::Result;

/// `/ask`: answer a question in the caller's conversation
pub struct Ask;

#[serenity::async_trait]
impl Plugin for Ask {
    fn name(&self) -> &'static str {
        "ask"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Command(invocation) = event else {
            return Ok(EventHandled::No);
        };
        let Command::Ask { question } = &invocation.command else {
            return Ok(EventHandled::No);
        };

        // Discord wants an acknowledgement within three seconds; the model may take longer.
        ctx.gateway.perform(Action::Defer).await?;

        let answer = responder::respond(ctx, invocation.author_id, question).await;
        for action in action::command_answer(&answer, &ctx.cfg.reply) {
            ctx.gateway.perform(action).await?;
        }
        Ok(EventHandled::Yes)
    }
}
