use crate::{
    action, action::Action, event::*, helper::ContentHelper, log_internal, plugin::*, responder,
    text,
};
use anyhow::Result;

/// Replies to messages addressed to the bot, and to everything in auto-reply channels
pub struct Chat;

#[serenity::async_trait]
impl Plugin for Chat {
    fn name(&self) -> &'static str {
        "chat"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Message(msg) = event else {
            return Ok(EventHandled::No);
        };

        if msg.text.trim().is_empty() || !is_for_me(ctx, msg).await {
            return Ok(EventHandled::No);
        }

        let question = msg.text.strip_mentions();
        if question.is_empty() {
            ctx.gateway
                .perform(Action::Reply(text::GREETING.to_owned()))
                .await?;
            return Ok(EventHandled::Yes);
        }

        ctx.gateway.perform(Action::Typing).await?;
        let answer = responder::respond(ctx, msg.author_id, &question).await;
        for action in action::message_answer(&answer, &ctx.cfg.reply) {
            ctx.gateway.perform(action).await?;
        }
        Ok(EventHandled::Yes)
    }
}

/// Whether a message should be answered: it mentions the bot, is in an auto-reply channel, or
/// replies to something the bot said.
async fn is_for_me(ctx: &Context<'_>, msg: &InboundMessage) -> bool {
    if msg.mentions.contains(&ctx.bot.id) {
        return true;
    }

    if let Some(guild_id) = msg.guild_id {
        if ctx
            .vstate
            .read()
            .await
            .auto_reply
            .is_enabled(guild_id, msg.channel_id)
        {
            return true;
        }
    }

    let Some(reference) = msg.reference else {
        return false;
    };
    // Deleted or inaccessible messages simply aren't replies to the bot.
    match ctx.gateway.message_author(msg.channel_id, reference).await {
        Ok(author_id) => author_id == ctx.bot.id,
        Err(err) => {
            log_internal!("Could not resolve replied-to message {}: {:#}", reference, err);
            false
        }
    }
}
