use crate::{event::*, log_event, logging::*, plugin::*};
use anyhow::Result;

/// Prints debug information about event to stdout
pub struct Debug;

#[serenity::async_trait]
impl Plugin for Debug {
    fn name(&self) -> &'static str {
        "debug"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        match event {
            Event::Ready(ready) => {
                log_event!(
                    "Connected to {} server(s) as {}",
                    ready.guild_count,
                    UserName(&ctx.bot.name).color(),
                );
            }
            Event::Command(invocation) => {
                log_event!(
                    "{}{}{}{}{}{} /{}",
                    invocation.guild_id.color(),
                    Glue.color(),
                    invocation.channel_id.color(),
                    Glue.color(),
                    invocation.author_id.color(),
                    Glue.color(),
                    invocation.command.name(),
                );
            }
            Event::Message(msg) => {
                log_event!(
                    "{}{}{}{}{}{} {}",
                    msg.guild_id.color(),
                    Glue.color(),
                    msg.channel_id.color(),
                    Glue.color(),
                    UserName(&msg.author_name).color(),
                    Glue.color(),
                    msg.text,
                );
            }
        }

        Ok(EventHandled::No)
    }
}
