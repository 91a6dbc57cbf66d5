use crate::{action::Action, command::Command, event::*, plugin::*, text};
use anyhow::Result;
use serenity::all::ChannelId;

/// Administration of auto-reply channels.  Discord only lets members with Manage Channels run
/// these commands, so no permission check happens here.
pub struct Channels;

fn mention(channel_id: ChannelId) -> String {
    format!("<#{}>", channel_id)
}

#[serenity::async_trait]
impl Plugin for Channels {
    fn name(&self) -> &'static str {
        "channels"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Command(invocation) = event else {
            return Ok(EventHandled::No);
        };
        if !invocation.command.is_admin() {
            return Ok(EventHandled::No);
        }

        let Some(guild_id) = invocation.guild_id else {
            ctx.gateway
                .perform(Action::respond_ephemeral(text::GUILD_ONLY))
                .await?;
            return Ok(EventHandled::Yes);
        };

        let reply = {
            let mut vstate = ctx.vstate.write().await;
            let auto_reply = &mut vstate.auto_reply;
            match invocation.command {
                Command::SetChannel { channel } => {
                    auto_reply.enable(guild_id, channel);
                    text::channel_enabled(&mention(channel))
                }
                Command::RemoveChannel { channel } => {
                    auto_reply.disable(guild_id, channel);
                    text::channel_disabled(&mention(channel))
                }
                Command::ListChannels => {
                    let channels = auto_reply.list(guild_id);
                    if channels.is_empty() {
                        text::CHANNELS_NONE.to_owned()
                    } else {
                        let list: Vec<String> = channels.into_iter().map(mention).collect();
                        format!("{}\n{}", text::CHANNELS_HEADER, list.join("\n"))
                    }
                }
                Command::ClearAllChannels => {
                    auto_reply.clear_guild(guild_id);
                    text::CHANNELS_CLEARED.to_owned()
                }
                _ => return Ok(EventHandled::No),
            }
        };

        ctx.gateway.perform(Action::respond_ephemeral(reply)).await?;
        Ok(EventHandled::Yes)
    }
}
