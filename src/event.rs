//! The Serenity crate we're using for the Discord API is designed around callbacks to handle
//! events.  However, this does not mesh well with our plugin framework here.  To resolve this,
//! the handler translates the callbacks into a distinct Event enum made only of our own types.

use crate::{action::Action, command::Invocation, context::Context};
use serenity::all::{ChannelId, GuildId, MessageId, UserId};

/// A Discord event
pub enum Event {
    Ready(ReadyInfo),
    Command(Invocation),
    Message(InboundMessage),
}

pub struct ReadyInfo {
    pub guild_count: usize,
}

/// A plain (non-command) channel message
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub author_id: UserId,
    pub author_name: String,
    pub author_is_bot: bool,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub text: String,
    /// Users mentioned in the message
    pub mentions: Vec<UserId>,
    /// Message this one replies to
    pub reference: Option<MessageId>,
}

impl From<&serenity::all::Message> for InboundMessage {
    fn from(msg: &serenity::all::Message) -> Self {
        Self {
            author_id: msg.author.id,
            author_name: msg.author.name.clone(),
            author_is_bot: msg.author.bot,
            guild_id: msg.guild_id,
            channel_id: msg.channel_id,
            text: msg.content.clone(),
            mentions: msg.mentions.iter().map(|user| user.id).collect(),
            reference: msg
                .message_reference
                .as_ref()
                .and_then(|reference| reference.message_id),
        }
    }
}

impl Event {
    // When an event occurs, iterate over all the plugins to see if any can/should handle it.
    //
    // This is the isolation boundary for a single event: errors end here.
    pub async fn handle(&self, ctx: &Context<'_>) {
        for plugin in crate::plugin::plugins() {
            match plugin.handle(ctx, self).await {
                Ok(EventHandled::Yes) => return,
                Ok(EventHandled::No) => continue,
                Err(err) => {
                    tracing::error!("Error in plugin {}: {:#}", plugin.name(), err);
                    if let Err(err) = ctx.gateway.perform(Action::Fail).await {
                        tracing::warn!("Could not report error to user: {:#}", err);
                    }
                    return;
                }
            }
        }
    }
}

pub enum EventHandled {
    Yes,
    No,
}
