use crate::{action::Action, config::Config, llm::Backend, volatile_state::VolatileState};
use anyhow::Result;
use serenity::all::{ChannelId, MessageId, UserId};
use tokio::sync::RwLock;

/// Collection of data that is shared across events
pub struct Context<'a> {
    // Gemibot's own context types
    pub cfg: &'a Config,
    pub vstate: &'a RwLock<VolatileState>,
    pub backend: &'a dyn Backend,
    // Discord side of the event being handled
    pub gateway: &'a dyn Gateway,
    pub bot: &'a Bot,
}

/// The bot's own Discord identity
#[derive(Clone, Debug)]
pub struct Bot {
    pub id: UserId,
    pub name: String,
    pub avatar_url: String,
}

/// Discord, as seen from the handling of a single event.
#[serenity::async_trait]
pub trait Gateway: Send + Sync {
    /// Carry out an action in response to the current event.
    async fn perform(&self, action: Action) -> Result<()>;
    /// Look up who wrote a message.
    async fn message_author(&self, channel_id: ChannelId, message_id: MessageId) -> Result<UserId>;
}
