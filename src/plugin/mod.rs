use crate::{context::Context, event::EventHandled};
use anyhow::Result;

mod ask;
mod channels;
mod chat;
mod clear;
mod debug;
mod help;
mod ignore_bots;
mod ping;
mod ready;

#[serenity::async_trait]
pub trait Plugin: Sync + Send {
    /// Plugin name.  Used for debug
    fn name(&self) -> &'static str;
    /// Potentially handle event.  Returns:
    /// - Ok(EventHandled::Yes) if the event has been handled and no other plugin should attempt to
    ///   handle it
    /// - Ok(EventHandled::No) if another plugin should attempt to handle the event
    /// - Err if an error occurred
    async fn handle(&self, ctx: &Context, event: &crate::event::Event) -> Result<EventHandled>;
}

/// Ordered list of available plugins
pub fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        // Core bot operations
        Box::new(debug::Debug),
        Box::new(ready::Ready),
        Box::new(ignore_bots::IgnoreBots),
        // Slash commands
        Box::new(help::Help),
        Box::new(ask::Ask),
        Box::new(clear::Clear),
        Box::new(ping::Ping),
        Box::new(channels::Channels),
        // Passive replies to mentions, replies and auto-reply channels.
        // Keep last.
        Box::new(chat::Chat),
    ]
}
