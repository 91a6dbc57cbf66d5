//! Outbound work produced by plugins.  Plugins never talk to Discord directly; they hand actions
//! to the event's gateway, which carries them out in order.

use crate::{config, helper::ContentHelper};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Publish the slash command schema
    RegisterCommands,
    /// Set the "Playing ..." status
    SetPresence(String),
    /// Initial response to a slash command
    Respond { body: Body, ephemeral: bool },
    /// Acknowledge a slash command; the answer follows via `EditResponse`
    Defer,
    /// Replace the content of the initial response
    EditResponse(String),
    /// Additional message after the initial response
    FollowUp(String),
    /// Measure and report latency for `/ping`
    Pong,
    /// Reply to the triggering message
    Reply(String),
    /// Send a plain message to the triggering message's channel
    Say(String),
    /// Show the typing indicator
    Typing,
    Pause(Duration),
    /// Tell the user something went wrong, in whatever way suits the event
    Fail,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Text(String),
    Embed(Embed),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Embed {
    pub color: u32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    /// Stamp with the time of sending
    pub timestamp: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Action {
    pub fn respond_ephemeral(text: impl Into<String>) -> Self {
        Action::Respond {
            body: Body::Text(text.into()),
            ephemeral: true,
        }
    }
}

/// Deliver a (possibly long) answer to a deferred slash command.
pub fn command_answer(text: &str, cfg: &config::Reply) -> Vec<Action> {
    text.split_for_discord(cfg.message_limit, cfg.chunk_size)
        .into_iter()
        .enumerate()
        .map(|(i, segment)| match i {
            0 => Action::EditResponse(segment),
            _ => Action::FollowUp(segment),
        })
        .collect()
}

/// Deliver a (possibly long) answer to a channel message.  Segments after the first are paced to
/// stay clear of Discord's rate limits.
pub fn message_answer(text: &str, cfg: &config::Reply) -> Vec<Action> {
    let mut actions = Vec::new();
    for (i, segment) in text
        .split_for_discord(cfg.message_limit, cfg.chunk_size)
        .into_iter()
        .enumerate()
    {
        if i == 0 {
            actions.push(Action::Reply(segment));
        } else {
            actions.push(Action::Pause(cfg.follow_up_delay()));
            actions.push(Action::Say(segment));
        }
    }
    actions
}
