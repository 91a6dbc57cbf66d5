use serenity::all::{ChannelId, GuildId, UserId};
use std::collections::{BTreeSet, HashMap};

/// State which is lost across sessions
pub struct VolatileState {
    pub history: History,
    pub auto_reply: AutoReply,
}

impl VolatileState {
    pub fn new(max_turns: usize) -> Self {
        Self {
            history: History::new(max_turns),
            auto_reply: AutoReply::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message of a conversation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    #[cfg(test)]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// Per-user conversation history, bounded to `max_turns` question/answer pairs.
pub struct History {
    max_turns: usize,
    entries: HashMap<UserId, Vec<Turn>>,
}

impl History {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns,
            entries: HashMap::new(),
        }
    }

    pub fn get_or_create(&mut self, user_id: UserId) -> &mut Vec<Turn> {
        self.entries.entry(user_id).or_default()
    }

    /// Stored turns for a user.  Does not create an entry.
    pub fn turns(&self, user_id: UserId) -> &[Turn] {
        self.entries.get(&user_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn append(&mut self, user_id: UserId, role: Role, text: impl Into<String>) {
        let max_entries = self.max_turns.saturating_mul(2);
        let history = self.get_or_create(user_id);
        history.push(Turn {
            role,
            text: text.into(),
        });

        // Evict a whole question/answer pair so the history never starts on a model turn.
        if history.len() > max_entries {
            let evict = history.len().min(2);
            history.drain(..evict);
        }
    }

    /// Record a completed exchange.  Both turns land together so concurrent exchanges for the
    /// same user cannot interleave inside a pair.
    pub fn record_exchange(&mut self, user_id: UserId, question: &str, answer: &str) {
        self.append(user_id, Role::User, question);
        self.append(user_id, Role::Model, answer);
    }

    pub fn clear(&mut self, user_id: UserId) {
        self.entries.remove(&user_id);
    }

    #[cfg(test)]
    pub fn contains(&self, user_id: UserId) -> bool {
        self.entries.contains_key(&user_id)
    }
}

/// Per-guild set of channels where the bot answers every message.
pub struct AutoReply(HashMap<GuildId, BTreeSet<ChannelId>>);

impl AutoReply {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn is_enabled(&self, guild_id: GuildId, channel_id: ChannelId) -> bool {
        self.0
            .get(&guild_id)
            .is_some_and(|channels| channels.contains(&channel_id))
    }

    pub fn enable(&mut self, guild_id: GuildId, channel_id: ChannelId) {
        self.0.entry(guild_id).or_default().insert(channel_id);
    }

    pub fn disable(&mut self, guild_id: GuildId, channel_id: ChannelId) {
        use std::collections::hash_map::Entry::*;
        if let Occupied(mut entry) = self.0.entry(guild_id) {
            entry.get_mut().remove(&channel_id);
            if entry.get().is_empty() {
                entry.remove();
            }
        }
    }

    pub fn clear_guild(&mut self, guild_id: GuildId) {
        self.0.remove(&guild_id);
    }

    pub fn list(&self, guild_id: GuildId) -> BTreeSet<ChannelId> {
        self.0.get(&guild_id).cloned().unwrap_or_default()
    }
}
