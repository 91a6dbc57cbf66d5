//! Fakes for exercising plugins without a Discord connection or a model.

use crate::{
    action::Action,
    command::{Command, Invocation},
    config::Config,
    context::{Bot, Context, Gateway},
    event::{Event, InboundMessage},
    llm::{Backend, BackendError},
    volatile_state::{Turn, VolatileState},
};
use anyhow::{anyhow, Result};
use serenity::all::{ChannelId, GuildId, MessageId, UserId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::sync::RwLock;

pub const BOT_ID: UserId = UserId::new(999);
pub const ALICE: UserId = UserId::new(1);
pub const BOB: UserId = UserId::new(2);
pub const GUILD: GuildId = GuildId::new(10);
pub const GENERAL: ChannelId = ChannelId::new(100);
pub const RANDOM: ChannelId = ChannelId::new(101);

#[derive(Clone, Debug)]
pub struct Request {
    pub turns: Vec<Turn>,
    pub system: String,
}

/// Backend answering from a script.  Unscripted requests get "ok".
#[derive(Default)]
pub struct FakeBackend {
    script: Mutex<VecDeque<Option<String>>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeBackend {
    pub fn answer(&self, text: &str) {
        self.script.lock().unwrap().push_back(Some(text.to_owned()));
    }

    pub fn fail(&self) {
        self.script.lock().unwrap().push_back(None);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[serenity::async_trait]
impl Backend for FakeBackend {
    async fn generate(&self, turns: &[Turn], system: &str) -> Result<String, BackendError> {
        self.requests.lock().unwrap().push(Request {
            turns: turns.to_vec(),
            system: system.to_owned(),
        });
        match self.script.lock().unwrap().pop_front() {
            Some(Some(text)) => Ok(text),
            Some(None) => Err(BackendError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                message: "overloaded".into(),
            }),
            None => Ok("ok".into()),
        }
    }
}

type FailWhen = Box<dyn Fn(&Action) -> bool + Send + Sync>;

/// Gateway recording every action it is asked to perform
#[derive(Default)]
pub struct FakeGateway {
    actions: Mutex<Vec<Action>>,
    authors: Mutex<HashMap<MessageId, UserId>>,
    fail_when: Mutex<Option<FailWhen>>,
}

impl FakeGateway {
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    pub fn add_message(&self, message_id: MessageId, author_id: UserId) {
        self.authors.lock().unwrap().insert(message_id, author_id);
    }

    /// Make matching actions fail after being recorded.
    pub fn fail_when(&self, predicate: impl Fn(&Action) -> bool + Send + Sync + 'static) {
        *self.fail_when.lock().unwrap() = Some(Box::new(predicate));
    }
}

#[serenity::async_trait]
impl Gateway for FakeGateway {
    async fn perform(&self, action: Action) -> Result<()> {
        let fails = self
            .fail_when
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|predicate| predicate(&action));
        self.actions.lock().unwrap().push(action);
        if fails {
            return Err(anyhow!("Missing Permissions"));
        }
        Ok(())
    }

    async fn message_author(&self, _channel_id: ChannelId, message_id: MessageId) -> Result<UserId> {
        self.authors
            .lock()
            .unwrap()
            .get(&message_id)
            .copied()
            .ok_or(anyhow!("Unknown Message"))
    }
}

/// Everything a plugin needs, wired to fakes
pub struct Harness {
    pub cfg: Config,
    pub vstate: RwLock<VolatileState>,
    pub backend: FakeBackend,
    pub gateway: FakeGateway,
    pub bot: Bot,
}

impl Harness {
    pub fn new() -> Self {
        let cfg = Config::default();
        let vstate = RwLock::new(VolatileState::new(cfg.history.max_turns));
        Self {
            cfg,
            vstate,
            backend: FakeBackend::default(),
            gateway: FakeGateway::default(),
            bot: Bot {
                id: BOT_ID,
                name: "gemibot".into(),
                avatar_url: "https://cdn.example/avatar.png".into(),
            },
        }
    }

    pub fn ctx(&self) -> Context<'_> {
        Context {
            cfg: &self.cfg,
            vstate: &self.vstate,
            backend: &self.backend,
            gateway: &self.gateway,
            bot: &self.bot,
        }
    }

    pub async fn dispatch(&self, event: Event) -> Vec<Action> {
        event.handle(&self.ctx()).await;
        self.gateway.actions()
    }

    pub async fn command(&self, command: Command) -> Vec<Action> {
        self.dispatch(Event::Command(Invocation {
            command,
            author_id: ALICE,
            guild_id: Some(GUILD),
            channel_id: GENERAL,
        }))
        .await
    }

    pub async fn message(&self, msg: InboundMessage) -> Vec<Action> {
        self.dispatch(Event::Message(msg)).await
    }
}

/// A guild message from Alice in #general
pub fn message(text: &str) -> InboundMessage {
    InboundMessage {
        author_id: ALICE,
        author_name: "alice".into(),
        author_is_bot: false,
        guild_id: Some(GUILD),
        channel_id: GENERAL,
        text: text.to_owned(),
        mentions: Vec::new(),
        reference: None,
    }
}

/// A guild message from Alice which mentions the bot
pub fn mention(text: &str) -> InboundMessage {
    InboundMessage {
        text: format!("<@{}> {}", BOT_ID, text),
        mentions: vec![BOT_ID],
        ..message(text)
    }
}
