use crate::{
    action::{Action, Body, Embed, EmbedField},
    command::{self, Invocation},
    config::Config,
    context::{Bot, Context, Gateway},
    event::{Event, InboundMessage, ReadyInfo},
    health::AppState,
    llm::Backend,
    text,
    volatile_state::VolatileState,
};
use anyhow::{anyhow, Result};
use serenity::all::{
    ActivityData, ChannelId, CommandInteraction, CreateEmbed, CreateEmbedFooter,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CurrentUser, EditInteractionResponse, Interaction, Message,
    MessageId, Ready, ShardManager, Timestamp, UserId,
};
use serenity::prelude::TypeMapKey;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Gives event handlers access to shard latencies
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// Discord event handler
pub struct Handler {
    cfg: Config,
    vstate: RwLock<VolatileState>,
    backend: Box<dyn Backend>,
    health: AppState,
}

impl<'a> Handler {
    pub fn new(
        cfg: Config,
        vstate: VolatileState,
        backend: Box<dyn Backend>,
        health: AppState,
    ) -> Self {
        Self {
            cfg,
            vstate: RwLock::new(vstate),
            backend,
            health,
        }
    }

    fn ctx(&'a self, gateway: &'a dyn Gateway, bot: &'a Bot) -> Context<'a> {
        Context {
            cfg: &self.cfg,
            vstate: &self.vstate,
            backend: &*self.backend,
            gateway,
            bot,
        }
    }
}

fn bot(user: &CurrentUser) -> Bot {
    Bot {
        id: user.id,
        name: user.name.clone(),
        avatar_url: user.face(),
    }
}

#[serenity::async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, discord_ctx: serenity::all::Context, ready: Ready) {
        self.health.set_bot_username(ready.user.name.clone()).await;
        let bot = bot(&ready.user);
        let gateway = DiscordGateway::new(&discord_ctx, Origin::Ready);
        Event::Ready(ReadyInfo {
            guild_count: ready.guilds.len(),
        })
        .handle(&self.ctx(&gateway, &bot))
        .await;
    }

    async fn message(&self, discord_ctx: serenity::all::Context, msg: Message) {
        let bot = bot(&discord_ctx.cache.current_user());
        let gateway = DiscordGateway::new(&discord_ctx, Origin::Message(&msg));
        Event::Message(InboundMessage::from(&msg))
            .handle(&self.ctx(&gateway, &bot))
            .await;
    }

    async fn interaction_create(&self, discord_ctx: serenity::all::Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        let bot = bot(&discord_ctx.cache.current_user());
        let gateway = DiscordGateway::new(&discord_ctx, Origin::Command(&command));
        match Invocation::decode(&command) {
            Ok(invocation) => {
                Event::Command(invocation)
                    .handle(&self.ctx(&gateway, &bot))
                    .await
            }
            Err(err) => {
                tracing::warn!("Could not decode interaction: {}", err);
                if let Err(err) = gateway.perform(Action::Fail).await {
                    tracing::warn!("Could not report error to user: {:#}", err);
                }
            }
        }
    }
}

/// What triggered the event being handled
enum Origin<'a> {
    Ready,
    Command(&'a CommandInteraction),
    Message(&'a Message),
}

/// Carries out actions against the Discord API on behalf of one event
struct DiscordGateway<'a> {
    ctx: &'a serenity::all::Context,
    origin: Origin<'a>,
    /// Whether the interaction has received its initial response
    responded: AtomicBool,
}

impl<'a> DiscordGateway<'a> {
    fn new(ctx: &'a serenity::all::Context, origin: Origin<'a>) -> Self {
        Self {
            ctx,
            origin,
            responded: AtomicBool::new(false),
        }
    }

    fn interaction(&self) -> Result<&'a CommandInteraction> {
        match self.origin {
            Origin::Command(interaction) => Ok(interaction),
            _ => Err(anyhow!("not handling a slash command")),
        }
    }

    fn message(&self) -> Result<&'a Message> {
        match self.origin {
            Origin::Message(msg) => Ok(msg),
            _ => Err(anyhow!("not handling a message")),
        }
    }

    async fn respond(&self, response: CreateInteractionResponse) -> Result<()> {
        self.interaction()?
            .create_response(self.ctx, response)
            .await?;
        self.responded.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn pong(&self) -> Result<()> {
        let started = Instant::now();
        self.respond(CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new().content(text::PING_PENDING),
        ))
        .await?;
        let reply_latency = started.elapsed();

        let embed = Embed {
            color: text::PING_COLOR,
            title: text::PING_TITLE.to_owned(),
            fields: vec![
                EmbedField {
                    name: text::PING_REPLY_LATENCY.to_owned(),
                    value: millis(Some(reply_latency)),
                    inline: true,
                },
                EmbedField {
                    name: text::PING_GATEWAY_LATENCY.to_owned(),
                    value: millis(self.gateway_latency().await),
                    inline: true,
                },
            ],
            timestamp: true,
            ..Default::default()
        };
        self.interaction()?
            .edit_response(
                self.ctx,
                EditInteractionResponse::new()
                    .content("")
                    .embed(create_embed(embed)),
            )
            .await?;
        Ok(())
    }

    /// Heartbeat latency of the shard this event arrived on, once one has been measured
    async fn gateway_latency(&self) -> Option<Duration> {
        let shard_manager = self
            .ctx
            .data
            .read()
            .await
            .get::<ShardManagerContainer>()?
            .clone();
        let runners = shard_manager.runners.lock().await;
        runners.get(&self.ctx.shard_id)?.latency
    }

    async fn fail(&self) -> Result<()> {
        match self.origin {
            Origin::Ready => Ok(()),
            Origin::Message(msg) => {
                msg.reply(self.ctx, text::MESSAGE_ERROR).await?;
                Ok(())
            }
            Origin::Command(interaction) => {
                match FailureNotice::after(self.responded.load(Ordering::Relaxed)) {
                    FailureNotice::FollowUp => {
                        interaction
                            .create_followup(
                                self.ctx,
                                CreateInteractionResponseFollowup::new()
                                    .content(text::COMMAND_ERROR)
                                    .ephemeral(true),
                            )
                            .await?;
                        Ok(())
                    }
                    FailureNotice::Response => {
                        self.respond(CreateInteractionResponse::Message(
                            CreateInteractionResponseMessage::new()
                                .content(text::COMMAND_ERROR)
                                .ephemeral(true),
                        ))
                        .await
                    }
                }
            }
        }
    }
}

/// How a slash command user learns that handling failed
#[derive(Debug, PartialEq)]
enum FailureNotice {
    /// No response yet, so the error becomes the response
    Response,
    /// An interaction only has one response; anything later is a follow-up
    FollowUp,
}

impl FailureNotice {
    fn after(responded: bool) -> Self {
        if responded {
            FailureNotice::FollowUp
        } else {
            FailureNotice::Response
        }
    }
}

#[serenity::async_trait]
impl Gateway for DiscordGateway<'_> {
    async fn perform(&self, action: Action) -> Result<()> {
        match action {
            Action::RegisterCommands => {
                let registered =
                    serenity::all::Command::set_global_commands(&self.ctx.http, command::schema())
                        .await?;
                tracing::info!("Registered {} slash commands", registered.len());
            }
            Action::SetPresence(presence) => {
                self.ctx.set_activity(Some(ActivityData::playing(presence)));
            }
            Action::Respond { body, ephemeral } => {
                let message = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
                let message = match body {
                    Body::Text(content) => message.content(content),
                    Body::Embed(embed) => message.embed(create_embed(embed)),
                };
                self.respond(CreateInteractionResponse::Message(message))
                    .await?;
            }
            Action::Defer => {
                self.respond(CreateInteractionResponse::Defer(
                    CreateInteractionResponseMessage::new(),
                ))
                .await?;
            }
            Action::EditResponse(content) => {
                self.interaction()?
                    .edit_response(self.ctx, EditInteractionResponse::new().content(content))
                    .await?;
            }
            Action::FollowUp(content) => {
                self.interaction()?
                    .create_followup(
                        self.ctx,
                        CreateInteractionResponseFollowup::new().content(content),
                    )
                    .await?;
            }
            Action::Pong => self.pong().await?,
            Action::Reply(content) => {
                self.message()?.reply(self.ctx, content).await?;
            }
            Action::Say(content) => {
                self.message()?.channel_id.say(self.ctx, content).await?;
            }
            Action::Typing => {
                self.message()?
                    .channel_id
                    .broadcast_typing(&self.ctx.http)
                    .await?;
            }
            Action::Pause(duration) => tokio::time::sleep(duration).await,
            Action::Fail => self.fail().await?,
        }
        Ok(())
    }

    async fn message_author(&self, channel_id: ChannelId, message_id: MessageId) -> Result<UserId> {
        let msg = channel_id.message(self.ctx, message_id).await?;
        Ok(msg.author.id)
    }
}

fn create_embed(embed: Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .colour(embed.color)
        .title(embed.title)
        .fields(
            embed
                .fields
                .into_iter()
                .map(|field| (field.name, field.value, field.inline)),
        );
    if let Some(description) = embed.description {
        builder = builder.description(description);
    }
    if let Some(thumbnail) = embed.thumbnail {
        builder = builder.thumbnail(thumbnail);
    }
    if let Some(footer) = embed.footer {
        builder = builder.footer(CreateEmbedFooter::new(footer));
    }
    if embed.timestamp {
        builder = builder.timestamp(Timestamp::now());
    }
    builder
}

fn millis(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("{}ms", latency.as_millis()),
        None => "N/A".to_owned(),
    }
}
