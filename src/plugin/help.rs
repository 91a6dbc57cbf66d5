use crate::{
    action::{Action, Body, Embed, EmbedField},
    command::Command,
    event::*,
    plugin::*,
    text,
};
use anyhow::Result;

pub struct Help;

#[serenity::async_trait]
impl Plugin for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    async fn handle(&self, ctx: &Context, event: &Event) -> Result<EventHandled> {
        let Event::Command(invocation) = event else {
            return Ok(EventHandled::No);
        };
        let Command::Help = invocation.command else {
            return Ok(EventHandled::No);
        };

        let embed = Embed {
            color: text::HELP_COLOR,
            title: text::HELP_TITLE.to_owned(),
            description: Some(text::HELP_DESCRIPTION.to_owned()),
            thumbnail: Some(ctx.bot.avatar_url.clone()),
            fields: text::HELP_FIELDS
                .iter()
                .map(|(name, value)| EmbedField {
                    name: (*name).to_owned(),
                    value: (*value).to_owned(),
                    inline: false,
                })
                .collect(),
            footer: Some(text::HELP_FOOTER.to_owned()),
            timestamp: true,
        };

        ctx.gateway
            .perform(Action::Respond {
                body: Body::Embed(embed),
                ephemeral: false,
            })
            .await?;
        Ok(EventHandled::Yes)
    }
}
