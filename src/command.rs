//! Slash commands: the typed request each interaction is decoded into, and the schema published
//! to Discord.

use crate::text;
use serenity::all::{
    ChannelId, ChannelType, CommandInteraction, CommandOptionType, CreateCommand,
    CreateCommandOption, GuildId, Permissions, ResolvedValue, UserId,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Ask { question: String },
    Clear,
    Ping,
    SetChannel { channel: ChannelId },
    RemoveChannel { channel: ChannelId },
    ListChannels,
    ClearAllChannels,
}

/// A decoded slash command together with where it came from
#[derive(Clone, Debug)]
pub struct Invocation {
    pub command: Command,
    pub author_id: UserId,
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
}

/// Option value as far as our commands care
#[derive(Clone, Copy, Debug)]
pub enum OptionValue<'a> {
    String(&'a str),
    Channel(ChannelId),
    Other,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("command `{command}` is missing option `{option}`")]
    MissingOption {
        command: &'static str,
        option: &'static str,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Ask { .. } => "ask",
            Command::Clear => "clear",
            Command::Ping => "ping",
            Command::SetChannel { .. } => "setchannel",
            Command::RemoveChannel { .. } => "removechannel",
            Command::ListChannels => "listchannels",
            Command::ClearAllChannels => "clearallchannels",
        }
    }

    pub fn decode(name: &str, options: &[(&str, OptionValue)]) -> Result<Self, DecodeError> {
        let string = |command: &'static str, option: &'static str| {
            options
                .iter()
                .find_map(|(n, v)| match v {
                    OptionValue::String(s) if *n == option => Some(s.to_string()),
                    _ => None,
                })
                .ok_or(DecodeError::MissingOption { command, option })
        };
        let channel = |command: &'static str, option: &'static str| {
            options
                .iter()
                .find_map(|(n, v)| match v {
                    OptionValue::Channel(id) if *n == option => Some(*id),
                    _ => None,
                })
                .ok_or(DecodeError::MissingOption { command, option })
        };

        Ok(match name {
            "help" => Command::Help,
            "ask" => Command::Ask {
                question: string("ask", "question")?,
            },
            "clear" => Command::Clear,
            "ping" => Command::Ping,
            "setchannel" => Command::SetChannel {
                channel: channel("setchannel", "channel")?,
            },
            "removechannel" => Command::RemoveChannel {
                channel: channel("removechannel", "channel")?,
            },
            "listchannels" => Command::ListChannels,
            "clearallchannels" => Command::ClearAllChannels,
            other => return Err(DecodeError::Unknown(other.to_owned())),
        })
    }

    /// Whether the command changes server configuration.  Discord enforces the permission.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Command::SetChannel { .. }
                | Command::RemoveChannel { .. }
                | Command::ListChannels
                | Command::ClearAllChannels
        )
    }
}

impl Invocation {
    pub fn decode(interaction: &CommandInteraction) -> Result<Self, DecodeError> {
        let resolved = interaction.data.options();
        let options: Vec<(&str, OptionValue)> = resolved
            .iter()
            .map(|opt| {
                let value = match &opt.value {
                    ResolvedValue::String(s) => OptionValue::String(s),
                    ResolvedValue::Channel(c) => OptionValue::Channel(c.id),
                    _ => OptionValue::Other,
                };
                (opt.name, value)
            })
            .collect();

        Ok(Self {
            command: Command::decode(&interaction.data.name, &options)?,
            author_id: interaction.user.id,
            guild_id: interaction.guild_id,
            channel_id: interaction.channel_id,
        })
    }
}

/// Slash command definitions registered globally on startup
pub fn schema() -> Vec<CreateCommand> {
    let admin = |name: &str, description: &str| {
        CreateCommand::new(name)
            .description(description)
            .default_member_permissions(Permissions::MANAGE_CHANNELS)
            .dm_permission(false)
    };
    let channel_option = |description: &str| {
        CreateCommandOption::new(CommandOptionType::Channel, "channel", description)
            .channel_types(vec![ChannelType::Text])
            .required(true)
    };

    vec![
        CreateCommand::new("help").description(text::DESC_HELP),
        CreateCommand::new("ask")
            .description(text::DESC_ASK)
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    text::DESC_ASK_QUESTION,
                )
                .required(true),
            ),
        CreateCommand::new("clear").description(text::DESC_CLEAR),
        CreateCommand::new("ping").description(text::DESC_PING),
        admin("setchannel", text::DESC_SETCHANNEL)
            .add_option(channel_option(text::DESC_SETCHANNEL_CHANNEL)),
        admin("removechannel", text::DESC_REMOVECHANNEL)
            .add_option(channel_option(text::DESC_REMOVECHANNEL_CHANNEL)),
        admin("listchannels", text::DESC_LISTCHANNELS),
        admin("clearallchannels", text::DESC_CLEARALLCHANNELS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_commands() {
        assert_eq!(Command::decode("help", &[]).unwrap(), Command::Help);
        assert_eq!(Command::decode("clear", &[]).unwrap(), Command::Clear);
        assert_eq!(Command::decode("ping", &[]).unwrap(), Command::Ping);
        assert_eq!(
            Command::decode("listchannels", &[]).unwrap(),
            Command::ListChannels
        );
        assert_eq!(
            Command::decode("clearallchannels", &[]).unwrap(),
            Command::ClearAllChannels
        );
    }

    #[test]
    fn test_decode_options() {
        let ask = Command::decode("ask", &[("question", OptionValue::String("why?"))]).unwrap();
        assert_eq!(
            ask,
            Command::Ask {
                question: "why?".into()
            }
        );

        let channel = ChannelId::new(42);
        let set =
            Command::decode("setchannel", &[("channel", OptionValue::Channel(channel))]).unwrap();
        assert_eq!(set, Command::SetChannel { channel });
        let remove =
            Command::decode("removechannel", &[("channel", OptionValue::Channel(channel))])
                .unwrap();
        assert_eq!(remove, Command::RemoveChannel { channel });
    }

    #[test]
    fn test_decode_missing_or_mistyped_option() {
        assert!(matches!(
            Command::decode("ask", &[]),
            Err(DecodeError::MissingOption {
                command: "ask",
                option: "question"
            })
        ));
        assert!(matches!(
            Command::decode("setchannel", &[("channel", OptionValue::String("general"))]),
            Err(DecodeError::MissingOption { .. })
        ));
    }

    #[test]
    fn test_decode_unknown() {
        assert!(matches!(
            Command::decode("xkcd", &[]),
            Err(DecodeError::Unknown(name)) if name == "xkcd"
        ));
    }

    #[test]
    fn test_command_names_match_schema() {
        let names: Vec<&str> = [
            Command::Help,
            Command::Ask {
                question: String::new(),
            },
            Command::Clear,
            Command::Ping,
            Command::SetChannel {
                channel: ChannelId::new(1),
            },
            Command::RemoveChannel {
                channel: ChannelId::new(1),
            },
            Command::ListChannels,
            Command::ClearAllChannels,
        ]
        .iter()
        .map(Command::name)
        .collect();
        assert_eq!(
            names,
            [
                "help",
                "ask",
                "clear",
                "ping",
                "setchannel",
                "removechannel",
                "listchannels",
                "clearallchannels"
            ]
        );
        assert_eq!(schema().len(), names.len());
    }

    #[test]
    fn test_schema_restricts_admin_commands() {
        let schema = serde_json::to_value(schema()).unwrap();
        let commands = schema.as_array().unwrap();
        let command = |name: &str| {
            commands
                .iter()
                .find(|c| c["name"] == name)
                .unwrap_or_else(|| panic!("no /{} in schema", name))
        };

        for name in ["setchannel", "removechannel", "listchannels", "clearallchannels"] {
            assert_eq!(command(name)["default_member_permissions"], "16", "/{}", name);
            assert_eq!(command(name)["dm_permission"], false, "/{}", name);
        }
        for name in ["help", "ask", "clear", "ping"] {
            assert!(command(name)["default_member_permissions"].is_null(), "/{}", name);
            assert!(command(name)["dm_permission"].is_null(), "/{}", name);
        }

        for name in ["setchannel", "removechannel"] {
            let option = &command(name)["options"][0];
            assert_eq!(option["name"], "channel");
            assert_eq!(option["required"], true);
            assert_eq!(option["channel_types"], serde_json::json!([0]));
        }
        let question = &command("ask")["options"][0];
        assert_eq!(question["name"], "question");
        assert_eq!(question["required"], true);
    }

    #[test]
    fn test_admin_commands() {
        assert!(Command::ListChannels.is_admin());
        assert!(Command::SetChannel {
            channel: ChannelId::new(1)
        }
        .is_admin());
        assert!(!Command::Clear.is_admin());
        assert!(!Command::Ping.is_admin());
    }
}
