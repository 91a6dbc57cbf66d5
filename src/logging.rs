//! Logging to the terminal with colors

use serenity::all::{ChannelId, GuildId, UserId};
use std::io::IsTerminal;
use std::sync::LazyLock;

const DEFAULT: &str = "\x1b[0m";
const FG_BLUE: &str = "\x1b[38;5;33m";
const FG_CYAN: &str = "\x1b[36m";
const FG_GRAY: &str = "\x1b[90m";
const FG_GREEN: &str = "\x1b[32m";
const FG_MAGENTA: &str = "\x1b[35m";
const FG_YELLOW: &str = "\x1b[33m";

const DEFAULT_FILTER: &str = "gemibot=info,serenity=warn";

pub enum Color {
    Default,
    Event,
    Internal,
    User,
    Channel,
    Guild,
    Glue,
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Only print colors when printing to a terminal
        //
        // This won't change during the program's execution, so we can cache it.
        static STDOUT_IS_TERMINAL: LazyLock<bool> =
            LazyLock::new(|| std::io::stdout().is_terminal());

        if !*STDOUT_IS_TERMINAL {
            return Ok(());
        }

        write!(
            f,
            "{}",
            match self {
                Color::Default => DEFAULT,
                Color::Event => FG_YELLOW,
                Color::Internal => FG_MAGENTA,
                Color::User => FG_GREEN,
                Color::Channel => FG_CYAN,
                Color::Guild => FG_BLUE,
                Color::Glue => FG_GRAY,
            }
        )
    }
}

/// Install the global `tracing` subscriber.  `RUST_LOG` overrides the default filter.
pub fn init() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Log a Discord event
#[macro_export]
macro_rules! log_event {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        tracing::info!(
            "{}",
            format!(
                concat!("{}*{} ", $fmtstr),
                $crate::logging::Color::Event,
                $crate::logging::Color::Default
            )
        )
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        tracing::info!(
            "{}",
            format!(
                concat!("{}*{} ", $fmtstr),
                $crate::logging::Color::Event,
                $crate::logging::Color::Default,
                $($args),*
            )
        )
    }};
}

/// Log something the bot itself is doing
#[macro_export]
macro_rules! log_internal {
    // Case: Only format string, no arguments
    ($fmtstr:expr) => {{
        tracing::debug!(
            "{}",
            format!(
                concat!("{}+{} ", $fmtstr),
                $crate::logging::Color::Internal,
                $crate::logging::Color::Default
            )
        )
    }};

    // Case: Format string with arguments, with optional trailing comma
    ($fmtstr:expr, $($args:expr),* $(,)?) => {{
        tracing::debug!(
            "{}",
            format!(
                concat!("{}+{} ", $fmtstr),
                $crate::logging::Color::Internal,
                $crate::logging::Color::Default,
                $($args),*
            )
        )
    }};
}

pub trait PrintColor {
    fn color(&self) -> String;
}

// Field separator
pub struct Glue;
impl PrintColor for Glue {
    fn color(&self) -> String {
        format!("{}{}{}", Color::Glue, ":", Color::Default)
    }
}

impl PrintColor for UserId {
    fn color(&self) -> String {
        format!("{}{}{}", Color::User, self, Color::Default)
    }
}

impl PrintColor for ChannelId {
    fn color(&self) -> String {
        format!("{}#{}{}", Color::Channel, self, Color::Default)
    }
}

impl PrintColor for Option<GuildId> {
    fn color(&self) -> String {
        match self {
            Some(guild_id) => format!("{}{}{}", Color::Guild, guild_id, Color::Default),
            None => format!("{}<direct-message>{}", Color::Guild, Color::Default),
        }
    }
}

/// A display name, colored as a user
pub struct UserName<'a>(pub &'a str);
impl PrintColor for UserName<'_> {
    fn color(&self) -> String {
        format!("{}{}{}", Color::User, self.0, Color::Default)
    }
}
