//! Miscellaneous convenience methods

use regex::Regex;
use std::sync::LazyLock;

/// User mention markup, e.g. `<@1234567890>` or the legacy nickname form `<@!1234567890>`
static USER_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<@!?\d+>").expect("constant pattern"));

pub trait ContentHelper {
    /// Remove user mention markup and surrounding whitespace.
    fn strip_mentions(&self) -> String;
    /// Split text into Discord-postable segments.  Text of at most `limit` characters is one
    /// segment; longer text is cut every `chunk_size` characters, even mid-word.
    fn split_for_discord(&self, limit: usize, chunk_size: usize) -> Vec<String>;
}

impl ContentHelper for str {
    fn strip_mentions(&self) -> String {
        USER_MENTION.replace_all(self, "").trim().to_owned()
    }

    fn split_for_discord(&self, limit: usize, chunk_size: usize) -> Vec<String> {
        // Discord counts characters, not bytes.
        if self.chars().count() <= limit {
            return vec![self.to_owned()];
        }

        let chars: Vec<char> = self.chars().collect();
        chars
            .chunks(chunk_size.max(1))
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_mentions() {
        assert_eq!("<@123> hello".strip_mentions(), "hello");
        assert_eq!("hey <@!456>, and <@789>!".strip_mentions(), "hey , and !");
        assert_eq!("<@123>".strip_mentions(), "");
        assert_eq!("  plain text  ".strip_mentions(), "plain text");
    }

    #[test]
    fn test_strip_mentions_keeps_roles_and_channels() {
        assert_eq!("<@&42> see <#7>".strip_mentions(), "<@&42> see <#7>");
    }

    #[test]
    fn test_split_at_limit_is_single_segment() {
        let text = "a".repeat(2000);
        let segments = text.split_for_discord(2000, 1900);
        assert_eq!(segments, vec![text]);
    }

    #[test]
    fn test_split_over_limit() {
        let text = "b".repeat(2001);
        let segments = text.split_for_discord(2000, 1900);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].chars().count(), 1900);
        assert_eq!(segments[1].chars().count(), 101);
        assert_eq!(segments.concat(), text);
    }

    #[test]
    fn test_split_preserves_text_exactly() {
        // Multi-byte characters and newlines must survive untouched.
        let text = "مرحبا\nworld 🌍 ".repeat(400);
        let segments = text.split_for_discord(2000, 1900);
        assert!(segments.len() >= 2);
        assert!(segments.iter().all(|s| s.chars().count() <= 1900));
        assert_eq!(segments.concat(), text);
    }

    #[test]
    fn test_split_empty() {
        assert_eq!("".split_for_discord(2000, 1900), vec![String::new()]);
    }
}
