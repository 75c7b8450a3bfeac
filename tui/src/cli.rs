use std::time::Duration;

use clap::Parser;
use teletype_core::TypewriterConfig;

const DEFAULT_MESSAGES: [&str; 3] = ["Hello, world", "Welcome to teletype", "Built with Rust"];

/// Animate a rotation of messages as a single-line terminal banner.
#[derive(Debug, Parser)]
#[command(name = "teletype", version, about)]
pub struct Cli {
    /// Message to rotate through; repeat the flag for more. Defaults to a
    /// small built-in rotation.
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,

    /// Milliseconds after each revealed character.
    #[arg(long, default_value_t = 100)]
    pub reveal_ms: u64,

    /// Milliseconds holding a fully revealed message before deleting.
    #[arg(long, default_value_t = 1500)]
    pub hold_ms: u64,

    /// Milliseconds after each deleted character.
    #[arg(long, default_value_t = 50)]
    pub delete_ms: u64,

    /// Milliseconds between one message and the next.
    #[arg(long, default_value_t = 500)]
    pub advance_ms: u64,

    /// Marker printed before the animated text.
    #[arg(long, default_value = "❯ ")]
    pub prefix: String,

    /// Cursor marker printed after the animated text.
    #[arg(long, default_value = "▌")]
    pub cursor: String,
}

impl Cli {
    pub fn messages(&self) -> Vec<String> {
        if self.messages.is_empty() {
            DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            self.messages.clone()
        }
    }

    pub fn typewriter_config(&self) -> TypewriterConfig {
        TypewriterConfig {
            reveal_delay: Duration::from_millis(self.reveal_ms),
            hold_delay: Duration::from_millis(self.hold_ms),
            delete_delay: Duration::from_millis(self.delete_ms),
            advance_delay: Duration::from_millis(self.advance_ms),
            prefix: self.prefix.clone(),
            cursor: self.cursor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_the_classic_pacing() {
        let cli = Cli::parse_from(["teletype"]);
        let config = cli.typewriter_config();
        assert_eq!(config.reveal_delay, Duration::from_millis(100));
        assert_eq!(config.hold_delay, Duration::from_millis(1500));
        assert_eq!(config.delete_delay, Duration::from_millis(50));
        assert_eq!(config.advance_delay, Duration::from_millis(500));
        assert_eq!(cli.messages().len(), DEFAULT_MESSAGES.len());
    }

    #[test]
    fn repeated_message_flags_override_the_default_rotation() {
        let cli = Cli::parse_from(["teletype", "-m", "one", "--message", "two"]);
        assert_eq!(cli.messages(), vec!["one", "two"]);
    }
}
