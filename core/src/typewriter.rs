//! The reveal/hold/delete/advance typewriter state machine.
//!
//! The machine cycles through a fixed rotation of messages: reveal one
//! character per tick, hold the full message, delete one character per tick,
//! pause, then advance to the next message and start over. Four transition
//! rules cover the whole cycle; `deleting` plus the cursor position encode
//! which phase is active.
//!
//! [`Typewriter::tick`] never reads a clock and never sleeps — it returns
//! the rendered text together with the delay the caller should wait before
//! the next tick. Scheduling lives in [`crate::driver`], which keeps this
//! type deterministic and trivially testable.

use std::time::Duration;

/// Pacing and decoration for a [`Typewriter`].
#[derive(Clone, Debug)]
pub struct TypewriterConfig {
    /// Pause after revealing one character.
    pub reveal_delay: Duration,
    /// Pause holding a fully revealed message before deletion starts.
    pub hold_delay: Duration,
    /// Pause after deleting one character. Faster than `reveal_delay`:
    /// backspacing should read as a burst, typing as deliberate.
    pub delete_delay: Duration,
    /// Pause between finishing one message and starting the next.
    pub advance_delay: Duration,
    /// Fixed marker rendered before the visible text.
    pub prefix: String,
    /// Cursor marker rendered after the visible text.
    pub cursor: String,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            reveal_delay: Duration::from_millis(100),
            hold_delay: Duration::from_millis(1500),
            delete_delay: Duration::from_millis(50),
            advance_delay: Duration::from_millis(500),
            prefix: String::new(),
            cursor: "▌".to_string(),
        }
    }
}

/// One rendered display state plus the pause before the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay: Duration,
}

/// Cycles through a fixed, non-empty rotation of messages.
#[derive(Debug)]
pub struct Typewriter {
    messages: Vec<String>,
    config: TypewriterConfig,
    message_index: usize,
    /// Reveal/delete cursor, counted in `char`s of the current message so a
    /// multi-byte code point is never split.
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    /// Returns `None` when `messages` is empty: the effect has nothing to
    /// show and must not start.
    pub fn new(messages: Vec<String>, config: TypewriterConfig) -> Option<Self> {
        if messages.is_empty() {
            return None;
        }
        Some(Self {
            messages,
            config,
            message_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    /// Render the current display state, then apply exactly one transition.
    ///
    /// Rendering happens before the transition, so the first tick of every
    /// message shows the bare prefix + cursor before any character appears.
    pub fn tick(&mut self) -> Frame {
        let message = &self.messages[self.message_index];
        let shown: String = message.chars().take(self.char_index).collect();
        let text = format!("{}{}{}", self.config.prefix, shown, self.config.cursor);
        let message_chars = message.chars().count();

        let delay = if !self.deleting {
            if self.char_index < message_chars {
                self.char_index += 1;
                self.config.reveal_delay
            } else {
                self.deleting = true;
                self.config.hold_delay
            }
        } else if self.char_index > 0 {
            self.char_index -= 1;
            self.config.delete_delay
        } else {
            self.deleting = false;
            self.message_index = (self.message_index + 1) % self.messages.len();
            self.config.advance_delay
        };

        Frame { text, delay }
    }
}
