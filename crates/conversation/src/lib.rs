//! # Conversation
//!
//! Bounded, ordered history of recent exchanges and the prompt rendered from it.
//!
//! ## Format
//!
//! One line per stored turn (`User: …` / `Bot: …`), then the new input as `User: …`, then the
//! persona cue (e.g. `霸总：`) that prompts the model to answer in character. Lines are joined with
//! `\n`; there is no leading or trailing separator.
//!
//! ## Ownership
//!
//! [`ConversationBuffer`] is a plain owned value. Callers that share it across tasks wrap it in a
//! lock and hold the lock only while rendering or appending.

use std::collections::VecDeque;

/// Default number of turns kept (config `MAX_HISTORY`).
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Bot,
}

impl TurnRole {
    /// Line prefix used in rendered prompts.
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::User => "User",
            TurnRole::Bot => "Bot",
        }
    }
}

/// One stored exchange half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Bot,
            text: text.into(),
        }
    }

    /// `Role: text` line as it appears in the prompt.
    pub fn line(&self) -> String {
        format!("{}: {}", self.role.label(), self.text)
    }
}

/// Fixed-capacity FIFO of turns. Never holds more than `capacity` turns; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct ConversationBuffer {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
    cue: String,
}

impl ConversationBuffer {
    /// Empty buffer holding at most `capacity` turns, with no persona cue.
    pub fn new(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity),
            capacity,
            cue: String::new(),
        }
    }

    /// Sets the cue appended after the new input in [`Self::render_prompt`].
    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = cue.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cue(&self) -> &str {
        &self.cue
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends a turn, evicting from the front until within capacity. Returns the evicted turns, oldest first.
    pub fn append(&mut self, turn: ConversationTurn) -> Vec<ConversationTurn> {
        self.turns.push_back(turn);
        let mut evicted = Vec::new();
        while self.turns.len() > self.capacity {
            if let Some(old) = self.turns.pop_front() {
                evicted.push(old);
            }
        }
        evicted
    }

    /// Stored turns in insertion order.
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    /// Drops all turns (capacity and cue are kept).
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Stored turns, then `User: {new_input}`, then the cue (if any), one per line.
    pub fn render_prompt(&self, new_input: &str) -> String {
        let mut lines: Vec<String> = self.turns.iter().map(ConversationTurn::line).collect();
        lines.push(ConversationTurn::user(new_input).line());
        if !self.cue.is_empty() {
            lines.push(self.cue.clone());
        }
        lines.join("\n")
    }
}

impl Default for ConversationBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
