//! Transcript codec — flat newline transcript ⇄ role-tagged messages.
//!
//! DESIGN
//! ======
//! The caller carries the whole conversation as one newline-delimited string
//! and resends it on every request. Role attribution is strictly by line
//! parity: even-indexed lines are user turns, odd-indexed lines assistant
//! turns. The `You:` / `AI:` labels in each line are plain content and are
//! never parsed out — the model sees them verbatim.
//!
//! The replayed history is capped at a configurable number of lines. When
//! the cap cuts into the transcript, the window is aligned so it still opens
//! on a user line, preserving parity for the lines that survive.

use crate::llm::types::ChatMessage;

/// Parse a transcript into role-tagged history messages, newest-last.
///
/// An empty transcript yields no messages. At most `max_lines` trailing
/// lines are kept.
#[must_use]
pub fn parse_history(transcript: &str, max_lines: usize) -> Vec<ChatMessage> {
    if transcript.is_empty() {
        return Vec::new();
    }
    let lines: Vec<&str> = transcript.split('\n').collect();
    let start = window_start(lines.len(), max_lines);
    lines
        .iter()
        .enumerate()
        .skip(start)
        .map(|(i, line)| {
            if i % 2 == 0 { ChatMessage::user(*line) } else { ChatMessage::assistant(*line) }
        })
        .collect()
}

/// Assemble the full message sequence for one completion call: truncated
/// history followed by the latest user utterance. The system instruction is
/// not part of this list; it travels separately to the client.
#[must_use]
pub fn build_messages(transcript: &str, new_user_input: &str, max_history_lines: usize) -> Vec<ChatMessage> {
    let mut messages = parse_history(transcript, max_history_lines);
    messages.push(ChatMessage::user(new_user_input));
    messages
}

/// Append one completed exchange to the transcript as `You:` / `AI:` lines.
///
/// Only called after a successful completion, so the transcript is never
/// partially updated. The reply is appended verbatim: a reply containing
/// newlines spans multiple transcript lines and shifts parity on the next
/// replay.
#[must_use]
pub fn append_exchange(transcript: &str, user_input: &str, ai_response: &str) -> String {
    if transcript.is_empty() {
        format!("You: {user_input}\nAI: {ai_response}")
    } else {
        format!("{transcript}\nYou: {user_input}\nAI: {ai_response}")
    }
}

/// First line index of the replayed window. Even-aligned so the window opens
/// on a user line.
fn window_start(len: usize, max_lines: usize) -> usize {
    if len <= max_lines {
        return 0;
    }
    let start = len - max_lines;
    if start % 2 == 1 { start + 1 } else { start }
}

#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;
