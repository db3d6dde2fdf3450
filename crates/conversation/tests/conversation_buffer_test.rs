//! Tests for `conversation::ConversationBuffer`: FIFO eviction and prompt rendering.
//! External interactions: none (pure data structure).

use conversation::{ConversationBuffer, ConversationTurn, TurnRole};

fn turn(i: usize) -> ConversationTurn {
    if i % 2 == 0 {
        ConversationTurn::user(format!("question {}", i))
    } else {
        ConversationTurn::bot(format!("answer {}", i))
    }
}

/// **Test: For every append count and capacity, the snapshot is the last C turns in original order.**
///
/// **Setup:** Capacities 1..=6, append counts 0..=20.
/// **Action:** Append `n` numbered turns, take snapshot.
/// **Expected:** len ≤ C and snapshot equals the tail of the appended sequence.
#[test]
fn snapshot_is_last_c_turns_in_order() {
    for capacity in 1..=6 {
        for n in 0..=20 {
            let mut buffer = ConversationBuffer::new(capacity);
            let appended: Vec<ConversationTurn> = (0..n).map(turn).collect();
            for t in &appended {
                buffer.append(t.clone());
                assert!(buffer.len() <= capacity);
            }
            let expected: Vec<ConversationTurn> =
                appended[n.saturating_sub(capacity)..].to_vec();
            assert_eq!(buffer.snapshot(), expected, "capacity={} n={}", capacity, n);
        }
    }
}

/// **Test: append returns the evicted turn (oldest first) once capacity is exceeded.**
#[test]
fn append_reports_evicted_oldest_turn() {
    let mut buffer = ConversationBuffer::new(2);
    assert!(buffer.append(turn(0)).is_empty());
    assert!(buffer.append(turn(1)).is_empty());
    assert_eq!(buffer.append(turn(2)), vec![turn(0)]);
    assert_eq!(buffer.snapshot(), vec![turn(1), turn(2)]);
}

/// **Test: On an empty buffer the prompt is exactly the new input plus the cue.**
#[test]
fn render_prompt_empty_buffer_has_no_separator_artifacts() {
    let buffer = ConversationBuffer::new(10).with_cue("霸总：");
    let prompt = buffer.render_prompt("在吗");
    assert_eq!(prompt, "User: 在吗\n霸总：");
    assert!(!prompt.starts_with('\n'));
}

/// **Test: Stored turns precede the new input, chronologically, and the cue comes last.**
#[test]
fn render_prompt_includes_history_in_order() {
    let mut buffer = ConversationBuffer::new(10).with_cue("Bot:");
    buffer.append(ConversationTurn::user("hello"));
    buffer.append(ConversationTurn::bot("what now"));

    let prompt = buffer.render_prompt("explain lifetimes");

    assert_eq!(
        prompt,
        "User: hello\nBot: what now\nUser: explain lifetimes\nBot:"
    );
}

/// **Test: Without a cue, the prompt ends with the new input line.**
#[test]
fn render_prompt_without_cue() {
    let buffer = ConversationBuffer::new(3);
    assert_eq!(buffer.render_prompt("hi"), "User: hi");
}

/// **Test: render_prompt does not mutate the buffer; clear keeps capacity and cue.**
#[test]
fn render_is_read_only_and_clear_resets_turns() {
    let mut buffer = ConversationBuffer::new(4).with_cue("cue");
    buffer.append(ConversationTurn::user("a"));
    let _ = buffer.render_prompt("b");
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.snapshot()[0].role, TurnRole::User);

    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 4);
    assert_eq!(buffer.cue(), "cue");
}
