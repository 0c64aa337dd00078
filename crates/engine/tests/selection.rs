//! End-to-end selection scenarios over realistic stores.

use pretty_assertions::assert_eq;

use simfut_engine::{ConversationTurn, RankerKind, RoundRobin, SelectionEngine, DEFAULT_CUTOFF};
use simfut_store::{AnswerEntry, AnswerStore, StoreMeta};

fn engine() -> SelectionEngine {
    SelectionEngine::new(RankerKind::EditDistance)
}

fn store(entries: Vec<AnswerEntry>) -> AnswerStore {
    AnswerStore {
        meta: StoreMeta::default(),
        entries,
    }
}

#[test]
fn single_entry_exact_match() {
    let store = store(vec![AnswerEntry::new("hello", "hi", "")]);
    let mut rr = RoundRobin::new();

    let answer = engine().select("hello", &store, &[], DEFAULT_CUTOFF, Some("auto"), &mut rr);
    assert_eq!(answer.as_deref(), Some("hi"));
}

#[test]
fn duplicate_entries_cycle_round_robin() {
    let store = store(vec![
        AnswerEntry::new("hello", "A", "x"),
        AnswerEntry::new("hello", "B", "x"),
    ]);
    let mut rr = RoundRobin::new();
    let mut eng = engine();

    let mut answers = Vec::new();
    for _ in 0..3 {
        answers.push(
            eng.select("hello", &store, &[], DEFAULT_CUTOFF, Some("x"), &mut rr)
                .unwrap(),
        );
    }
    assert_eq!(answers, vec!["A", "B", "A"]);
}

#[test]
fn round_robin_fairness_is_per_key() {
    let store = store(vec![
        AnswerEntry::new("hello", "A", "x"),
        AnswerEntry::new("hello", "B", "x"),
        AnswerEntry::new("bye", "C", "x"),
        AnswerEntry::new("bye", "D", "x"),
    ]);
    let mut rr = RoundRobin::new();
    let mut eng = engine();

    // Interleaving queries under other keys must not disturb a group's cycle.
    let a1 = eng
        .select("hello", &store, &[], DEFAULT_CUTOFF, Some("x"), &mut rr)
        .unwrap();
    let c1 = eng
        .select("bye", &store, &[], DEFAULT_CUTOFF, Some("x"), &mut rr)
        .unwrap();
    let a2 = eng
        .select("hello", &store, &[], DEFAULT_CUTOFF, Some("x"), &mut rr)
        .unwrap();
    let c2 = eng
        .select("bye", &store, &[], DEFAULT_CUTOFF, Some("x"), &mut rr)
        .unwrap();

    assert_eq!((a1.as_str(), a2.as_str()), ("A", "B"));
    assert_eq!((c1.as_str(), c2.as_str()), ("C", "D"));
}

#[test]
fn round_robin_survives_store_shrinking() {
    let mut db = store(vec![
        AnswerEntry::new("hello", "A", "x"),
        AnswerEntry::new("hello", "B", "x"),
        AnswerEntry::new("hello", "C", "x"),
    ]);
    let mut rr = RoundRobin::new();
    let mut eng = engine();

    for _ in 0..2 {
        eng.select("hello", &db, &[], DEFAULT_CUTOFF, Some("x"), &mut rr);
    }
    // Two entries removed; the stale counter must still land in range.
    db.entries.truncate(1);
    let answer = eng
        .select("hello", &db, &[], DEFAULT_CUTOFF, Some("x"), &mut rr)
        .unwrap();
    assert_eq!(answer, "A");
}

#[test]
fn typo_resolves_through_fuzzy_tier() {
    let store = store(vec![AnswerEntry::new("hello", "hi", "")]);
    let mut rr = RoundRobin::new();

    let answer = engine().select("helo", &store, &[], DEFAULT_CUTOFF, Some("auto"), &mut rr);
    assert_eq!(answer.as_deref(), Some("hi"));
}

#[test]
fn high_cutoff_rejects_the_same_typo() {
    let store = store(vec![AnswerEntry::new("hello", "hi", "")]);
    let mut rr = RoundRobin::new();

    let answer = engine().select("helo", &store, &[], 0.95, Some("auto"), &mut rr);
    assert_eq!(answer, None);
}

#[test]
fn score_exactly_at_cutoff_is_accepted() {
    // "helo" vs "hello" scores 1 - 1/5; build the cutoff from the same
    // expression so the boundary comparison is bit-exact.
    let score = 1.0 - 1.0 / 5.0;
    let store = store(vec![AnswerEntry::new("hello", "hi", "")]);
    let mut rr = RoundRobin::new();

    let answer = engine().select("helo", &store, &[], score, Some("auto"), &mut rr);
    assert_eq!(answer.as_deref(), Some("hi"));

    let mut rr = RoundRobin::new();
    let answer = engine().select("helo", &store, &[], score + 1e-9, Some("auto"), &mut rr);
    assert_eq!(answer, None);
}

#[test]
fn fuzzy_tier_cycles_over_entries_sharing_the_top_question() {
    let store = store(vec![
        AnswerEntry::new("hello", "A", ""),
        AnswerEntry::new("hello", "B", ""),
    ]);
    let mut rr = RoundRobin::new();
    let mut eng = engine();

    let first = eng
        .select("helo", &store, &[], DEFAULT_CUTOFF, Some("auto"), &mut rr)
        .unwrap();
    let second = eng
        .select("helo", &store, &[], DEFAULT_CUTOFF, Some("auto"), &mut rr)
        .unwrap();
    assert_eq!((first.as_str(), second.as_str()), ("A", "B"));
}

#[test]
fn explicit_tag_excludes_untagged_entries() {
    let store = store(vec![
        AnswerEntry::new("hello", "untagged", ""),
        AnswerEntry::new("hello", "tagged", "x"),
    ]);
    let mut rr = RoundRobin::new();

    let answer = engine().select("hello", &store, &[], DEFAULT_CUTOFF, Some("x"), &mut rr);
    assert_eq!(answer.as_deref(), Some("tagged"));
}

#[test]
fn unscoped_query_sees_all_entries() {
    let store = store(vec![AnswerEntry::new("hello", "tagged", "x")]);
    let mut rr = RoundRobin::new();

    let answer = engine().select("hello", &store, &[], DEFAULT_CUTOFF, Some("auto"), &mut rr);
    assert_eq!(answer.as_deref(), Some("tagged"));
}

#[test]
fn age_query_with_empty_store_uses_fallback_date() {
    let mut rr = RoundRobin::new();
    let answer = engine()
        .select(
            "nece yasin var",
            &store(Vec::new()),
            &[],
            DEFAULT_CUTOFF,
            Some("auto"),
            &mut rr,
        )
        .unwrap();
    assert!(answer.contains("17.12.2024"), "{answer}");
    assert!(answer.contains("yaradılma tarixim"), "{answer}");
}

#[test]
fn age_query_wins_over_a_stored_exact_match() {
    let store = store(vec![AnswerEntry::new(
        "nece yasin var",
        "stored answer",
        "",
    )]);
    let mut rr = RoundRobin::new();
    let answer = engine()
        .select(
            "nece yasin var",
            &store,
            &[],
            DEFAULT_CUTOFF,
            Some("auto"),
            &mut rr,
        )
        .unwrap();
    assert_ne!(answer, "stored answer");
    assert!(answer.contains("yaradılma tarixim"), "{answer}");
}

#[test]
fn conversation_marker_beats_older_markers() {
    let store = store(vec![
        AnswerEntry::new("sual", "köhnə", "old"),
        AnswerEntry::new("sual", "təzə", "new"),
    ]);
    let turns = vec![
        ConversationTurn::new("Siz", "Tag: old"),
        ConversationTurn::new("Simfut", "tamam"),
        ConversationTurn::new("Siz", "indi Tag: new olsun"),
    ];
    let mut rr = RoundRobin::new();

    let answer = engine().select("sual", &store, &turns, DEFAULT_CUTOFF, None, &mut rr);
    assert_eq!(answer.as_deref(), Some("təzə"));
}
