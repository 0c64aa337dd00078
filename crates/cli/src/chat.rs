//! Interactive chat loop with the teach-on-miss flow.

use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use console::style;
use dialoguer::{Confirm, Input};

use simfut_engine::{normalize, ConversationTurn, RoundRobin, SelectionEngine};
use simfut_store::{paths, AnswerEntry, AnswerStore};

use crate::flags::MatcherMode;

pub(crate) const NO_MATCH_MESSAGE: &str =
    "Bunu nətər cavablayacağımı bilmirəm. Öyrədə bilərsiniz?";

const EXIT_WORD: &str = "çıx";

/// How many conversation turns the tag resolver gets to see.
const CONTEXT_MAX: usize = 8;

pub(crate) fn run(db: &Path, cutoff: f64, active_tag: &str, matcher: MatcherMode) -> Result<()> {
    let mut store = simfut_store::ensure(db)?;
    let log_path = paths::chat_log_path(db);
    let mut engine = SelectionEngine::new(matcher.as_ranker_kind());
    let mut rr = RoundRobin::new();
    let mut history: VecDeque<ConversationTurn> = VecDeque::new();

    println!(
        "{} ({} sual; '{EXIT_WORD}' ilə çıxın)",
        style("Simfut hazırdır.").cyan().bold(),
        store.entries.len()
    );

    loop {
        let line = match Input::<String>::new()
            .with_prompt("Siz")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            // EOF or a closed terminal ends the session.
            Err(_) => break,
        };
        let query = line.trim().to_string();
        if query.is_empty() {
            continue;
        }
        if normalize(&query) == EXIT_WORD {
            break;
        }

        push_turn(&mut history, "Siz", &query);
        append_chat_line(&log_path, "Siz", &query);

        let answer = engine.select(
            &query,
            &store,
            history.make_contiguous(),
            cutoff,
            Some(active_tag),
            &mut rr,
        );
        match answer {
            Some(answer) => {
                say(&answer);
                push_turn(&mut history, "Simfut", &answer);
                append_chat_line(&log_path, "Simfut", &answer);
            }
            None => {
                show_suggestions(&mut engine, &query, &store);
                say(NO_MATCH_MESSAGE);
                if let Some(outcome) = teach(&mut store, db, &query)? {
                    say(&outcome);
                }
            }
        }
    }

    Ok(())
}

fn say(text: &str) {
    println!("{} {text}", style("Simfut:").cyan().bold());
}

fn show_suggestions(engine: &mut SelectionEngine, query: &str, store: &AnswerStore) {
    let ranked = engine.suggestions(query, store);
    if ranked.is_empty() {
        return;
    }
    println!("{}", style("Uyğunluqlar:").dim());
    for m in ranked {
        println!("  {}  ({:.2})", m.text, m.score);
    }
}

/// Prompt for a new answer to an unmatched question.
///
/// Returns the message to show in the chat, or `None` when the user bails
/// out of the prompts entirely.
fn teach(store: &mut AnswerStore, db: &Path, question: &str) -> Result<Option<String>> {
    let wants = Confirm::new()
        .with_prompt("Öyrətmək istəyirsiniz?")
        .default(true)
        .interact()
        .unwrap_or(false);
    if !wants {
        return Ok(Some("Öyrədilmədi.".to_string()));
    }

    let answer: String = Input::new()
        .with_prompt("Cavab")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();
    let answer = answer.trim().to_string();
    if answer.is_empty() {
        return Ok(Some("Cavab boş ola bilməz.".to_string()));
    }

    let tag: String = Input::new()
        .with_prompt("Tag (istəyə bağlı)")
        .allow_empty(true)
        .interact_text()
        .unwrap_or_default();
    let tag = tag.trim().to_string();

    let qn = normalize(question);
    if let Some(existing) = store
        .entries
        .iter_mut()
        .find(|entry| normalize(&entry.question) == qn)
    {
        let overwrite = Confirm::new()
            .with_prompt("Belə bir sual artıq var. Üzərinə yazılsın?")
            .default(false)
            .interact()
            .unwrap_or(false);
        if !overwrite {
            return Ok(Some("Öyrədilmədi.".to_string()));
        }
        existing.answer = answer;
        existing.tag = tag;
        simfut_store::save(store, db)?;
        return Ok(Some("Mövcud sual yeniləndi.".to_string()));
    }

    store
        .entries
        .push(AnswerEntry::new(question, answer, tag));
    simfut_store::save(store, db)?;
    Ok(Some(
        "Təşəkkürlər, sayənizdə yeni bir şey öyrəndim.".to_string(),
    ))
}

fn push_turn(history: &mut VecDeque<ConversationTurn>, speaker: &str, text: &str) {
    history.push_back(ConversationTurn::new(speaker, text));
    while history.len() > CONTEXT_MAX {
        history.pop_front();
    }
}

/// Append one transcript line, best-effort: chat must not die on a full
/// disk or an unwritable log.
fn append_chat_line(path: &Path, who: &str, text: &str) {
    let line = format!("{} {who}: {text}\n", Local::now().to_rfc3339());
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(line.as_bytes()));
    if let Err(err) = result {
        log::debug!("Cannot append chat log {}: {err}", path.display());
    }
}
