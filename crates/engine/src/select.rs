use simfut_store::{AnswerEntry, AnswerStore};

use crate::age::age_reply;
use crate::filter::filter_by_tag;
use crate::normalize::normalize;
use crate::ranker::{ranker_for, RankedMatch, Ranker, RankerKind};
use crate::round_robin::RoundRobin;
use crate::tag::{resolve_tag, ConversationTurn};

/// Minimum similarity score accepted by the fuzzy tiers.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// How many ranked candidates the ranker returns; only the top one decides.
pub const RANK_LIMIT: usize = 5;

/// The single entry point the front-end calls with a query.
///
/// Tries the resolution tiers in order, first success wins:
///
/// 1. age question special case (ignores tag scoping)
/// 2. tag-scoped exact question match
/// 3. tag-scoped fuzzy match at or above the cutoff
/// 4. global exact match, first entry in store order
/// 5. global fuzzy match at or above the cutoff
///
/// `None` means no confident match; the caller decides how to react
/// (typically by offering to teach a new answer).
pub struct SelectionEngine {
    ranker: Box<dyn Ranker>,
}

impl SelectionEngine {
    #[must_use]
    pub fn new(kind: RankerKind) -> Self {
        Self {
            ranker: ranker_for(kind),
        }
    }

    /// Use a caller-supplied ranking backend.
    #[must_use]
    pub fn with_ranker(ranker: Box<dyn Ranker>) -> Self {
        Self { ranker }
    }

    pub fn select(
        &mut self,
        query: &str,
        store: &AnswerStore,
        recent_turns: &[ConversationTurn],
        cutoff: f64,
        explicit_tag: Option<&str>,
        rr: &mut RoundRobin,
    ) -> Option<String> {
        if let Some(reply) = age_reply(query, store) {
            log::debug!("Resolved as age question");
            return Some(reply);
        }

        let qn = normalize(query);
        let effective_tag = resolve_tag(explicit_tag, recent_turns);
        let tag_key = normalize(&effective_tag);
        let scoped = filter_by_tag(&store.entries, &effective_tag);
        log::debug!(
            "Tag scope '{effective_tag}': {} of {} entries",
            scoped.len(),
            store.entries.len()
        );

        // Tag-scoped exact match.
        let exact: Vec<&AnswerEntry> = scoped
            .iter()
            .copied()
            .filter(|entry| normalize(&entry.question) == qn)
            .collect();
        if !exact.is_empty() {
            let idx = rr.next(&qn, &tag_key, exact.len());
            log::debug!("Exact match in tag scope, serving {idx}/{}", exact.len());
            return Some(exact[idx].answer.clone());
        }

        // Tag-scoped fuzzy match.
        if let Some(answer) = self.fuzzy_pick(query, &scoped, cutoff, &tag_key, rr) {
            log::debug!("Fuzzy match in tag scope");
            return Some(answer);
        }

        // Global exact match. This fallback does not join round-robin
        // cycling: it always serves the first entry in store order.
        if let Some(entry) = store
            .entries
            .iter()
            .find(|entry| normalize(&entry.question) == qn)
        {
            log::debug!("Global exact match");
            return Some(entry.answer.clone());
        }

        // Global fuzzy match.
        let all: Vec<&AnswerEntry> = store.entries.iter().collect();
        if let Some(answer) = self.fuzzy_pick(query, &all, cutoff, "", rr) {
            log::debug!("Global fuzzy match");
            return Some(answer);
        }

        log::debug!("No confident match for query");
        None
    }

    /// Rank the candidates' questions against the query; on a top score at
    /// or above the cutoff, round-robin over the entries sharing the
    /// top-ranked question text (raw equality, within the candidate set).
    fn fuzzy_pick(
        &mut self,
        query: &str,
        candidates: &[&AnswerEntry],
        cutoff: f64,
        tag_key: &str,
        rr: &mut RoundRobin,
    ) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }

        let corpus: Vec<String> = candidates
            .iter()
            .map(|entry| entry.question.clone())
            .collect();
        let ranked = self.ranker.rank(query, &corpus, RANK_LIMIT);
        let top = ranked.first()?;
        if top.score < cutoff {
            return None;
        }

        let group: Vec<&AnswerEntry> = candidates
            .iter()
            .copied()
            .filter(|entry| entry.question == top.text)
            .collect();
        if group.is_empty() {
            return None;
        }

        let idx = rr.next(&normalize(&top.text), tag_key, group.len());
        Some(group[idx].answer.clone())
    }

    /// Top-ranked candidates over the whole store, for suggestion displays.
    pub fn suggestions(&mut self, query: &str, store: &AnswerStore) -> Vec<RankedMatch> {
        self.ranker.rank(query, &store.questions(), RANK_LIMIT)
    }
}
