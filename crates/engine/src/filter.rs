use simfut_store::AnswerEntry;

use crate::normalize::normalize;
use crate::tag::is_auto;

/// Narrow the candidate set to a tag scope.
///
/// The sentinel (empty or `auto`) returns every entry, order preserved.
/// A concrete tag keeps only entries whose tag matches after
/// normalization; untagged entries never match a concrete tag.
#[must_use]
pub fn filter_by_tag<'a>(entries: &'a [AnswerEntry], tag: &str) -> Vec<&'a AnswerEntry> {
    if is_auto(tag) {
        return entries.iter().collect();
    }
    let wanted = normalize(tag);
    entries
        .iter()
        .filter(|entry| normalize(&entry.tag) == wanted)
        .collect()
}
