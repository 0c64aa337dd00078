use std::cmp::Ordering;

/// One ranked candidate: the corpus text and its similarity to the query,
/// normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch {
    pub text: String,
    pub score: f64,
}

/// Similarity ranking backend.
///
/// Implementations score every corpus string against the query and return at
/// most `limit` results, descending by score, corpus order preserved for
/// ties. Identical strings must score `1.0`.
pub trait Ranker {
    fn rank(&mut self, query: &str, corpus: &[String], limit: usize) -> Vec<RankedMatch>;
}

/// Which backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankerKind {
    /// Reference backend: normalized Levenshtein ratio.
    EditDistance,
    /// Nucleo-backed matcher, when compiled in.
    Fast,
}

/// Build the requested backend. An unavailable fast backend degrades to the
/// reference implementation with the same external contract.
#[must_use]
pub fn ranker_for(kind: RankerKind) -> Box<dyn Ranker> {
    match kind {
        RankerKind::EditDistance => Box::new(EditDistanceRanker),
        RankerKind::Fast => fast_ranker(),
    }
}

#[cfg(feature = "fast-matcher")]
fn fast_ranker() -> Box<dyn Ranker> {
    Box::new(NucleoRanker::new())
}

#[cfg(not(feature = "fast-matcher"))]
fn fast_ranker() -> Box<dyn Ranker> {
    log::debug!("fast matcher not compiled in, using edit-distance backend");
    Box::new(EditDistanceRanker)
}

fn sort_and_truncate(mut scored: Vec<RankedMatch>, limit: usize) -> Vec<RankedMatch> {
    // Stable sort: ties keep corpus order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}

/// Reference ranker: normalized Levenshtein similarity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceRanker;

impl Ranker for EditDistanceRanker {
    fn rank(&mut self, query: &str, corpus: &[String], limit: usize) -> Vec<RankedMatch> {
        let scored = corpus
            .iter()
            .map(|candidate| RankedMatch {
                text: candidate.clone(),
                score: strsim::normalized_levenshtein(query, candidate),
            })
            .collect();
        sort_and_truncate(scored, limit)
    }
}

/// Fast ranker on top of nucleo's fuzzy matcher.
///
/// Nucleo scores are unbounded integers, so each candidate score is
/// normalized against the query's self-match score (an identical string
/// therefore scores exactly `1.0`) and capped at `1.0`.
#[cfg(feature = "fast-matcher")]
pub struct NucleoRanker {
    matcher: nucleo_matcher::Matcher,
}

#[cfg(feature = "fast-matcher")]
impl NucleoRanker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: nucleo_matcher::Matcher::new(nucleo_matcher::Config::DEFAULT),
        }
    }
}

#[cfg(feature = "fast-matcher")]
impl Default for NucleoRanker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "fast-matcher")]
impl Ranker for NucleoRanker {
    fn rank(&mut self, query: &str, corpus: &[String], limit: usize) -> Vec<RankedMatch> {
        use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};

        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

        let self_haystack = nucleo_matcher::Utf32String::from(query);
        let self_score = pattern
            .score(self_haystack.slice(..), &mut self.matcher)
            .unwrap_or(0);

        let scored = corpus
            .iter()
            .map(|candidate| {
                let haystack = nucleo_matcher::Utf32String::from(candidate.as_str());
                let raw = pattern
                    .score(haystack.slice(..), &mut self.matcher)
                    .unwrap_or(0);
                let score = if self_score == 0 {
                    0.0
                } else {
                    (f64::from(raw) / f64::from(self_score)).min(1.0)
                };
                RankedMatch {
                    text: candidate.clone(),
                    score,
                }
            })
            .collect();
        sort_and_truncate(scored, limit)
    }
}
