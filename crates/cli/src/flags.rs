use clap::ValueEnum;

use simfut_engine::RankerKind;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum MatcherMode {
    /// Reference edit-distance backend.
    Classic,
    /// Nucleo-backed fuzzy matcher (falls back to classic when not
    /// compiled in).
    Fast,
}

impl MatcherMode {
    pub(crate) const fn as_ranker_kind(self) -> RankerKind {
        match self {
            MatcherMode::Classic => RankerKind::EditDistance,
            MatcherMode::Fast => RankerKind::Fast,
        }
    }
}
