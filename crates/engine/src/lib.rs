//! # Simfut Engine
//!
//! Answer selection for the Simfut chat assistant: maps a free-text query to
//! a stored answer using exact lookup, tag scoping, fuzzy similarity
//! fallback, and round-robin cycling over duplicate entries.
//!
//! ## Pipeline
//!
//! ```text
//! query
//!     │
//!     ├──> normalize (trim + case fold)
//!     ├──> age-question check (fixed paraphrases)
//!     ├──> tag resolution (explicit │ chat-history marker │ auto)
//!     ├──> tag-scoped candidates
//!     │        ├─> exact question match ──┐
//!     │        └─> fuzzy ranking ≥ cutoff ─┤
//!     ├──> global exact match ─────────────┼──> round-robin over the
//!     └──> global fuzzy ranking ≥ cutoff ──┘    matched group → answer
//! ```
//!
//! The first tier that produces a match wins; no tier means "no confident
//! match" and the caller decides what to do (typically: offer to teach).
//!
//! Selection is a pure bounded computation over the in-memory store. The
//! only mutable state is the [`RoundRobin`] counter map, which the caller
//! owns and passes in; a concurrent adaptation must guard it (and any store
//! mutation) externally.

mod age;
mod filter;
mod normalize;
mod ranker;
mod round_robin;
mod select;
mod tag;

pub use age::age_reply;
pub use filter::filter_by_tag;
pub use normalize::normalize;
pub use ranker::{ranker_for, EditDistanceRanker, RankedMatch, Ranker, RankerKind};
pub use round_robin::RoundRobin;
pub use select::{SelectionEngine, DEFAULT_CUTOFF, RANK_LIMIT};
pub use tag::{resolve_tag, ConversationTurn, AUTO_TAG};

#[cfg(feature = "fast-matcher")]
pub use ranker::NucleoRanker;
