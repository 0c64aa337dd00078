use serde::{Deserialize, Serialize};

/// Creation date written into freshly initialized databases.
pub const DEFAULT_CREATION_DATE: &str = "17.12.2024";

/// One stored question/answer record. The `tag` scopes which queries the
/// entry is eligible for; empty means untagged.
///
/// Field renames keep the on-disk schema of legacy database files.
/// Every field defaults to empty so partial records deserialize instead of
/// failing the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntry {
    #[serde(rename = "sual", default)]
    pub question: String,

    #[serde(rename = "cavab", default)]
    pub answer: String,

    #[serde(default)]
    pub tag: String,
}

impl AnswerEntry {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            tag: tag.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreMeta {
    /// `DD.MM.YYYY` string, set when the database is first created.
    #[serde(default)]
    pub creation_date: Option<String>,
}

/// The whole answer database: ordered entries plus metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    #[serde(default)]
    pub meta: StoreMeta,

    #[serde(rename = "suallar", default)]
    pub entries: Vec<AnswerEntry>,
}

impl AnswerStore {
    /// A fresh database with today's defaults stamped in.
    #[must_use]
    pub fn with_default_meta() -> Self {
        Self {
            meta: StoreMeta {
                creation_date: Some(DEFAULT_CREATION_DATE.to_string()),
            },
            entries: Vec::new(),
        }
    }

    /// All stored question texts, in store order.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.question.clone()).collect()
    }

    /// Distinct non-empty tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.tag.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}
