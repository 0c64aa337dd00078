use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;
use simfut_store::{AnswerStore, DEFAULT_CREATION_DATE};

/// Known paraphrases of "how old are you", matched by substring containment
/// against the normalized query.
const AGE_TRIGGERS: &[&str] = &[
    "nece yasin var",
    "necə yaşın",
    "niye deqiq demirsen yasini",
    "nece yashin var",
];

const DATE_FORMAT: &str = "%d.%m.%Y";

const APOLOGY: &str = "Yaşımı hesablamaq üçün yaradılma tarixi düzgün deyil.";

/// `D.M.YYYY` / `DD.MM.YYYY` embedded anywhere in an answer.
static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}\.\d{1,2}\.\d{4})").expect("date regex"));

/// Answer an age question, if the query is one.
///
/// Runs before every other selection tier and ignores tag scoping. The
/// creation date comes from store metadata, else the first date embedded in
/// any stored answer, else the hard-coded default. An unparseable date
/// degrades to a fixed apology instead of an error.
#[must_use]
pub fn age_reply(query: &str, store: &AnswerStore) -> Option<String> {
    let qn = normalize(query);
    if !AGE_TRIGGERS.iter().any(|trigger| qn.contains(trigger)) {
        return None;
    }

    let date_str = resolve_creation_date(store);
    match NaiveDate::parse_from_str(&date_str, DATE_FORMAT) {
        Ok(created) => {
            let (formatted, elapsed) = describe_age(created, Local::now().date_naive());
            Some(format!(
                "Mən fiziki bədənə malik olmayan virtual süni intellektəm; \
                 yaradılma tarixim {formatted} və bu vaxta qədər: {elapsed}."
            ))
        }
        Err(err) => {
            log::warn!("Unparseable creation date {date_str:?}: {err}");
            Some(APOLOGY.to_string())
        }
    }
}

fn resolve_creation_date(store: &AnswerStore) -> String {
    if let Some(date) = store
        .meta
        .creation_date
        .as_deref()
        .filter(|d| !d.is_empty())
    {
        return date.to_string();
    }

    store
        .entries
        .iter()
        .find_map(|entry| DATE_PATTERN.find(&entry.answer))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_CREATION_DATE.to_string())
}

/// Render the creation date and the elapsed time since it.
///
/// The duration split is intentionally approximate: 365-day years, 30-day
/// months, no calendar awareness. A creation date in the future clamps to
/// zero days.
fn describe_age(created: NaiveDate, today: NaiveDate) -> (String, String) {
    let days = (today - created).num_days().max(0);
    let years = days / 365;
    let months = (days % 365) / 30;
    let rest = (days % 365) % 30;

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{years} il"));
    }
    if months > 0 {
        parts.push(format!("{months} ay"));
    }
    if rest > 0 {
        parts.push(format!("{rest} gün"));
    }

    let elapsed = if parts.is_empty() {
        "0 gün".to_string()
    } else {
        parts.join(", ")
    };
    (created.format(DATE_FORMAT).to_string(), elapsed)
}
