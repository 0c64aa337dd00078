//! # Simfut Store
//!
//! Flat JSON persistence for the answer database.
//!
//! The store is a plain ordered sequence of question/answer/tag records plus
//! a metadata block. The on-disk schema is the legacy Simfut database
//! format (`suallar`/`sual`/`cavab`/`tag`), so existing database files load
//! unchanged. Matching logic lives in `simfut-engine`; this crate only
//! reads, writes, backs up and restores the file.

mod error;
mod persist;
mod types;

pub mod paths;

pub use error::{Result, StoreError};
pub use persist::{backup, ensure, load, load_or_default, restore, save};
pub use types::{AnswerEntry, AnswerStore, StoreMeta, DEFAULT_CREATION_DATE};
