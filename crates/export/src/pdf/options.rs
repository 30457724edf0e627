//! PDF Export Options

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Options for PDF export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    /// Document title; the first grid's title when unset
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Application that produced the source data
    #[serde(default = "default_creator")]
    pub creator: String,
    /// Library that wrote the file
    #[serde(default = "default_producer")]
    pub producer: String,
    /// Natural language of the text, written to the catalog `/Lang`
    #[serde(default = "default_language")]
    pub language: String,
    /// Creation time; the current local time when unset
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Permanent document identifier; a random v4 uuid when unset
    #[serde(default)]
    pub document_id: Option<Uuid>,
}

fn default_creator() -> String {
    "Grid Export".to_string()
}

fn default_producer() -> String {
    format!("grid-export {}", env!("CARGO_PKG_VERSION"))
}

fn default_language() -> String {
    "en-US".to_string()
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            creator: default_creator(),
            producer: default_producer(),
            language: default_language(),
            timestamp: None,
            document_id: None,
        }
    }
}

impl PdfExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Pin the timestamp so repeated exports are byte-identical
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Pin the document id so repeated exports are byte-identical
    pub fn with_document_id(mut self, id: Uuid) -> Self {
        self.document_id = Some(id);
        self
    }

    pub(crate) fn resolved_timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub(crate) fn resolved_document_id(&self) -> Uuid {
        self.document_id.unwrap_or_else(Uuid::new_v4)
    }
}
