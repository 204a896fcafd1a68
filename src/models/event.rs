//! The typed schema for media-library lifecycle events.
//!
//! Producers deliver events as JSON with a `category` discriminator. The
//! schema is deliberately closed: every field the relay cares about is
//! declared here, and unrecognized categories collapse into
//! [`MediaEvent::Unknown`] so they can be dropped instead of failing the
//! producer.

use serde::{Deserialize, Serialize};

/// A lifecycle event emitted by the media-management host.
///
/// Payload fields are defaulted so that partial payloads still
/// deserialize; an event with a missing storage tag or success flag simply
/// fails the relevance check downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "category")]
pub enum MediaEvent {
    /// A library item finished transferring into remote storage.
    #[serde(rename = "transfer.complete")]
    TransferComplete {
        /// Whether the transfer actually succeeded.
        #[serde(default)]
        success: bool,
        /// Storage backend the item landed on.
        #[serde(default)]
        storage: String,
        /// Display name of the transferred item.
        #[serde(default)]
        name: String,
    },

    /// Metadata scraping finished for a library item.
    #[serde(rename = "metadata.scrape")]
    ScrapeComplete {
        /// Storage backend the item lives on.
        #[serde(default)]
        storage: String,
        /// Display name of the scraped item.
        #[serde(default)]
        name: String,
    },

    /// Any category this relay does not understand.
    #[serde(other)]
    Unknown,
}

impl MediaEvent {
    /// The storage backend tag carried by the event, if any.
    pub fn storage(&self) -> Option<&str> {
        match self {
            MediaEvent::TransferComplete { storage, .. }
            | MediaEvent::ScrapeComplete { storage, .. } => Some(storage),
            MediaEvent::Unknown => None,
        }
    }

    /// The display name carried by the event, if any.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            MediaEvent::TransferComplete { name, .. } | MediaEvent::ScrapeComplete { name, .. } => {
                Some(name)
            }
            MediaEvent::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_transfer_complete() {
        let json = r#"{
            "category": "transfer.complete",
            "success": true,
            "storage": "u115",
            "name": "Some Movie (2024)"
        }"#;
        let event: MediaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            MediaEvent::TransferComplete {
                success: true,
                storage: "u115".to_string(),
                name: "Some Movie (2024)".to_string(),
            }
        );
    }

    #[test]
    fn deserializes_scrape_complete() {
        let json = r#"{
            "category": "metadata.scrape",
            "storage": "u115",
            "name": "Some Show S01E01"
        }"#;
        let event: MediaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            MediaEvent::ScrapeComplete {
                storage: "u115".to_string(),
                name: "Some Show S01E01".to_string(),
            }
        );
    }

    #[test]
    fn unknown_category_deserializes_to_unknown() {
        let json = r#"{ "category": "library.deleted", "name": "whatever" }"#;
        let event: MediaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, MediaEvent::Unknown);
    }

    #[test]
    fn partial_payload_uses_defaults() {
        let json = r#"{ "category": "transfer.complete" }"#;
        let event: MediaEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            MediaEvent::TransferComplete {
                success: false,
                storage: String::new(),
                name: String::new(),
            }
        );
    }

    #[test]
    fn accessors_expose_storage_and_name() {
        let event = MediaEvent::ScrapeComplete {
            storage: "u115".to_string(),
            name: "Item".to_string(),
        };
        assert_eq!(event.storage(), Some("u115"));
        assert_eq!(event.display_name(), Some("Item"));
        assert_eq!(MediaEvent::Unknown.storage(), None);
        assert_eq!(MediaEvent::Unknown.display_name(), None);
    }
}
