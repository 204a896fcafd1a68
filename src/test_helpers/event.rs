//! Event fixtures.

use crate::models::MediaEvent;

/// A successful transfer-complete event.
pub fn transfer_event(storage: &str, name: &str) -> MediaEvent {
    MediaEvent::TransferComplete {
        success: true,
        storage: storage.to_string(),
        name: name.to_string(),
    }
}

/// A transfer-complete event whose transfer failed.
pub fn failed_transfer_event(storage: &str, name: &str) -> MediaEvent {
    MediaEvent::TransferComplete {
        success: false,
        storage: storage.to_string(),
        name: name.to_string(),
    }
}

/// A metadata-scrape event.
pub fn scrape_event(storage: &str, name: &str) -> MediaEvent {
    MediaEvent::ScrapeComplete {
        storage: storage.to_string(),
        name: name.to_string(),
    }
}
