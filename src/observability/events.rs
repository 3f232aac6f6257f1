//! Observability events
//!
//! All observable lifecycle and request events emitted by the service.
//! Events are explicit and typed.

use std::fmt;

use super::Severity;

/// Observable events in the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup begins
    BootStart,
    /// Configuration loaded
    ConfigLoaded,
    /// Document store opened
    StoreOpened,
    /// Server bound and serving requests
    Serving,
    /// Init command wrote config and data files
    InitComplete,

    // Request handling
    /// A request was rejected with an error response
    RequestRejected,

    // Store mutations
    /// A document was inserted
    DocumentInserted,
    /// A document was updated
    DocumentUpdated,
    /// A document was deleted
    DocumentDeleted,
    /// A store snapshot was written to disk
    SnapshotWritten,
}

impl Event {
    /// Returns the event name used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "BOOT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "SERVING",
            Event::InitComplete => "INIT_COMPLETE",
            Event::RequestRejected => "REQUEST_REJECTED",
            Event::DocumentInserted => "DOCUMENT_INSERTED",
            Event::DocumentUpdated => "DOCUMENT_UPDATED",
            Event::DocumentDeleted => "DOCUMENT_DELETED",
            Event::SnapshotWritten => "SNAPSHOT_WRITTEN",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::RequestRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "BOOT_START");
        assert_eq!(Event::RequestRejected.as_str(), "REQUEST_REJECTED");
        assert_eq!(Event::DocumentInserted.as_str(), "DOCUMENT_INSERTED");
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::RequestRejected.severity(), Severity::Warn);
        assert_eq!(Event::Serving.severity(), Severity::Info);
    }
}
