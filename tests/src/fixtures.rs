//! # Test Fixtures
//!
//! Receivers that write what they saw into a shared [`Journal`], so tests can
//! assert both what was delivered and in which order.

use notification_center::ObserverId;
use parking_lot::Mutex;
use std::sync::Arc;

/// Ordered record of deliveries across receivers.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// A named receiver with one procedure per payload shape.
pub struct Recorder {
    pub label: &'static str,
    journal: Journal,
}

impl Recorder {
    pub fn new(label: &'static str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            label,
            journal: journal.clone(),
        })
    }

    pub fn identity(self: &Arc<Self>) -> ObserverId {
        ObserverId::of(&**self)
    }

    pub fn on_tick(&self) {
        self.journal.push(format!("{}:tick", self.label));
    }

    pub fn on_resize(&self, size: u32) {
        self.journal.push(format!("{}:resize:{size}", self.label));
    }

    pub fn on_rename(&self, name: String) {
        self.journal.push(format!("{}:rename:{name}", self.label));
    }

    pub fn on_document(&self, document: &Document) {
        self.journal
            .push(format!("{}:document:{}", self.label, document.title));
    }
}

/// Payload delivered by pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub pages: u32,
}

impl Document {
    pub fn new(title: &str, pages: u32) -> Arc<Self> {
        Arc::new(Self {
            title: title.to_string(),
            pages,
        })
    }
}
