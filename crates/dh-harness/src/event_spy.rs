use crate::EventRecord;

use dh_ws::{EventArgs, EventHandler, EventServer};

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

/// Records every invocation of the events it is attached to.
///
/// Clones share the same log. The connection task appends, any number of
/// readers take snapshots.
#[derive(Debug, Clone, Default)]
pub struct EventSpy {
    records: Arc<RwLock<Vec<EventRecord>>>,
}

impl EventSpy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register this spy as a handler for `event` on `emitter`
    pub fn attach(&self, event: &str, emitter: &EventServer) {
        debug!("Spy attached to '{event}'");
        emitter.on(event, self.clone());
    }

    pub fn call_count(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Handler arguments in invocation order
    pub fn call_args(&self) -> Vec<EventArgs> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|record| record.args.clone())
            .collect()
    }

    pub fn records(&self) -> Vec<EventRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_call(&self) -> Option<EventArgs> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|record| record.args.clone())
    }
}

impl EventHandler for EventSpy {
    fn handle(&self, args: &EventArgs) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(EventRecord::new(args.clone()));
    }
}
