use dh_ws::EventArgs;

use chrono::{DateTime, Utc};

/// One observed invocation of an event handler
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub args: EventArgs,
    pub recorded_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn new(args: EventArgs) -> Self {
        Self {
            args,
            recorded_at: Utc::now(),
        }
    }
}
