use dh_harness::EventRecord;
use dh_ws::ConnectionId;

/// Outcome of a successful scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Base url the server was hosted on
    pub url: String,
    /// Session id the server assigned to the client
    pub session_id: ConnectionId,
    /// Predicate evaluations until the disconnect was observed
    pub attempts: u32,
    /// Every recorded `disconnect` invocation
    pub disconnects: Vec<EventRecord>,
}
