pub mod assertion_mismatch;
pub mod connection_driver;
pub mod error;
pub mod event_record;
pub mod event_spy;
pub mod eventual;
pub mod lifecycle_state;
pub mod retry_policy;
pub mod routes;
pub mod server_handle;
pub mod server_host;
pub mod server_lifecycle;
pub mod session;
pub mod session_state;
pub mod task_host;
pub mod thread_host;

pub use assertion_mismatch::{AssertionMismatch, expect_eq};
pub use connection_driver::ConnectionDriver;
pub use error::{HarnessError, Result};
pub use event_record::EventRecord;
pub use event_spy::EventSpy;
pub use eventual::{check, retry_until};
pub use lifecycle_state::LifecycleState;
pub use retry_policy::RetryPolicy;
pub use routes::{DEFAULT_ROUTE_BODY, build_router};
pub use server_handle::ServerHandle;
pub use server_host::{ServerHost, bind_listener, host_for};
pub use server_lifecycle::{ServerLifecycle, with_server};
pub use session::Session;
pub use session_state::SessionState;
pub use task_host::TaskHost;
pub use thread_host::ThreadHost;

pub use dh_config::HostMode;

#[cfg(test)]
mod tests;
