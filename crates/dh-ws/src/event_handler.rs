use crate::EventArgs;

/// Receives events dispatched by an [`EventServer`](crate::EventServer).
///
/// Handlers run on the connection task that observed the event, so they
/// must not block.
pub trait EventHandler: Send + Sync {
    fn handle(&self, args: &EventArgs);
}

impl<F> EventHandler for F
where
    F: Fn(&EventArgs) + Send + Sync,
{
    fn handle(&self, args: &EventArgs) {
        self(args)
    }
}
