mod event_spy;
mod eventual;
mod server_host;
