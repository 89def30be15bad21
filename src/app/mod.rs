//! Application wiring: opening storage, building the bot and running the console adapter.

mod console;
mod setup;

pub use console::{run_console, StdoutSink};
pub use setup::{setup, Services};
