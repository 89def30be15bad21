// Turso/libsql persistence - alias entries and relayed feed posts

mod aliases;
mod client;
mod feed;
mod schema;

pub use client::{TursoClient, TursoError};
pub use schema::initialize_schema;
