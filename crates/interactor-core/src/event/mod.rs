//! Journal de ejecución: eventos append-only por contexto.

mod journal;
mod types;

pub use journal::Journal;
pub use types::{RunEvent, RunEventKind};
