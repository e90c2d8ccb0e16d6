//! Steps (interactors) y su ejecución.
//!
//! - `Interactor`: trait de un tipo de step y sus puntos de entrada.
//! - `Runner`: ejecuta un step sobre un contexto prestado y normaliza el
//!   resultado (journal, flag de fallo, logs).
//! - `Organizer`: step compuesto por una lista ordenada de tipos de step.
//! - `shape_of`: caché de `ContextShape` por tipo.

mod cache;
pub mod definition;
pub mod macros; // interactor!, organizer!, organize!
pub mod organizer;
mod runner;
mod status;

pub use cache::shape_of;
pub use definition::Interactor;
pub use organizer::{Organized, Organizer, StepType};
pub use runner::Runner;
pub use status::StepStatus;
