//! Declaración de campos por tipo de step.
//!
//! Un tipo de step acumula campos requeridos, opcionales (con default
//! constante o calculado) y held (estado local). El resultado es una
//! `ContextShape` fija por tipo, construida una sola vez al primer uso.
//!
//! La composición entre conjuntos de declaraciones (`include`) fusiona las
//! listas deduplicando por nombre de campo.

mod registry;
mod shape;
mod spec;

pub use registry::{Declare, FieldRegistry};
pub use shape::ContextShape;
pub use spec::{ComputeFn, DefaultRule, FieldKind, FieldSpec};
