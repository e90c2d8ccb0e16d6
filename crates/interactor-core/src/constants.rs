//! Constantes del core.

/// Nombres que el contexto usa para su metadata (`to_h`) y que no pueden
/// declararse como campos.
pub const RESERVED_FIELDS: &[&str] = &["success", "error", "error_cause"];
