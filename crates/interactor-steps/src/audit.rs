//! Declaración compartida `AuditTrail`.
//!
//! Los steps que la incluyen (`includes [AuditTrail]`) comparten el campo held
//! `audit`: una lista que arranca vacía en cada contexto y a la que cada step
//! agrega una entrada.

use interactor_core::{Context, ContextError, Declare, DefaultRule, FieldRegistry};
use serde_json::{json, Value};

#[derive(Debug, Default, Clone, Copy)]
pub struct AuditTrail;

impl Declare for AuditTrail {
    fn declare(fields: &mut FieldRegistry) {
        fields.hold_with("audit", DefaultRule::value(json!([])));
    }
}

/// Agrega `entry` al final de `audit`.
pub fn note(ctx: &mut Context, entry: impl Into<String>) -> Result<(), ContextError> {
    let entry = Value::String(entry.into());
    match ctx.get_mut("audit")? {
        Value::Array(entries) => entries.push(entry),
        other => *other = Value::Array(vec![entry]),
    }
    Ok(())
}

/// Entradas registradas hasta ahora.
pub fn entries(ctx: &mut Context) -> Result<Vec<String>, ContextError> {
    ctx.get_as("audit")
}
