//! Fachada de checkout para la aplicación.
//!
//! Traduce el resultado del organizer `PlaceOrder` a tipos de la aplicación:
//! un `Receipt` si el pedido se confirmó, o `AppError::Rejected` con el
//! mensaje de negocio si algún step falló.

use interactor_core::{Context, Interactor};
use interactor_steps::{PlaceOrder, Receipt};
use log::info;
use serde_json::Value;

use crate::errors::AppError;

/// Ejecuta el checkout completo y devuelve el recibo.
pub fn place_order(input: Value) -> Result<Receipt, AppError> {
    match PlaceOrder::call_strict(input) {
        Ok(mut ctx) => {
            let receipt: Receipt = ctx.get_as("receipt")?;
            info!("order {} confirmed", receipt.confirmation);
            Ok(receipt)
        }
        Err(err) => match err.into_failure() {
            Ok(failure) => {
                let reason = match failure.error() {
                    Some(Value::String(msg)) => msg.clone(),
                    Some(other) => other.to_string(),
                    None => failure.to_string(),
                };
                info!("order rejected at {:?}: {}", failure.step(), reason);
                Err(AppError::Rejected(reason))
            }
            Err(other) => Err(other.into()),
        },
    }
}

/// Resumen de una línea del estado final de un contexto.
pub fn describe(ctx: &Context) -> String {
    let outcome = if ctx.success() { "ok" } else { "failed" };
    format!("outcome={} events={} fields={}",
            outcome,
            ctx.event_variants().join(""),
            ctx.snapshot().len())
}
