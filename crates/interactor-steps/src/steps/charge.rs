//! ChargePayment: cobra `total_cents` con el medio de pago indicado.
//!
//! Medios de prueba: `declined_card` produce un fallo de negocio y
//! `gateway_down` un error no manejado de la pasarela.

use interactor_core::{interactor, InteractorError};
use serde_json::json;

use crate::audit::{self, AuditTrail};
use crate::order::PaymentError;

interactor! {
    pub struct ChargePayment {
        includes [AuditTrail]
        receive { total_cents }
        optional { payment_method: "card", currency: "EUR" }
        hold { charge_id }
    }
    execute(ctx) {
        let total: u64 = ctx.get_as("total_cents")?;
        let method: String = ctx.get_as("payment_method")?;
        match method.as_str() {
            "gateway_down" => return Err(InteractorError::unhandled(PaymentError::GatewayUnavailable)),
            "declined_card" => {
                return ctx.fail(json!({ "error": "payment declined", "declined_method": &method }));
            }
            _ => {}
        }
        let currency: String = ctx.get_as("currency")?;
        let charge = format!("CHG-{method}-{total}");
        ctx.set("charge_id", &charge)?;
        audit::note(ctx, format!("charged {total} {currency} via {method}"))?;
        Ok(())
    }
}
