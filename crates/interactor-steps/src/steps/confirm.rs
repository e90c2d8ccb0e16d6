//! ConfirmOrder: emite el `Receipt` final.

use interactor_core::interactor;

use crate::audit::{self, AuditTrail};
use crate::order::Receipt;

interactor! {
    pub struct ConfirmOrder {
        includes [AuditTrail]
        receive { reservation_id, charge_id, total_cents }
        optional { currency: "EUR" }
        hold { receipt }
    }
    execute(ctx) {
        let reservation_id: String = ctx.get_as("reservation_id")?;
        let total_cents: u64 = ctx.get_as("total_cents")?;
        let confirmation = confirmation_for(&reservation_id, total_cents);
        let receipt = Receipt { confirmation: confirmation.clone(),
                                total_cents,
                                currency: ctx.get_as("currency")?,
                                reservation_id,
                                charge_id: ctx.get_as("charge_id")? };
        ctx.set("receipt", &receipt)?;
        audit::note(ctx, format!("confirmed {confirmation}"))?;
        Ok(())
    }
}

/// `RSV-main-0005` + 1234 céntimos -> `ORD-main-0005-1234`.
pub fn confirmation_for(reservation_id: &str, total_cents: u64) -> String {
    let reservation = reservation_id.strip_prefix("RSV-").unwrap_or(reservation_id);
    format!("ORD-{reservation}-{total_cents}")
}
