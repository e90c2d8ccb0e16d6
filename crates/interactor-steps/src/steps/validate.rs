//! ValidateCart: rechaza carritos vacíos o con cantidades nulas.

use interactor_core::interactor;
use serde_json::json;

use crate::audit::{self, AuditTrail};
use crate::order::CartItem;

interactor! {
    pub struct ValidateCart {
        includes [AuditTrail]
        receive { items }
    }
    execute(ctx) {
        let items: Vec<CartItem> = ctx.get_as("items")?;
        if items.is_empty() {
            return ctx.fail(json!({ "error": "cart is empty" }));
        }
        if let Some(bad) = items.iter().find(|i| i.quantity == 0) {
            return ctx.fail(json!({ "error": format!("invalid quantity for {}", bad.sku) }));
        }
        audit::note(ctx, format!("validated {} line(s)", items.len()))?;
        Ok(())
    }
}
