//! PriceOrder: calcula subtotal, descuento, envío y total.
//!
//! - `discount_pct` (opcional, 0 por defecto) debe estar en `0..=100`.
//! - `shipping_cents` tiene default calculado a partir de `items`: gratis
//!   desde `FREE_SHIPPING_FROM_CENTS`, tarifa plana por debajo. El llamador
//!   puede fijarlo explícitamente.

use interactor_core::{interactor, Context, ContextError};
use serde_json::{json, Value};

use crate::audit::{self, AuditTrail};
use crate::order::CartItem;

pub const FREE_SHIPPING_FROM_CENTS: u64 = 5_000;
pub const FLAT_SHIPPING_CENTS: u64 = 499;

// `None` si algún importe no cabe en `u64`.
fn subtotal_of(items: &[CartItem]) -> Option<u64> {
    items.iter()
         .try_fold(0u64, |acc, item| item.line_total_cents().and_then(|line| acc.checked_add(line)))
}

// `pct` en 0..=100; exacto sin pasar por `subtotal * pct`.
fn discount_of(subtotal: u64, pct: u64) -> u64 {
    subtotal / 100 * pct + subtotal % 100 * pct / 100
}

fn shipping_for(ctx: &mut Context) -> Result<Value, ContextError> {
    let items: Vec<CartItem> = ctx.get_as("items")?;
    // un subtotal desbordado también supera el umbral
    let free = subtotal_of(&items).map_or(true, |cents| cents >= FREE_SHIPPING_FROM_CENTS);
    Ok(json!(if free { 0 } else { FLAT_SHIPPING_CENTS }))
}

interactor! {
    pub struct PriceOrder {
        includes [AuditTrail]
        receive { items }
        optional { currency: "EUR", discount_pct: 0 }
        computed { shipping_cents: shipping_for }
        hold { subtotal_cents, total_cents }
    }
    execute(ctx) {
        let items: Vec<CartItem> = ctx.get_as("items")?;
        let discount_pct: u64 = ctx.get_as("discount_pct")?;
        if discount_pct > 100 {
            return ctx.fail(json!({ "error": format!("discount of {discount_pct}% is not allowed") }));
        }
        let Some(subtotal) = subtotal_of(&items) else {
            return ctx.fail(json!({ "error": "order amount is out of range" }));
        };
        let shipping: u64 = ctx.get_as("shipping_cents")?;
        let Some(total) = (subtotal - discount_of(subtotal, discount_pct)).checked_add(shipping) else {
            return ctx.fail(json!({ "error": "order amount is out of range" }));
        };
        let currency: String = ctx.get_as("currency")?;

        ctx.set("subtotal_cents", subtotal)?;
        ctx.set("total_cents", total)?;
        audit::note(ctx, format!("priced at {total} {currency}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_matches_plain_percentage() {
        assert_eq!(discount_of(860, 10), 86);
        assert_eq!(discount_of(999, 33), 999 * 33 / 100);
        assert_eq!(discount_of(u64::MAX, 100), u64::MAX);
    }

    #[test]
    fn subtotal_overflow_is_none() {
        let items = vec![CartItem::new("a", 1, u64::MAX), CartItem::new("b", 1, 1)];
        assert_eq!(subtotal_of(&items), None);
        assert_eq!(subtotal_of(&items[1..]), Some(1));
    }
}
