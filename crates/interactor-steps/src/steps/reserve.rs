//! ReserveInventory: reserva stock en un almacén.
//!
//! Cuando el almacén no alcanza, el error del inventario (con su causa de
//! stock) queda capturado en `error_cause` del contexto.

use interactor_core::interactor;
use serde_json::json;

use crate::audit::{self, AuditTrail};
use crate::order::{stock_level, CartItem, InventoryError, StockError};

interactor! {
    pub struct ReserveInventory {
        includes [AuditTrail]
        receive { items }
        optional { warehouse: "main" }
        hold { reservation_id }
    }
    execute(ctx) {
        let items: Vec<CartItem> = ctx.get_as("items")?;
        let warehouse: String = ctx.get_as("warehouse")?;
        for item in &items {
            let available = match stock_level(&warehouse, &item.sku) {
                Ok(available) => available,
                Err(err) => {
                    return ctx.fail_with_cause(&err, json!({ "error": format!("warehouse {warehouse} is not available") }));
                }
            };
            if available < item.quantity {
                let err = InventoryError::Reservation { sku: item.sku.clone(),
                                                        source: StockError { warehouse: warehouse.clone(),
                                                                             sku: item.sku.clone(),
                                                                             available,
                                                                             requested: item.quantity } };
                return ctx.fail_with_cause(&err, json!({ "error": format!("out of stock: {}", item.sku) }));
            }
        }
        let units: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();
        let reservation = format!("RSV-{warehouse}-{units:04}");
        ctx.set("reservation_id", &reservation)?;
        audit::note(ctx, format!("reserved {units} unit(s) as {reservation}"))?;
        Ok(())
    }
}
