//! Tipos de pedido y errores de los colaboradores externos simulados
//! (inventario y pasarela de pago).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Línea de carrito. Los importes van en céntimos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub sku: String,
    pub quantity: u32,
    pub unit_price_cents: u64,
}

impl CartItem {
    pub fn new(sku: impl Into<String>, quantity: u32, unit_price_cents: u64) -> Self {
        Self { sku: sku.into(),
               quantity,
               unit_price_cents }
    }

    /// Importe de la línea; `None` si no cabe en `u64`.
    pub fn line_total_cents(&self) -> Option<u64> {
        self.unit_price_cents.checked_mul(u64::from(self.quantity))
    }
}

/// Resultado final de un pedido confirmado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub confirmation: String,
    pub total_cents: u64,
    pub currency: String,
    pub reservation_id: String,
    pub charge_id: String,
}

/// Falta de stock en un almacén.
#[derive(Debug, Error)]
#[error("warehouse `{warehouse}` has {available} unit(s) of {sku}, {requested} requested")]
pub struct StockError {
    pub warehouse: String,
    pub sku: String,
    pub available: u32,
    pub requested: u32,
}

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("unknown warehouse `{0}`")]
    UnknownWarehouse(String),
    #[error("cannot reserve {sku}")]
    Reservation {
        sku: String,
        #[source]
        source: StockError,
    },
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment gateway unavailable")]
    GatewayUnavailable,
}

/// Stock disponible por almacén y SKU (tabla fija en memoria).
pub fn stock_level(warehouse: &str, sku: &str) -> Result<u32, InventoryError> {
    let table: &[(&str, u32)] = match warehouse {
        "main" => &[("apple", 50), ("pear", 20), ("plum", 0)],
        "outlet" => &[("apple", 5), ("plum", 12)],
        other => return Err(InventoryError::UnknownWarehouse(other.to_string())),
    };
    Ok(table.iter()
            .find(|(s, _)| *s == sku)
            .map(|(_, n)| *n)
            .unwrap_or(0))
}
