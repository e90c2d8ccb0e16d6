//! interactor-steps: steps de ejemplo construidos sobre `interactor-core`.
//!
//! Este crate provee:
//! - Tipos de pedido (`CartItem`, `Receipt`) que viajan como JSON en el
//!   contexto.
//! - `AuditTrail`: conjunto de declaraciones compartido (campo held `audit`).
//! - Steps de checkout (`ValidateCart`, `PriceOrder`, `ReserveInventory`,
//!   `ChargePayment`, `ConfirmOrder`) y el organizer `PlaceOrder` que los
//!   encadena.
//!
//! Nota: el core sólo ve `serde_json::Value`; aquí los steps decodifican con
//! `Context::get_as` y escriben con `Context::set`.

pub mod audit;
pub mod order;
pub mod steps;

pub use audit::AuditTrail;
pub use order::{CartItem, InventoryError, PaymentError, Receipt, StockError};
pub use steps::{ChargePayment, ConfirmOrder, PlaceOrder, PriceOrder, ReserveInventory, ValidateCart};
