//! PlaceOrder: checkout completo como organizer.
//!
//! Validate → Price → Reserve → Charge → Confirm sobre un único contexto. Un
//! fallo en cualquier miembro detiene la cadena; lo ya hecho (p. ej. la
//! reserva) queda en el contexto, sin compensación.

use interactor_core::organizer;

use super::{ChargePayment, ConfirmOrder, PriceOrder, ReserveInventory, ValidateCart};

organizer! {
    pub struct PlaceOrder {
        organize [ValidateCart, PriceOrder, ReserveInventory, ChargePayment, ConfirmOrder]
    }
}
