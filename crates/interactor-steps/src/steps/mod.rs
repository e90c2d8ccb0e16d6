//! Steps del checkout y el organizer que los encadena.

pub mod charge;
pub mod confirm;
pub mod place_order;
pub mod price;
pub mod reserve;
pub mod validate;

pub use charge::ChargePayment;
pub use confirm::ConfirmOrder;
pub use place_order::PlaceOrder;
pub use price::PriceOrder;
pub use reserve::ReserveInventory;
pub use validate::ValidateCart;
