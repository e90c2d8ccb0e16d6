//! interactor-rust
//!
//! Este crate actúa como la capa de aplicación sobre los pipelines:
//! - Expone `errors` con `AppError` para los consumidores.
//! - Expone `checkout` como fachada del organizer `PlaceOrder`.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod checkout;
pub mod errors;

pub use errors::AppError;
