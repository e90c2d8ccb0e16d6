use interactor_core::{Interactor, CONFIG};
use interactor_rust::checkout::{self, describe};
use interactor_steps::{audit, PlaceOrder};
use serde_json::{json, Value};

fn cart() -> Value {
    json!([
        { "sku": "apple", "quantity": 3, "unit_price_cents": 120 },
        { "sku": "pear", "quantity": 2, "unit_price_cents": 250 },
    ])
}

/// Pedido completo por el punto de entrada recuperador.
fn run_happy_path() {
    match PlaceOrder::call(json!({ "items": cart() })) {
        Ok(mut ctx) => {
            println!("[call] {}", describe(&ctx));
            match ctx.get("receipt") {
                Ok(receipt) => println!("[call] receipt={receipt}"),
                Err(e) => eprintln!("[call] receipt no disponible: {e}"),
            }
            if let Ok(entries) = audit::entries(&mut ctx) {
                for entry in entries {
                    println!("  audit: {entry}");
                }
            }
        }
        Err(e) => eprintln!("[call] error inesperado: {e}"),
    }
}

/// Pago rechazado: `call` no devuelve error, el contexto queda fallido.
fn run_declined_payment() {
    match PlaceOrder::call(json!({ "items": cart(), "payment_method": "declined_card" })) {
        Ok(ctx) => println!("[declined] {} error={:?}", describe(&ctx), ctx.error()),
        Err(e) => eprintln!("[declined] error inesperado: {e}"),
    }
}

/// Falta de stock por el punto de entrada propagador: se imprime la pila de
/// causas.
fn run_out_of_stock() {
    let input = json!({ "items": [{ "sku": "plum", "quantity": 2, "unit_price_cents": 90 }] });
    match PlaceOrder::call_strict(input) {
        Ok(ctx) => println!("[strict] inesperadamente ok: {}", describe(&ctx)),
        Err(err) => match err.into_failure() {
            Ok(failure) => {
                println!("[strict] {failure}");
                for (depth, cause) in failure.cause_stack().iter().enumerate() {
                    println!("  #{depth} {}: {}", cause.kind, cause.message);
                }
                if let Some(ctx) = failure.context() {
                    println!("[strict] {}", describe(ctx));
                }
            }
            Err(other) => eprintln!("[strict] error no manejado: {other}"),
        },
    }
}

fn main() {
    // Cargar variables de entorno desde .env si existe (antes de leer CONFIG)
    let _ = dotenvy::dotenv();
    println!("config: journal={}", CONFIG.journal);

    run_happy_path();
    run_declined_payment();
    run_out_of_stock();

    match checkout::place_order(json!({ "items": cart(), "warehouse": "outlet" })) {
        Ok(receipt) => println!("[facade] confirmado {}", receipt.confirmation),
        Err(e) => println!("[facade] {e}"),
    }
}
