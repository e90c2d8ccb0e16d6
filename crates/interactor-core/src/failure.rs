//! Señal de fallo de negocio.
//!
//! Un `Failure` identifica el contexto en el que se produjo (por `id`) y la
//! cadena de causas originales. Mientras viaja por el canal de `Result` el
//! contexto sigue prestado al llamador; los puntos de entrada que son dueños
//! del contexto (`Interactor::call_strict`) lo adjuntan antes de devolverlo.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::context::Context;
use crate::step::definition::short_type_name;

/// Un eslabón de la cadena de causas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Identificador del error. Para el error recibido es el nombre de su
    /// tipo; para sus `source()` sólo se tiene `dyn Error` y se usa el primer
    /// identificador de su `Debug` (en un enum, el nombre de la variante).
    pub kind: String,
    pub message: String,
}

impl Cause {
    /// Entrada que representa a la propia señal de fallo.
    pub const FAILURE_KIND: &'static str = "Failure";

    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self { kind: kind.into(),
               message: message.into() }
    }

    /// Causa a partir de un `dyn Error` (tipo deducido de su `Debug`).
    pub fn of(error: &(dyn StdError + 'static)) -> Self {
        Self::new(debug_kind(error), error.to_string())
    }

    /// Cadena completa desde `error` siguiendo `source()`.
    /// Orden: primero el error recibido, luego sus causas hacia el origen.
    pub fn chain<E: StdError + 'static>(error: &E) -> Vec<Cause> {
        let mut out = vec![Self::new(short_type_name::<E>(), error.to_string())];
        let mut current = error.source();
        while let Some(source) = current {
            out.push(Self::of(source));
            current = source.source();
        }
        out
    }

    pub fn to_value(&self) -> Value {
        json!({ "kind": self.kind, "message": self.message })
    }
}

// `Debug` derivado empieza por el nombre del tipo o de la variante.
fn debug_kind(error: &dyn StdError) -> String {
    let repr = format!("{error:?}");
    let kind: String = repr.chars()
                           .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == ':')
                           .collect();
    if kind.is_empty() {
        "Error".to_string()
    } else {
        kind
    }
}

/// Fallo de negocio de un step.
#[derive(Debug)]
pub struct Failure {
    context_id: Uuid,
    step: Option<String>,
    error: Option<Value>,
    causes: Vec<Cause>,
    context: Option<Box<Context>>,
}

impl Failure {
    /// Crea un fallo para `context`, copiando su `error` y `error_cause`.
    ///
    /// No modifica el contexto: el `Runner` marca el fallo al recibirlo.
    /// Para marcar y fallar en un paso usar `Context::fail`.
    pub fn new(context: &Context) -> Self {
        Self { context_id: context.id(),
               step: None,
               error: context.error().cloned(),
               causes: context.error_cause().to_vec(),
               context: None }
    }

    /// Fija el valor de `error` del fallo.
    pub fn with_error(mut self, error: impl Into<Value>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Adjunta la cadena de causas de `error` (reemplaza la anterior).
    pub fn caused_by<E: StdError + 'static>(mut self, error: &E) -> Self {
        self.causes = Cause::chain(error);
        self
    }

    pub fn context_id(&self) -> Uuid {
        self.context_id
    }

    /// `true` si el fallo se produjo sobre esta misma instancia de contexto.
    pub fn refers_to(&self, context: &Context) -> bool {
        self.context_id == context.id()
    }

    /// Nombre del step que originó el fallo (el más interno).
    pub fn step(&self) -> Option<&str> {
        self.step.as_deref()
    }

    pub fn error(&self) -> Option<&Value> {
        self.error.as_ref()
    }

    /// Causas subyacentes, sin la propia señal de fallo.
    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }

    /// Pila completa: la señal de fallo seguida de sus causas, de la más
    /// externa a la más interna.
    pub fn cause_stack(&self) -> Vec<Cause> {
        let mut stack = Vec::with_capacity(self.causes.len() + 1);
        stack.push(Cause::new(Cause::FAILURE_KIND, self.to_string()));
        stack.extend(self.causes.iter().cloned());
        stack
    }

    /// Contexto final, presente cuando el punto de entrada era su dueño.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_deref()
    }

    pub fn into_context(self) -> Option<Context> {
        self.context.map(|c| *c)
    }

    pub(crate) fn attach(mut self, context: Context) -> Self {
        self.context = Some(Box::new(context));
        self
    }

    pub(crate) fn set_step_if_absent(&mut self, step: &str) {
        if self.step.is_none() {
            self.step = Some(step.to_string());
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.step, &self.error) {
            (Some(step), Some(Value::String(msg))) => write!(f, "step `{step}` failed: {msg}"),
            (Some(step), Some(other)) => write!(f, "step `{step}` failed: {other}"),
            (Some(step), None) => write!(f, "step `{step}` failed"),
            (None, Some(Value::String(msg))) => write!(f, "interactor failure: {msg}"),
            (None, Some(other)) => write!(f, "interactor failure: {other}"),
            (None, None) => f.write_str("interactor failure"),
        }
    }
}

impl StdError for Failure {}
