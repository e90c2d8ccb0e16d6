use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::Context;
use crate::errors::ContextError;

/// Tipo de campo declarado por un step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Debe venir en el mapa de entrada al construir el contexto.
    Required,
    /// Puede venir en la entrada; si no, se resuelve con su `DefaultRule`.
    Optional,
    /// Estado local del step: nunca se acepta desde la entrada.
    Held,
}

impl FieldKind {
    fn rank(self) -> u8 {
        match self {
            Self::Held => 0,
            Self::Optional => 1,
            Self::Required => 2,
        }
    }

    /// El más exigente de los dos con la entrada (`Held < Optional < Required`).
    pub fn widen(self, other: Self) -> Self {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// El menos exigente de los dos.
    pub fn narrow(self, other: Self) -> Self {
        if other.rank() < self.rank() {
            other
        } else {
            self
        }
    }
}

/// Firma de un default calculado contra la instancia de contexto.
pub type ComputeFn = dyn Fn(&mut Context) -> Result<Value, ContextError> + Send + Sync;

/// Regla de resolución de default de un campo opcional o held.
///
/// `Value` se clona en cada instancia al materializarse, por lo que dos
/// contextos nunca comparten el mismo contenedor por defecto.
#[derive(Clone, Default)]
pub enum DefaultRule {
    /// Sin default: la lectura devuelve `null` sin memoizar.
    #[default]
    Absent,
    /// Default constante.
    Value(Value),
    /// Default calculado contra el contexto (puede leer otros campos).
    Computed(Arc<ComputeFn>),
}

impl DefaultRule {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn computed<F>(rule: F) -> Self
        where F: Fn(&mut Context) -> Result<Value, ContextError> + Send + Sync + 'static
    {
        Self::Computed(Arc::new(rule))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl fmt::Debug for DefaultRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

/// Especificación de un campo dentro de una `ContextShape`.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub default: DefaultRule,
}

impl FieldSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               kind: FieldKind::Required,
               default: DefaultRule::Absent }
    }

    pub fn optional(name: impl Into<String>, default: DefaultRule) -> Self {
        Self { name: name.into(),
               kind: FieldKind::Optional,
               default }
    }

    pub fn held(name: impl Into<String>, default: DefaultRule) -> Self {
        Self { name: name.into(),
               kind: FieldKind::Held,
               default }
    }

    /// Indica si el campo acepta valores desde el mapa de entrada.
    pub fn accepts_input(&self) -> bool {
        !matches!(self.kind, FieldKind::Held)
    }
}
