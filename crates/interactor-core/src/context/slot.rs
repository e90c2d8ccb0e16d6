use serde_json::Value;

/// Estado de un campo dentro de una instancia de contexto.
///
/// Distingue "nunca resuelto" de "default materializado" y de "asignado
/// explícitamente", de modo que un `null` explícito no se confunde con un
/// campo sin valor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldSlot {
    #[default]
    Unset,
    /// Resultado de evaluar la regla de default, memoizado en la instancia.
    Defaulted(Value),
    /// Valor de entrada o escritura explícita.
    Set(Value),
}

impl FieldSlot {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Unset => None,
            Self::Defaulted(v) | Self::Set(v) => Some(v),
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Self::Unset => None,
            Self::Defaulted(v) | Self::Set(v) => Some(v),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn is_materialized(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}
