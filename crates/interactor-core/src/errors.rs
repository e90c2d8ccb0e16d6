//! Errores específicos del core.
//!
//! Política de propagación en dos niveles: `InteractorError::Failure` es la
//! única variante que el core intercepta (en `Runner::run` / `Interactor::call`);
//! el resto siempre se propaga sin tocar el flag de éxito del contexto.

use std::error::Error as StdError;

use thiserror::Error;

use crate::failure::Failure;

/// Errores de construcción y acceso al `Context`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ContextError {
    #[error("missing required fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("default for field `{0}` depends on itself")]
    DefaultCycle(String),
    #[error("input attributes must be a JSON object, got {0}")]
    InvalidInput(String),
    #[error("field `{field}` could not be decoded: {message}")]
    Decode { field: String, message: String },
    #[error("field `{field}` could not be encoded: {message}")]
    Encode { field: String, message: String },
}

/// Error devuelto por la lógica de negocio y los puntos de entrada.
#[derive(Debug, Error)]
pub enum InteractorError {
    /// Fallo de negocio (señal controlada).
    #[error(transparent)]
    Failure(Box<Failure>),
    /// Error de construcción o acceso al contexto.
    #[error(transparent)]
    Context(#[from] ContextError),
    /// Cualquier otro error de la lógica de negocio.
    #[error(transparent)]
    Unhandled(Box<dyn StdError + Send + Sync + 'static>),
}

impl InteractorError {
    /// Envuelve un error arbitrario como no manejado.
    pub fn unhandled<E>(error: E) -> Self
        where E: Into<Box<dyn StdError + Send + Sync + 'static>>
    {
        Self::Unhandled(error.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    pub fn as_failure(&self) -> Option<&Failure> {
        match self {
            Self::Failure(f) => Some(f),
            _ => None,
        }
    }

    /// Extrae el `Failure` o devuelve el error original.
    pub fn into_failure(self) -> Result<Failure, Self> {
        match self {
            Self::Failure(f) => Ok(*f),
            other => Err(other),
        }
    }
}

impl From<Failure> for InteractorError {
    fn from(failure: Failure) -> Self {
        Self::Failure(Box::new(failure))
    }
}

/// Resultado de la lógica de negocio de un step.
pub type StepResult<T = ()> = Result<T, InteractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_name() {
        let err = ContextError::MissingFields { fields: vec!["foo".into(), "bar".into()] };
        assert_eq!(err.to_string(), "missing required fields: foo, bar");
    }

    #[test]
    fn unhandled_wraps_foreign_errors() {
        let io = std::io::Error::other("disk gone");
        let err = InteractorError::unhandled(io);
        assert!(!err.is_failure());
        assert_eq!(err.to_string(), "disk gone");
        assert!(err.into_failure().is_err());
    }

    #[test]
    fn context_errors_convert() {
        let err: InteractorError = ContextError::UnknownField("x".into()).into();
        assert!(matches!(err, InteractorError::Context(ContextError::UnknownField(ref f)) if f == "x"));
    }
}
