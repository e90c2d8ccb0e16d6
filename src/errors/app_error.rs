use interactor_core::{ContextError, InteractorError};
use thiserror::Error;

/// Errores de la aplicación que consume los pipelines.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Pedido rechazado: {0}")]
    Rejected(String),
    #[error(transparent)]
    Interactor(#[from] InteractorError),
}

impl From<ContextError> for AppError {
    fn from(err: ContextError) -> Self {
        Self::Interactor(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_variant_format() {
        let err = AppError::Rejected("sin stock".into());
        assert_eq!(err.to_string(), "Pedido rechazado: sin stock");
    }

    #[test]
    fn test_only_rejections_and_interactor_errors() {
        let errs: [AppError; 2] = [AppError::Rejected("x".into()), ContextError::UnknownField("y".into()).into()];
        for err in errs {
            match err {
                AppError::Rejected(_) | AppError::Interactor(_) => {}
            }
        }
    }

    #[test]
    fn test_context_error_from() {
        let err: AppError = ContextError::UnknownField("x".into()).into();
        assert_eq!(err.to_string(), "unknown field `x`");
    }
}
