//! Tipos de evento emitidos por el `Runner`.
//!
//! Rol:
//! - Cada step que corre sobre un contexto deja eventos en su `Journal`.
//! - El orden de los eventos refleja el orden total de ejecución de los
//!   miembros de un organizer (no hay concurrencia entre steps).
//! - Son instrumentación: no forman parte de `to_h` ni del estado del contexto.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RunEventKind {
    /// El step comenzó a ejecutar su lógica. No implica éxito.
    StepStarted { step: String },
    /// La lógica terminó sin error.
    StepSucceeded { step: String },
    /// Fallo de negocio; `error` es el valor de `error` del contexto.
    StepFailed { step: String, error: Option<Value> },
    /// Error no manejado; el flag de éxito no se tocó.
    StepErrored { step: String, message: String },
    /// El punto de entrada recuperador absorbió el fallo.
    FailureRecovered { step: String },
}

impl RunEventKind {
    /// Código compacto de una letra (útil en tests).
    pub fn code(&self) -> &'static str {
        match self {
            Self::StepStarted { .. } => "S",
            Self::StepSucceeded { .. } => "F",
            Self::StepFailed { .. } => "X",
            Self::StepErrored { .. } => "E",
            Self::FailureRecovered { .. } => "R",
        }
    }

    pub fn step(&self) -> &str {
        match self {
            Self::StepStarted { step }
            | Self::StepSucceeded { step }
            | Self::StepFailed { step, .. }
            | Self::StepErrored { step, .. }
            | Self::FailureRecovered { step } => step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvent {
    pub seq: u64, // asignado por el journal (orden append)
    pub run_id: Uuid,
    pub kind: RunEventKind,
    pub ts: DateTime<Utc>, // metadato
}
