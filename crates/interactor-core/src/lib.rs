//! interactor-core: modelo de ejecución por pipelines de comandos.
//!
//! Un *interactor* (step) encapsula una unidad de lógica de negocio que lee y
//! escribe un `Context` compartido. Cada tipo de step declara la forma de
//! contexto que acepta (campos requeridos, opcionales con default y campos
//! locales "held") y los *organizers* encadenan varios steps sobre una única
//! instancia de contexto, cortando la ejecución en el primer fallo.
//!
//! Módulos:
//! - `declaration`: registro de campos por tipo de step y `ContextShape`.
//! - `context`: contenedor mutable con flag de éxito/fallo.
//! - `failure`: señal de fallo de negocio y cadena de causas.
//! - `step`: trait `Interactor`, `Runner` y `Organizer`.
//! - `event`: journal de ejecución (instrumentación).
pub mod config;
pub mod constants;
pub mod context;
pub mod declaration;
pub mod errors;
pub mod event;
pub mod failure;
pub mod step;

pub use config::{RuntimeConfig, CONFIG};
pub use context::{Attributes, Context, FieldSlot};
pub use declaration::{ContextShape, Declare, DefaultRule, FieldKind, FieldRegistry, FieldSpec};
pub use errors::{ContextError, InteractorError, StepResult};
pub use event::{Journal, RunEvent, RunEventKind};
pub use failure::{Cause, Failure};
pub use step::{shape_of, Interactor, Organized, Organizer, Runner, StepStatus, StepType};

// Usado por los macros exportados para no exigir `serde_json` al crate cliente.
#[doc(hidden)]
pub use serde_json as __serde_json;
