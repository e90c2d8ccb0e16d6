use std::any::type_name;
use std::sync::Arc;

use serde_json::Value;

use super::{shape_of, Runner};
use crate::context::Context;
use crate::declaration::{ContextShape, Declare};
use crate::errors::{ContextError, InteractorError, StepResult};

/// Nombre corto de un tipo (último segmento de su ruta).
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Un step: unidad de lógica de negocio que opera sobre un `Context`.
///
/// Los campos que acepta se declaran vía `Declare`; la lógica va en
/// `execute`. Los puntos de entrada a nivel de tipo construyen el contexto y
/// ejecutan un `Runner`:
/// - `call`: recuperador, devuelve el contexto aunque el step haya fallado.
/// - `call_strict`: propagador, devuelve el `Failure` (con el contexto final
///   adjunto) como `Err`.
/// - `call_in`: propagador sobre un contexto existente (lo usan los
///   organizers para encadenar miembros).
///
/// Los errores de construcción y los no manejados se propagan siempre, sea
/// cual sea el punto de entrada.
pub trait Interactor: Declare + Default + 'static {
    /// Nombre estable del step (usado en logs y en el journal).
    fn name() -> &'static str {
        short_type_name::<Self>()
    }

    /// Lógica de negocio. Señala fallo de negocio con `ctx.fail(..)`.
    fn execute(&mut self, _ctx: &mut Context) -> StepResult {
        Ok(())
    }

    /// Forma de contexto del tipo (ensamblada una vez y cacheada).
    fn shape() -> Arc<ContextShape> {
        shape_of::<Self>()
    }

    fn build(input: impl Into<Value>) -> Result<Context, ContextError> {
        Self::shape().build(input)
    }

    fn call(input: impl Into<Value>) -> Result<Context, InteractorError> {
        let mut context = Self::build(input)?;
        Runner::<Self>::new(&mut context)?.run()?;
        Ok(context)
    }

    fn call_strict(input: impl Into<Value>) -> Result<Context, InteractorError> {
        let mut context = Self::build(input)?;
        let outcome = Runner::<Self>::new(&mut context)?.run_strict();
        match outcome {
            Ok(()) => Ok(context),
            Err(InteractorError::Failure(failure)) => Err(failure.attach(context).into()),
            Err(other) => Err(other),
        }
    }

    fn call_in(context: &mut Context) -> StepResult {
        Runner::<Self>::new(context)?.run_strict()
    }
}
