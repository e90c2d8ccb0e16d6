use log::{debug, info, warn};

use super::{Interactor, StepStatus};
use crate::context::Context;
use crate::errors::{ContextError, InteractorError, StepResult};
use crate::event::RunEventKind;

/// Ejecuta un step sobre un contexto prestado.
///
/// Se consume al correr, por lo que cada instancia ejecuta su lógica a lo
/// sumo una vez.
pub struct Runner<'c, I: Interactor> {
    interactor: I,
    context: &'c mut Context,
    status: StepStatus,
}

impl<'c, I: Interactor> Runner<'c, I> {
    pub fn new(context: &'c mut Context) -> Result<Self, ContextError> {
        Self::with_interactor(I::default(), context)
    }

    /// Liga la forma de `I` al contexto; falla si faltan campos requeridos.
    pub fn with_interactor(interactor: I, context: &'c mut Context) -> Result<Self, ContextError> {
        context.bind(&I::shape())?;
        Ok(Self { interactor,
                  context,
                  status: StepStatus::Pending })
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    pub fn context(&self) -> &Context {
        self.context
    }

    /// Punto de entrada recuperador: absorbe `Failure` (el contexto ya lo
    /// refleja) y propaga cualquier otro error sin tocar el contexto.
    pub fn run(mut self) -> Result<StepStatus, InteractorError> {
        match self.execute_strict() {
            Ok(()) => Ok(self.status),
            Err(InteractorError::Failure(failure)) => {
                debug!("{} recovered: {}", I::name(), failure);
                self.context.record(RunEventKind::FailureRecovered { step: I::name().to_string() });
                Ok(self.status)
            }
            Err(other) => Err(other),
        }
    }

    /// Punto de entrada propagador.
    pub fn run_strict(mut self) -> StepResult {
        self.execute_strict()
    }

    fn execute_strict(&mut self) -> StepResult {
        let step = I::name();
        self.transition(StepStatus::Running);
        self.context.record(RunEventKind::StepStarted { step: step.to_string() });
        debug!("step {} started on context {}", step, self.context.id());

        match self.interactor.execute(self.context) {
            Ok(()) => {
                self.transition(StepStatus::Succeeded);
                debug!("step {} succeeded on context {}", step, self.context.id());
                self.context.record(RunEventKind::StepSucceeded { step: step.to_string() });
                Ok(())
            }
            Err(InteractorError::Failure(mut failure)) => {
                failure.set_step_if_absent(step);
                self.context.mark_failed(&failure);
                self.transition(StepStatus::Failed);
                let error = self.context.error().cloned();
                self.context.record(RunEventKind::StepFailed { step: step.to_string(),
                                                               error });
                info!("step {} failed: {}", step, failure);
                Err(InteractorError::Failure(failure))
            }
            Err(other) => {
                self.transition(StepStatus::Errored);
                self.context.record(RunEventKind::StepErrored { step: step.to_string(),
                                                                message: other.to_string() });
                warn!("step {} errored: {}", step, other);
                Err(other)
            }
        }
    }

    fn transition(&mut self, next: StepStatus) {
        debug_assert!(self.status.can_transition_to(next),
                      "invalid step transition {:?} -> {:?}",
                      self.status,
                      next);
        self.status = next;
    }
}
