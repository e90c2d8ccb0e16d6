/// Estado de un step dentro de un `Runner`.
///
/// Las transiciones válidas son:
/// - `Pending` -> `Running`
/// - `Running` -> `Succeeded`
/// - `Running` -> `Failed` (fallo de negocio)
/// - `Running` -> `Errored` (error no manejado)
///
/// No hay reintentos: los tres estados finales son terminales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Construido, todavía no ejecutado.
    Pending,
    /// Ejecutando la lógica de negocio.
    Running,
    /// Terminó sin error.
    Succeeded,
    /// Terminó con `Failure`.
    Failed,
    /// Terminó con un error no manejado.
    Errored,
}

impl StepStatus {
    pub fn can_transition_to(self, next: StepStatus) -> bool {
        matches!((self, next),
                 (Self::Pending, Self::Running)
                 | (Self::Running, Self::Succeeded)
                 | (Self::Running, Self::Failed)
                 | (Self::Running, Self::Errored))
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Errored)
    }
}

#[cfg(test)]
mod tests {
    use super::StepStatus::*;

    #[test]
    fn terminal_states_do_not_move() {
        assert!(Pending.can_transition_to(Running));
        assert!(Running.can_transition_to(Failed));
        assert!(!Failed.can_transition_to(Running));
        assert!(!Succeeded.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Succeeded));
        assert!(Errored.is_terminal() && !Running.is_terminal());
    }
}
