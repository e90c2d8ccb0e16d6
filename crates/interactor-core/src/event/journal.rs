use chrono::Utc;
use uuid::Uuid;

use super::{RunEvent, RunEventKind};

/// Almacenamiento append-only de eventos de un contexto.
///
/// Deshabilitado (`INTERACTOR_JOURNAL=false`) descarta todo lo que recibe.
#[derive(Debug, Clone)]
pub struct Journal {
    run_id: Uuid,
    enabled: bool,
    events: Vec<RunEvent>,
}

impl Journal {
    pub fn new(run_id: Uuid, enabled: bool) -> Self {
        Self { run_id,
               enabled,
               events: Vec::new() }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Agrega un evento a partir de su kind y devuelve el evento completo (con
    /// seq y ts), o `None` si el journal está deshabilitado.
    pub fn append_kind(&mut self, kind: RunEventKind) -> Option<&RunEvent> {
        if !self.enabled {
            return None;
        }
        let seq = self.events.len() as u64;
        self.events.push(RunEvent { seq,
                                    run_id: self.run_id,
                                    kind,
                                    ts: Utc::now() });
        self.events.last()
    }

    /// Eventos en orden ascendente por seq.
    pub fn list(&self) -> &[RunEvent] {
        &self.events
    }

    pub fn variants(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.kind.code()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
