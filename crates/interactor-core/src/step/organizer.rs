//! Organizers: steps que encadenan otros steps sobre un único contexto.
//!
//! Un organizer guarda tipos de step (no instancias). Su lógica pasa el mismo
//! `Context` por el punto de entrada propagador de cada miembro, en orden; el
//! primer `Failure` corta la cadena y pasa a ser el fallo del organizer. Los
//! efectos de los miembros ya ejecutados permanecen.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use log::debug;

use super::Interactor;
use crate::context::Context;
use crate::declaration::{ContextShape, FieldRegistry};
use crate::errors::StepResult;

/// Referencia a un tipo de step, usable como miembro de un organizer.
#[derive(Clone, Copy)]
pub struct StepType {
    name: &'static str,
    type_id: TypeId,
    shape: fn() -> Arc<ContextShape>,
    call_in: fn(&mut Context) -> StepResult,
}

impl StepType {
    pub fn of<I: Interactor>() -> Self {
        Self { name: I::name(),
               type_id: TypeId::of::<I>(),
               shape: <I as Interactor>::shape,
               call_in: I::call_in }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is<I: Interactor>(&self) -> bool {
        self.type_id == TypeId::of::<I>()
    }

    /// Forma de contexto del step.
    pub fn shape(&self) -> Arc<ContextShape> {
        (self.shape)()
    }

    /// Ejecuta el step sobre `context` por el punto de entrada propagador.
    pub fn call_in(&self, context: &mut Context) -> StepResult {
        (self.call_in)(context)
    }
}

impl fmt::Debug for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StepType").field(&self.name).finish()
    }
}

impl PartialEq for StepType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for StepType {}

/// Lista ordenada de miembros de un organizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organized {
    members: Vec<StepType>,
}

impl Organized {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reemplaza la lista de miembros. Acepta steps sueltos o listas, que se
    /// aplanan en orden.
    pub fn organize<I, S>(&mut self, members: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<Organized>
    {
        self.members = members.into_iter().flat_map(|m| m.into().members).collect();
        self
    }

    pub fn members(&self) -> &[StepType] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.members.iter().map(StepType::name).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepType> {
        self.members.iter()
    }
}

impl From<StepType> for Organized {
    fn from(member: StepType) -> Self {
        Self { members: vec![member] }
    }
}

impl From<Vec<StepType>> for Organized {
    fn from(members: Vec<StepType>) -> Self {
        Self { members }
    }
}

impl<const N: usize> From<[StepType; N]> for Organized {
    fn from(members: [StepType; N]) -> Self {
        Self { members: members.into() }
    }
}

impl FromIterator<StepType> for Organized {
    fn from_iter<T: IntoIterator<Item = StepType>>(iter: T) -> Self {
        Self { members: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Organized {
    type Item = &'a StepType;
    type IntoIter = std::slice::Iter<'a, StepType>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Un step compuesto por otros steps.
///
/// Normalmente se declara con `organizer!`, que además genera `Declare`
/// (propias + miembros) y `Interactor::execute` (via `run_members`).
pub trait Organizer: Interactor {
    /// Miembros del organizer, vacío por defecto.
    fn organized() -> Organized {
        Organized::new()
    }
}

/// Fusiona la forma de cada miembro sobre `fields`, en orden.
///
/// Un campo que un miembro posterior recibe pero que ya existía (held de un
/// miembro anterior, por ejemplo) queda abierto a la entrada sin volverse
/// obligatorio para el llamador; `Context::bind` lo exige al ejecutar ese
/// miembro.
pub fn declare_members(members: &Organized, fields: &mut FieldRegistry) {
    for member in members {
        fields.merge(&member.shape());
    }
}

/// Ejecuta los miembros en orden sobre `context`; corta en el primer error.
pub fn run_members(members: &Organized, context: &mut Context) -> StepResult {
    debug!("running {} member(s) on context {}", members.len(), context.id());
    members.iter().try_for_each(|member| member.call_in(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Declare;

    #[derive(Default)]
    struct A;
    impl Declare for A {}
    impl Interactor for A {}

    #[derive(Default)]
    struct B;
    impl Declare for B {}
    impl Interactor for B {}

    #[test]
    fn organize_flattens_and_replaces() {
        let mut organized = Organized::new();
        organized.organize([StepType::of::<A>()]);
        organized.organize([Organized::from(StepType::of::<B>()),
                            Organized::from(vec![StepType::of::<A>(), StepType::of::<B>()])]);
        assert_eq!(organized.names(), vec!["B", "A", "B"]);
        assert!(organized.members()[1].is::<A>());
    }

    #[test]
    fn default_organized_is_empty() {
        #[derive(Default)]
        struct Empty;
        impl Declare for Empty {}
        impl Interactor for Empty {}
        impl Organizer for Empty {}

        assert!(Empty::organized().is_empty());
    }
}
