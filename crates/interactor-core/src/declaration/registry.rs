use std::any::TypeId;

use super::{ContextShape, DefaultRule, FieldSpec};

/// Conjunto de declaraciones de campos.
///
/// Lo implementan los tipos de step y también "módulos" de declaraciones
/// compartidas que varios steps incluyen con `FieldRegistry::include`.
pub trait Declare {
    fn declare(_fields: &mut FieldRegistry) {}
}

/// Registro acumulativo de campos de un tipo de step.
///
/// Cada llamada extiende lo ya registrado; nunca descarta declaraciones
/// previas. Al terminar se convierte en la `ContextShape` del tipo.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    shape: ContextShape,
    included: Vec<TypeId>,
}

impl FieldRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { shape: ContextShape::new(name),
               included: Vec::new() }
    }

    /// Registra campos requeridos (los ya registrados se omiten).
    pub fn receive<I, S>(&mut self, names: I) -> &mut Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        for name in names {
            self.shape.declare(FieldSpec::required(name));
        }
        self
    }

    /// Registra (o actualiza) un campo opcional con su regla de default.
    pub fn receive_optional(&mut self, name: impl Into<String>, default: DefaultRule) -> &mut Self {
        self.shape.declare(FieldSpec::optional(name, default));
        self
    }

    /// Registra un campo held sin default.
    pub fn hold(&mut self, name: impl Into<String>) -> &mut Self {
        self.hold_with(name, DefaultRule::Absent)
    }

    /// Registra un campo held con regla de default.
    pub fn hold_with(&mut self, name: impl Into<String>, default: DefaultRule) -> &mut Self {
        self.shape.declare(FieldSpec::held(name, default));
        self
    }

    /// Aplica las declaraciones de `D`. Cada conjunto se aplica una sola vez
    /// por registro, lo que también corta inclusiones cíclicas.
    pub fn include<D: Declare + 'static>(&mut self) -> &mut Self {
        let id = TypeId::of::<D>();
        if !self.included.contains(&id) {
            self.included.push(id);
            D::declare(self);
        }
        self
    }

    /// Fusiona la forma ya ensamblada de otro step (ver `ContextShape::merge`).
    pub fn merge(&mut self, shape: &ContextShape) -> &mut Self {
        self.shape.merge(shape);
        self
    }

    pub fn required_names(&self) -> Vec<&str> {
        self.shape.required_names()
    }

    pub fn optional_names(&self) -> Vec<&str> {
        self.shape.optional_names()
    }

    pub fn held_names(&self) -> Vec<&str> {
        self.shape.held_names()
    }

    pub fn shape(&self) -> &ContextShape {
        &self.shape
    }

    pub fn into_shape(self) -> ContextShape {
        self.shape
    }
}
