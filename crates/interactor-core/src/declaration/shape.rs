use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use super::{DefaultRule, FieldKind, FieldSpec};
use crate::config::RuntimeConfig;
use crate::constants::RESERVED_FIELDS;
use crate::context::Context;
use crate::errors::ContextError;

/// Forma de contexto de un tipo de step: campos declarados, en orden de
/// declaración y sin duplicados.
///
/// Reglas de fusión al redeclarar un nombre ya presente en el mismo tipo
/// (`declare`):
/// - el tipo resultante es el más exigente (`Held < Optional < Required`), así
///   que un `receive` posterior vuelve requerido un opcional incluido;
/// - un campo requerido no tiene default e ignora defaults posteriores;
/// - en opcionales/held, una regla no vacía reemplaza a la anterior.
///
/// Entre miembros de un organizer (`merge`) un requerido de un miembro
/// posterior sólo abre el campo a la entrada (`Optional`): puede venir del
/// llamador o de un miembro anterior, y se valida al ejecutar ese miembro.
#[derive(Debug, Clone, Default)]
pub struct ContextShape {
    name: String,
    fields: IndexMap<String, FieldSpec>,
}

impl ContextShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               fields: IndexMap::new() }
    }

    /// Nombre del tipo de step dueño de la forma.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn required_names(&self) -> Vec<&str> {
        self.names_of(FieldKind::Required)
    }

    pub fn optional_names(&self) -> Vec<&str> {
        self.names_of(FieldKind::Optional)
    }

    pub fn held_names(&self) -> Vec<&str> {
        self.names_of(FieldKind::Held)
    }

    fn names_of(&self, kind: FieldKind) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| f.kind == kind)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Registra (o fusiona) un campo. Devuelve `true` si el nombre era nuevo.
    pub fn declare(&mut self, spec: FieldSpec) -> bool {
        self.insert_or_merge(spec, |existing, incoming| existing.widen(incoming))
    }

    /// Fusiona los campos de la forma de otro step (miembro de un organizer).
    pub fn merge(&mut self, other: &ContextShape) {
        for spec in other.fields() {
            self.insert_or_merge(spec.clone(), |existing, incoming| {
                    existing.widen(incoming.narrow(FieldKind::Optional))
                });
        }
    }

    fn insert_or_merge(&mut self, spec: FieldSpec, kind_rule: impl Fn(FieldKind, FieldKind) -> FieldKind) -> bool {
        if RESERVED_FIELDS.contains(&spec.name.as_str()) {
            warn!("field `{}` is reserved by the context and was not declared on `{}`", spec.name, self.name);
            return false;
        }
        match self.fields.get_mut(&spec.name) {
            Some(existing) => {
                existing.kind = kind_rule(existing.kind, spec.kind);
                if existing.kind == FieldKind::Required {
                    existing.default = DefaultRule::Absent;
                } else if !spec.default.is_absent() {
                    existing.default = spec.default;
                }
                false
            }
            None => {
                self.fields.insert(spec.name.clone(), spec);
                true
            }
        }
    }

    /// Construye un contexto validando los campos requeridos.
    ///
    /// Acepta `null` (mapa vacío) o un objeto JSON; las claves no declaradas
    /// se ignoran.
    pub fn build(&self, input: impl Into<Value>) -> Result<Context, ContextError> {
        Context::build(self.clone(), input, *crate::config::CONFIG)
    }

    /// Igual que `build` pero con una configuración explícita.
    pub fn build_with_config(&self, input: impl Into<Value>, config: RuntimeConfig) -> Result<Context, ContextError> {
        Context::build(self.clone(), input, config)
    }
}
