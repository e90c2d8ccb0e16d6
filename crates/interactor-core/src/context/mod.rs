//! Contexto de ejecución compartido por los steps de un run.
//!
//! Un `Context` guarda, para cada campo declarado por su `ContextShape`, un
//! `FieldSlot` que distingue "sin resolver", "default materializado" y
//! "asignado". Los defaults se evalúan en la primera lectura y se memoizan en
//! la instancia; nunca se comparten entre contextos.
//!
//! El flag de éxito sólo transiciona `true -> false` (via `fail`,
//! `fail_with_cause` o al recibir el `Runner` un `Failure`).

mod slot;

use std::error::Error as StdError;

use indexmap::IndexMap;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

pub use slot::FieldSlot;

use crate::config::{RuntimeConfig, CONFIG};
use crate::declaration::{ContextShape, DefaultRule, FieldKind, FieldSpec};
use crate::errors::{ContextError, StepResult};
use crate::event::{Journal, RunEvent, RunEventKind};
use crate::failure::{Cause, Failure};

/// Mapa plano de atributos (entrada de `build`, salida de `to_h`).
pub type Attributes = Map<String, Value>;

#[derive(Debug)]
pub struct Context {
    id: Uuid,
    shape: ContextShape,
    slots: IndexMap<String, FieldSlot>,
    success: bool,
    error: Option<Value>,
    error_cause: Vec<Cause>,
    config: RuntimeConfig,
    journal: Journal,
    // campos cuyo default calculado se está evaluando (detección de ciclos)
    resolving: Vec<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Contexto vacío, sin campos declarados.
    pub fn new() -> Self {
        Self::with_shape(ContextShape::new("Context"), *CONFIG)
    }

    fn with_shape(shape: ContextShape, config: RuntimeConfig) -> Self {
        let id = Uuid::new_v4();
        let slots = shape.names().map(|n| (n.to_string(), FieldSlot::Unset)).collect();
        Self { id,
               shape,
               slots,
               success: true,
               error: None,
               error_cause: Vec::new(),
               config,
               journal: Journal::new(id, config.journal),
               resolving: Vec::new() }
    }

    /// Construye un contexto de la forma `shape` a partir de `input`.
    ///
    /// - `null` equivale a un mapa vacío; cualquier otro valor que no sea un
    ///   objeto es `InvalidInput`.
    /// - Todos los campos requeridos ausentes se reportan juntos, en orden de
    ///   declaración.
    /// - Claves no declaradas y nombres held se ignoran. El input no se muta.
    pub fn build(shape: ContextShape, input: impl Into<Value>, config: RuntimeConfig) -> Result<Self, ContextError> {
        let input = match input.into() {
            Value::Null => Attributes::new(),
            Value::Object(map) => map,
            other => return Err(ContextError::InvalidInput(value_kind(&other).to_string())),
        };
        let missing: Vec<String> = shape.fields()
                                        .filter(|f| f.kind == FieldKind::Required && !input.contains_key(&f.name))
                                        .map(|f| f.name.clone())
                                        .collect();
        if !missing.is_empty() {
            return Err(ContextError::MissingFields { fields: missing });
        }
        let mut ctx = Self::with_shape(shape, config);
        for spec in ctx.shape.fields().filter(|f| f.accepts_input()) {
            if let Some(value) = input.get(&spec.name) {
                ctx.slots.insert(spec.name.clone(), FieldSlot::Set(value.clone()));
            }
        }
        Ok(ctx)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn shape(&self) -> &ContextShape {
        &self.shape
    }

    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn failure(&self) -> bool {
        !self.success
    }

    pub fn error(&self) -> Option<&Value> {
        self.error.as_ref()
    }

    /// Cadena de causas capturada por `fail_with_cause` (más externa primero).
    pub fn error_cause(&self) -> &[Cause] {
        &self.error_cause
    }

    /// `true` si el campo está declarado en la forma de este contexto.
    pub fn contains(&self, name: &str) -> bool {
        self.shape.contains(name)
    }

    pub fn slot(&self, name: &str) -> Option<&FieldSlot> {
        self.slots.get(name)
    }

    /// `true` si leer el campo produce un valor sin depender de un `null`
    /// implícito: ya materializado o con regla de default.
    pub fn is_present(&self, name: &str) -> bool {
        if self.slots.get(name).is_some_and(FieldSlot::is_materialized) {
            return true;
        }
        self.shape.field(name).is_some_and(|f| !f.default.is_absent())
    }

    /// Lee un campo: valor explícito, o default evaluado y memoizado.
    ///
    /// Un campo sin regla de default devuelve `null` sin memoizar.
    pub fn get(&mut self, name: &str) -> Result<Value, ContextError> {
        if let Some(value) = self.slots.get(name).and_then(FieldSlot::value) {
            return Ok(value.clone());
        }
        let rule = match self.shape.field(name) {
            Some(spec) => spec.default.clone(),
            None => return Err(ContextError::UnknownField(name.to_string())),
        };
        match rule {
            DefaultRule::Absent => Ok(Value::Null),
            DefaultRule::Value(value) => {
                self.slots.insert(name.to_string(), FieldSlot::Defaulted(value.clone()));
                Ok(value)
            }
            DefaultRule::Computed(rule) => {
                if self.resolving.iter().any(|n| n == name) {
                    return Err(ContextError::DefaultCycle(name.to_string()));
                }
                self.resolving.push(name.to_string());
                let result = rule(self);
                self.resolving.pop();
                let value = result?;
                // la regla pudo asignar el campo explícitamente
                if let Some(FieldSlot::Set(set)) = self.slots.get(name) {
                    return Ok(set.clone());
                }
                self.slots.insert(name.to_string(), FieldSlot::Defaulted(value.clone()));
                Ok(value)
            }
        }
    }

    /// Lee un campo y lo decodifica a `T`.
    pub fn get_as<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, ContextError> {
        let value = self.get(name)?;
        serde_json::from_value(value).map_err(|e| ContextError::Decode { field: name.to_string(),
                                                                        message: e.to_string() })
    }

    /// Referencia mutable al valor del campo, materializándolo si hace falta.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Value, ContextError> {
        let value = self.get(name)?;
        let slot = self.slots.entry(name.to_string()).or_default();
        if !slot.is_materialized() {
            *slot = FieldSlot::Set(value);
        }
        slot.value_mut()
            .ok_or_else(|| ContextError::UnknownField(name.to_string()))
    }

    /// Asigna un campo declarado (tiene prioridad sobre cualquier default).
    pub fn set<T: Serialize>(&mut self, name: &str, value: T) -> Result<(), ContextError> {
        let value = serde_json::to_value(value).map_err(|e| ContextError::Encode { field: name.to_string(),
                                                                                   message: e.to_string() })?;
        self.set_value(name, value)
    }

    pub fn set_value(&mut self, name: &str, value: Value) -> Result<(), ContextError> {
        if !self.shape.contains(name) {
            return Err(ContextError::UnknownField(name.to_string()));
        }
        self.slots.insert(name.to_string(), FieldSlot::Set(value));
        Ok(())
    }

    /// Marca el contexto como fallido y devuelve siempre `Err(Failure)`.
    ///
    /// `attributes`:
    /// - `null`: sin atributos;
    /// - objeto: se escribe cada clave sin validar contra la forma (la clave
    ///   `error` fija el error del contexto);
    /// - cualquier otro valor se toma como `error`.
    ///
    /// Llamarlo de nuevo sobre un contexto ya fallido vuelve a producir el
    /// `Failure`; el flag no cambia.
    pub fn fail<T>(&mut self, attributes: impl Into<Value>) -> StepResult<T> {
        self.merge_failure_attributes(attributes.into());
        self.success = false;
        debug!("context {} failed", self.id);
        Err(Failure::new(self).into())
    }

    /// Igual que `fail` pero captura `cause` y su cadena de `source()` como
    /// `error_cause`. Si no se indicó `error`, se usa el mensaje de `cause`.
    pub fn fail_with_cause<T, E>(&mut self, cause: &E, attributes: impl Into<Value>) -> StepResult<T>
        where E: StdError + 'static
    {
        self.error_cause = Cause::chain(cause);
        self.merge_failure_attributes(attributes.into());
        if self.error.is_none() {
            self.error = Some(Value::String(cause.to_string()));
        }
        self.success = false;
        debug!("context {} failed with {} cause(s)", self.id, self.error_cause.len());
        Err(Failure::new(self).into())
    }

    fn merge_failure_attributes(&mut self, attributes: Value) {
        match attributes {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    match key.as_str() {
                        "error" => self.error = Some(value),
                        "success" | "error_cause" => {}
                        _ => self.write_adhoc(key, value),
                    }
                }
            }
            other => self.error = Some(other),
        }
    }

    // Escritura sin validación: una clave desconocida pasa a ser held.
    fn write_adhoc(&mut self, name: String, value: Value) {
        if !self.shape.contains(&name) {
            self.shape.declare(FieldSpec::held(name.clone(), DefaultRule::Absent));
        }
        self.slots.insert(name, FieldSlot::Set(value));
    }

    /// Refleja en el contexto un `Failure` recibido (idempotente).
    pub(crate) fn mark_failed(&mut self, failure: &Failure) {
        self.success = false;
        if self.error.is_none() {
            self.error = failure.error().cloned();
        }
        if self.error_cause.is_empty() {
            self.error_cause = failure.causes().to_vec();
        }
    }

    /// Prepara el contexto para ejecutar un step de forma `shape`.
    ///
    /// Los requeridos de `shape` deben estar presentes; luego sus campos se
    /// fusionan en la forma del contexto.
    pub(crate) fn bind(&mut self, shape: &ContextShape) -> Result<(), ContextError> {
        let missing: Vec<String> = shape.fields()
                                        .filter(|f| f.kind == FieldKind::Required && !self.is_present(&f.name))
                                        .map(|f| f.name.clone())
                                        .collect();
        if !missing.is_empty() {
            return Err(ContextError::MissingFields { fields: missing });
        }
        self.shape.merge(shape);
        for name in shape.names() {
            if !self.slots.contains_key(name) && self.shape.contains(name) {
                self.slots.insert(name.to_string(), FieldSlot::Unset);
            }
        }
        Ok(())
    }

    /// Mapa plano con todos los campos declarados (resolviendo defaults) más
    /// `success`, `error` y `error_cause`.
    pub fn to_h(&mut self) -> Result<Attributes, ContextError> {
        let names: Vec<String> = self.shape.names().map(str::to_string).collect();
        let mut out = Attributes::new();
        for name in names {
            let value = self.get(&name)?;
            out.insert(name, value);
        }
        out.insert("success".into(), Value::Bool(self.success));
        out.insert("error".into(), self.error.clone().unwrap_or(Value::Null));
        out.insert("error_cause".into(),
                   Value::Array(self.error_cause.iter().map(Cause::to_value).collect()));
        Ok(out)
    }

    /// Valores ya materializados, sin evaluar defaults pendientes.
    pub fn snapshot(&self) -> Attributes {
        self.slots
            .iter()
            .filter_map(|(name, slot)| slot.value().map(|v| (name.clone(), v.clone())))
            .collect()
    }

    pub fn events(&self) -> &[RunEvent] {
        self.journal.list()
    }

    pub fn event_variants(&self) -> Vec<&'static str> {
        self.journal.variants()
    }

    pub(crate) fn record(&mut self, kind: RunEventKind) {
        self.journal.append_kind(kind);
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape() -> ContextShape {
        let mut shape = ContextShape::new("Test");
        shape.declare(FieldSpec::required("foo"));
        shape.declare(FieldSpec::optional("bar", DefaultRule::value("baz")));
        shape.declare(FieldSpec::optional("echo",
                                          DefaultRule::computed(|ctx: &mut Context| ctx.get("foo"))));
        shape.declare(FieldSpec::held("items", DefaultRule::value(json!([]))));
        shape
    }

    fn build(input: Value) -> Result<Context, ContextError> {
        Context::build(shape(), input, RuntimeConfig::default())
    }

    #[test]
    fn build_rejects_non_object_input() {
        let err = build(json!("nope")).unwrap_err();
        assert_eq!(err, ContextError::InvalidInput("a string".into()));
    }

    #[test]
    fn defaults_are_memoized_but_overridable() {
        let mut ctx = build(json!({"foo": 1})).unwrap();
        assert_eq!(ctx.slot("bar"), Some(&FieldSlot::Unset));
        assert_eq!(ctx.get("bar").unwrap(), json!("baz"));
        assert_eq!(ctx.slot("bar"), Some(&FieldSlot::Defaulted(json!("baz"))));
        ctx.set("bar", "qux").unwrap();
        assert_eq!(ctx.get("bar").unwrap(), json!("qux"));
    }

    #[test]
    fn held_names_in_input_are_ignored() {
        let mut ctx = build(json!({"foo": 1, "items": [9], "extra": true})).unwrap();
        assert_eq!(ctx.get("items").unwrap(), json!([]));
        assert!(!ctx.contains("extra"));
        assert!(matches!(ctx.get("extra"), Err(ContextError::UnknownField(_))));
    }

    #[test]
    fn get_mut_materializes_default_in_place() {
        let mut ctx = build(json!({"foo": 1})).unwrap();
        if let Value::Array(items) = ctx.get_mut("items").unwrap() {
            items.push(json!("a"));
        }
        assert_eq!(ctx.get("items").unwrap(), json!(["a"]));
    }

    #[test]
    fn computed_default_cycle_is_detected() {
        let mut shape = ContextShape::new("Cycle");
        shape.declare(FieldSpec::optional("a", DefaultRule::computed(|ctx: &mut Context| ctx.get("b"))));
        shape.declare(FieldSpec::optional("b", DefaultRule::computed(|ctx: &mut Context| ctx.get("a"))));
        let mut ctx = Context::build(shape, Value::Null, RuntimeConfig::default()).unwrap();
        assert_eq!(ctx.get("a"), Err(ContextError::DefaultCycle("a".into())));
        // el fallo no deja estado parcial
        assert_eq!(ctx.slot("b"), Some(&FieldSlot::Unset));
    }

    #[test]
    fn fail_merges_attributes_and_declares_unknown_keys() {
        let mut ctx = build(json!({"foo": 1})).unwrap();
        let result: StepResult = ctx.fail(json!({"error": "bad", "reason": "stock"}));
        assert!(result.unwrap_err().is_failure());
        assert!(ctx.failure());
        assert_eq!(ctx.error(), Some(&json!("bad")));
        assert_eq!(ctx.get("reason").unwrap(), json!("stock"));
        assert_eq!(ctx.shape().held_names(), vec!["items", "reason"]);
    }

    #[test]
    fn to_h_flattens_fields_and_metadata() {
        let mut ctx = build(json!({"foo": "x"})).unwrap();
        let map = ctx.to_h().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["foo", "bar", "echo", "items", "success", "error", "error_cause"]);
        assert_eq!(map["echo"], json!("x"));
        assert_eq!(map["success"], json!(true));
        assert_eq!(map["error"], Value::Null);
    }

    #[test]
    fn snapshot_skips_unresolved_defaults() {
        let a = build(json!({"foo": 1})).unwrap();
        let mut b = build(json!({"foo": 1})).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
        b.get("bar").unwrap();
        assert_ne!(a.snapshot(), b.snapshot());
        assert_eq!(a.snapshot().len(), 1);
    }

    #[test]
    fn bind_requires_member_fields() {
        let mut ctx = Context::build(ContextShape::new("Outer"), Value::Null, RuntimeConfig::default()).unwrap();
        let err = ctx.bind(&shape()).unwrap_err();
        assert_eq!(err, ContextError::MissingFields { fields: vec!["foo".into()] });
        assert!(ctx.shape().is_empty());
    }
}
