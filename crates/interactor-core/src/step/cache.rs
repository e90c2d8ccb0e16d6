//! Caché de formas de contexto por tipo de step.
//!
//! La forma de un tipo se ensambla una sola vez (primer uso) a partir de sus
//! declaraciones y queda inmutable; el mapa es concurrente para permitir runs
//! en paralelo sobre contextos distintos.

use std::any::TypeId;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

use super::definition::short_type_name;
use crate::declaration::{ContextShape, Declare, FieldRegistry};

static SHAPES: Lazy<DashMap<TypeId, Arc<ContextShape>>> = Lazy::new(DashMap::new);

/// Forma de contexto del tipo `D`.
pub fn shape_of<D: Declare + 'static>() -> Arc<ContextShape> {
    let id = TypeId::of::<D>();
    if let Some(shape) = SHAPES.get(&id) {
        return Arc::clone(shape.value());
    }
    // Se ensambla sin tener tomado el shard: una declaración puede pedir la
    // forma de otro tipo.
    let mut registry = FieldRegistry::new(short_type_name::<D>());
    registry.include::<D>();
    let shape = Arc::new(registry.into_shape());
    let entry = SHAPES.entry(id).or_insert(shape);
    Arc::clone(entry.value())
}
