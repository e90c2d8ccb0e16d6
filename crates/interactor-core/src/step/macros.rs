//! Macros utilitarios para reducir boilerplate al declarar interactors y
//! organizers.
//!
//! Exportados en la raíz del crate para poder usarlos como:
//!   use interactor_core::{interactor, organizer, organize};
//!
//! Secciones soportadas dentro del cuerpo (todas opcionales, en este orden):
//! - `includes [Tipo, ...]`: aplica otros conjuntos de declaraciones.
//! - `receive { campo, ... }`: campos requeridos.
//! - `optional { campo: default, ... }`: opcionales con default constante
//!   (cualquier token aceptado por `json!`, p.ej. `"EUR"`, `0`, `null`, `[]`).
//! - `computed { campo: |ctx| ..., ... }`: opcionales con default calculado.
//! - `hold { campo, campo: default, ... }`: campos locales del step.

/// Declara un step (struct unitario) junto con sus campos y su lógica.
///
/// ```ignore
/// interactor! {
///     pub struct PriceOrder {
///         receive { items }
///         optional { discount_pct: 0 }
///         hold { total }
///     }
///     execute(ctx) {
///         let total = compute_total(&ctx.get("items")?);
///         ctx.set("total", total)?;
///         Ok(())
///     }
/// }
/// ```
#[macro_export]
macro_rules! interactor {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(includes [ $($module:ty),* $(,)? ])?
            $(receive { $($required:ident),* $(,)? })?
            $(optional { $($optional:ident : $opt_default:tt),* $(,)? })?
            $(computed { $($computed:ident : $rule:expr),* $(,)? })?
            $(hold { $($held:ident $(: $held_default:tt)?),* $(,)? })?
        }
        execute($ctx:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        $vis struct $name;

        impl $crate::declaration::Declare for $name {
            #[allow(unused_variables)]
            fn declare(fields: &mut $crate::declaration::FieldRegistry) {
                $($( fields.include::<$module>(); )*)?
                $($( fields.receive([stringify!($required)]); )*)?
                $($( fields.receive_optional(stringify!($optional),
                                             $crate::declaration::DefaultRule::value($crate::__serde_json::json!($opt_default))); )*)?
                $($( fields.receive_optional(stringify!($computed), $crate::declaration::DefaultRule::computed($rule)); )*)?
                $($( fields.hold_with(stringify!($held), $crate::__hold_default!($($held_default)?)); )*)?
            }
        }

        impl $crate::step::Interactor for $name {
            fn execute(&mut self, $ctx: &mut $crate::context::Context) -> $crate::errors::StepResult $body
        }
    };
}

/// Declara un organizer: un step cuya lógica ejecuta los miembros en orden
/// sobre el mismo contexto. La forma de contexto del organizer incluye sus
/// propias declaraciones seguidas de las de cada miembro.
#[macro_export]
macro_rules! organizer {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(includes [ $($module:ty),* $(,)? ])?
            $(receive { $($required:ident),* $(,)? })?
            $(optional { $($optional:ident : $opt_default:tt),* $(,)? })?
            $(computed { $($computed:ident : $rule:expr),* $(,)? })?
            $(hold { $($held:ident $(: $held_default:tt)?),* $(,)? })?
            organize [ $($member:ty),* $(,)? ]
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, Copy)]
        $vis struct $name;

        impl $crate::declaration::Declare for $name {
            fn declare(fields: &mut $crate::declaration::FieldRegistry) {
                $($( fields.include::<$module>(); )*)?
                $($( fields.receive([stringify!($required)]); )*)?
                $($( fields.receive_optional(stringify!($optional),
                                             $crate::declaration::DefaultRule::value($crate::__serde_json::json!($opt_default))); )*)?
                $($( fields.receive_optional(stringify!($computed), $crate::declaration::DefaultRule::computed($rule)); )*)?
                $($( fields.hold_with(stringify!($held), $crate::__hold_default!($($held_default)?)); )*)?
                $crate::step::organizer::declare_members(&<$name as $crate::step::Organizer>::organized(), fields);
            }
        }

        impl $crate::step::Interactor for $name {
            fn execute(&mut self, ctx: &mut $crate::context::Context) -> $crate::errors::StepResult {
                $crate::step::organizer::run_members(&<$name as $crate::step::Organizer>::organized(), ctx)
            }
        }

        impl $crate::step::Organizer for $name {
            fn organized() -> $crate::step::Organized {
                $crate::organize![$($member),*]
            }
        }
    };
}

/// Construye un `Organized` a partir de una lista de tipos de step.
///
/// `organize![A, B, C]` equivale a
/// `Organized::from([StepType::of::<A>(), StepType::of::<B>(), StepType::of::<C>()])`.
#[macro_export]
macro_rules! organize {
    () => {
        $crate::step::Organized::new()
    };
    ($($member:ty),+ $(,)?) => {
        $crate::step::Organized::from(vec![$($crate::step::StepType::of::<$member>()),+])
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __hold_default {
    () => {
        $crate::declaration::DefaultRule::Absent
    };
    ($default:tt) => {
        $crate::declaration::DefaultRule::value($crate::__serde_json::json!($default))
    };
}
