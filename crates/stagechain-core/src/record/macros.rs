//! Macro para declarar records con campos clasificados sin boilerplate.
//!
//! Exportada en la raíz del crate:
//!   use stagechain_core::record;

/// Declara un struct record (serde + `Record`).
///
/// Cada campo debe terminar en `=> Carried` o `=> Residual`:
///
/// ```
/// use stagechain_core::{record, FieldClass, Record};
///
/// record! {
///     pub struct InputTest {
///         pub a: String => Carried,
///         pub b: String => Residual,
///     }
/// }
///
/// assert_eq!(InputTest::FIELDS[1].class, FieldClass::Residual);
/// ```
///
/// Omitir la clasificación no compila:
///
/// ```compile_fail
/// use stagechain_core::record;
///
/// record! {
///     pub struct Missing {
///         pub a: String => Carried,
///         pub b: String,
///     }
/// }
/// ```
///
/// Tampoco una clasificación desconocida:
///
/// ```compile_fail
/// use stagechain_core::record;
///
/// record! {
///     pub struct Unknown {
///         pub a: String => Maybe,
///     }
/// }
/// ```
///
/// Los atributos de campo (`#[serde(..)]`) se copian al struct. Si cambian los
/// nombres serde (`rename`, `skip`, `flatten`) el record deja de coincidir con
/// sus campos clasificados y `Record::validate_schema` lo rechaza antes de
/// cualquier run.
///
/// Forma alternativa para fijar el nombre declarado del schema:
/// `record! { #[schema = "Custom"] pub struct Name { .. } }`.
#[macro_export]
macro_rules! record {
    // Nombre de schema explícito
    (
        #[schema = $schema:expr]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $fname:ident : $fty:ty => $class:ident ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $fname : $fty, )*
        }

        impl $crate::record::Record for $name {
            const NAME: &'static str = $schema;
            const FIELDS: &'static [$crate::record::FieldDescriptor] = &[
                $( $crate::record::FieldDescriptor::classify(
                    stringify!($fname),
                    stringify!($fty),
                    $crate::record::FieldClass::$class,
                ), )*
            ];
        }
    };

    // Nombre de schema = nombre del struct
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $fname:ident : $fty:ty => $class:ident ),* $(,)?
        }
    ) => {
        $crate::record! {
            #[schema = stringify!($name)]
            $(#[$meta])*
            $vis struct $name {
                $( $(#[$fmeta])* $fvis $fname : $fty => $class ),*
            }
        }
    };
}
