//! Forma declarada de un record según su `Deserialize`, sin instancia.
//!
//! Un `Deserializer` que no lee datos: registra qué método pidió el
//! `Deserialize` del tipo (para structs derivados, `deserialize_struct` con la
//! lista de nombres de campo ya aplicados `rename`/`skip`) y corta con error.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::forward_to_deserialize_any;

/// Cómo se declara un tipo ante serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerdeShape {
    /// Struct con campos nombrados (nombres serde, en orden).
    Struct(&'static [&'static str]),
    /// `()` o struct unitario.
    Unit,
    /// Cualquier otra forma (mapa, `flatten`, newtype, escalar, enum...).
    Other(&'static str),
}

impl fmt::Display for SerdeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerdeShape::Struct(_) => f.write_str("a struct"),
            SerdeShape::Unit => f.write_str("a unit struct"),
            SerdeShape::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// Forma serde de `T`. `None` si el `Deserialize` de `T` no llega a pedir
/// ningún método (implementación manual que falla antes).
pub fn serde_shape<T: for<'de> Deserialize<'de>>() -> Option<SerdeShape> {
    let mut shape = None;
    let _ = T::deserialize(ShapeDeserializer { shape: &mut shape });
    shape
}

#[derive(Debug)]
struct Captured;

impl fmt::Display for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("shape captured")
    }
}

impl std::error::Error for Captured {}

impl de::Error for Captured {
    fn custom<T: fmt::Display>(_msg: T) -> Self {
        Captured
    }
}

struct ShapeDeserializer<'a> {
    shape: &'a mut Option<SerdeShape>,
}

impl ShapeDeserializer<'_> {
    fn capture<V>(self, shape: SerdeShape) -> Result<V, Captured> {
        *self.shape = Some(shape);
        Err(Captured)
    }
}

impl<'de> Deserializer<'de> for ShapeDeserializer<'_> {
    type Error = Captured;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Other("a self-describing value"))
    }

    fn deserialize_struct<V: Visitor<'de>>(self, _name: &'static str, fields: &'static [&'static str],
                                           _visitor: V)
                                           -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Struct(fields))
    }

    fn deserialize_unit<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Unit)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(self, _name: &'static str, _visitor: V) -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Unit)
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Other("a map"))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(self, _name: &'static str, _visitor: V)
                                                   -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Other("a newtype struct"))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(self, _name: &'static str, _len: usize, _visitor: V)
                                                 -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Other("a tuple struct"))
    }

    fn deserialize_enum<V: Visitor<'de>>(self, _name: &'static str, _variants: &'static [&'static str],
                                         _visitor: V)
                                         -> Result<V::Value, Captured> {
        self.capture(SerdeShape::Other("an enum"))
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option seq tuple identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Plain {
        a: String,
        #[serde(rename = "B")]
        b: u8,
        #[serde(skip)]
        c: u8,
    }

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Flat {
        a: String,
        #[serde(flatten)]
        rest: HashMap<String, String>,
    }

    #[derive(Deserialize)]
    struct Marker;

    #[test]
    fn struct_fields_use_serde_names() {
        assert_eq!(serde_shape::<Plain>(), Some(SerdeShape::Struct(&["a", "B"])));
    }

    #[test]
    fn other_shapes_are_reported() {
        assert_eq!(serde_shape::<Flat>(), Some(SerdeShape::Other("a map")));
        assert_eq!(serde_shape::<Marker>(), Some(SerdeShape::Unit));
        assert_eq!(serde_shape::<u32>(), Some(SerdeShape::Other("a self-describing value")));
    }
}
