//! Records (schemas) con campos clasificados y la partición carry/artifact.

pub mod carry;
pub mod field;
pub mod introspect;
pub mod macros;
pub mod schema;

pub use carry::Carry;
pub use field::{FieldClass, FieldDescriptor};
pub use schema::{Record, SchemaRef};
