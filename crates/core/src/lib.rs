//! optval-core: the tagged dynamic value model.
//!
//! Provides the closed [`Type`] descriptor, the [`Value`] container, the
//! type-directed [`Converter`] and the alignment engine that copies values
//! into caller-owned locations.
//!
//! # Example
//! ```
//! use optval_core::{align, Value};
//!
//! let form = Value::map_string([
//!     ("author", Value::string("gorpher")),
//!     ("age", Value::string("24")),
//! ])
//! .unwrap();
//!
//! let mut age: i64 = 0;
//! form.aligns([align("age", &mut age)]).unwrap();
//! assert_eq!(age, 24);
//! ```

pub mod align;
pub mod convert;
pub mod error;
pub mod sentinel;
pub mod types;
pub mod value;

pub use align::{align, Align, Record, Target};
pub use convert::Converter;
pub use error::{ErrorKind, ValueError, ValueResult};
pub use types::{PrimitiveKind, Type};
pub use value::{Payload, Value};
