//! optval-interchange: values in from the outside world, errors back out.
//!
//! [`form_value`] and [`json_value`] build map values from request input.
//! [`BadRequest`] is the JSON body returned when any stage of a pipeline
//! fails.

pub mod form;
pub mod json;
pub mod response;

pub use form::form_value;
pub use json::json_value;
pub use response::{bad_request, BadRequest};
