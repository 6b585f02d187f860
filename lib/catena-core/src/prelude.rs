//! Prelude module for convenient imports.
//!
//! ```ignore
//! use catena_core::prelude::*;
//! ```

pub use crate::{
    CallOptions, CallOptionsBuilder, ContentType, Error, Method, Response, Result, Target,
    from_json, to_form, to_json,
};
