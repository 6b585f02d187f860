//! Prelude module for convenient imports.
//!
//! ```ignore
//! use catena::prelude::*;
//! ```

pub use crate::{
    CallOptions, CallOptionsBuilder, Chain, Client, ClientBuilder, ContentType, Error, Execute,
    Executor, HyperExecutor, Intercept, Interceptor, Method, Response, Result, StatusCode, Target,
    from_json, header, to_form, to_json,
};
pub use serde::{Deserialize, Serialize};
