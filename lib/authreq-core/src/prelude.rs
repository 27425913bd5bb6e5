//! Prelude module for convenient imports.
//!
//! ```ignore
//! use authreq_core::prelude::*;
//! ```

pub use crate::{
    ChainedRequest, Credentials, Error, HttpClient, Method, Request, Requestable, Result,
    UserProfile, decode,
};
