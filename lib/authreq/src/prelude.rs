//! Prelude module for convenient imports.
//!
//! ```ignore
//! use authreq::prelude::*;
//! ```

pub use crate::{
    AuthClient, ChainedRequest, ClientConfig, Credentials, Error, HttpClient, HyperClient, Method,
    Request, Requestable, Result, UserProfile, decode,
};
