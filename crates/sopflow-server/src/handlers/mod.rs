//! HTTP request handlers.

pub(crate) mod webhook;
