//! Client-side bindings for [Google Cloud Logging](https://cloud.google.com/logging).
//!
//! # Usage
//!
//! This crate provides typed wrappers for the [Logging v2 API](https://cloud.google.com/logging/docs/reference/v2/rest)
//! and a client surface that assembles [`WriteLogEntries`](https://cloud.google.com/logging/docs/reference/v2/rpc/google.logging.v2#google.logging.v2.LoggingServiceV2.WriteLogEntries)
//! requests without shipping them: transportation and authentication stay
//! with the caller.
//!
//! Start by configuring the client with the builder ([`Builder`](client::Builder::new)):
//!
//! 1. [`build()`](client::Builder::build) returns the [`Logging`](client::Logging)
//!    client together with a channel receiver. Every [`Log::write`](client::Log::write)
//!    sends one write request to that channel for you to transport, for
//!    example through an agent that reads the process' output or your own
//!    HTTP client.
//! 2. Request/response calls (sinks, metrics, exclusions, entry listing) go
//!    through the trait seams in [`service`] that you back with your
//!    transport of choice.
//!
//! Before hand-off, every write batch passes through the
//! [`instrumentation`] tagger, which annotates outgoing entries with the
//! identity of the producing client libraries.

#[macro_use]
extern crate lazy_static;

/// Typed wrappers for the v2 API surface
pub mod api;

/// The `Logging` client and the per-log `Log` writer
pub mod client;

/// Error types
pub mod error;

/// Tagging of write batches with library-identity metadata
pub mod instrumentation;

/// Transport seams for the request/response API surface
pub mod service;

pub use client::{Builder, Log, Logging, WriteOptions};
pub use error::Error;
