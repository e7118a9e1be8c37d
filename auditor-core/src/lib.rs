// SPDX-License-Identifier: MIT

//! Core ingest→validation pipeline for the checksum auditor.
//!
//! This crate is the "hard part" of the system: the fixed binary frame
//! decoder ([`protocol`]), the per-stream chained-CRC state machine
//! ([`crc_chain`]), RSA-2048 PKCS#1 v1.5 signature verification
//! ([`crypto`]), the stream configuration/registry ([`config`],
//! [`registry`], [`stream`]), the validation algorithm itself
//! ([`validator`]), the non-fatal failure taxonomy it emits ([`failure`]),
//! and the ambient counters ([`metrics`]). Everything here is pure and
//! synchronous — the thread wiring, socket, and journaling I/O live in the
//! `auditor-server` binary crate.

pub mod config;
pub mod crc_chain;
pub mod crypto;
pub mod error;
pub mod failure;
pub mod metrics;
pub mod protocol;
pub mod registry;
pub mod stream;
pub mod validator;

pub use error::{Error, Result};
pub use failure::Failure;
pub use protocol::Packet;
pub use stream::Stream;