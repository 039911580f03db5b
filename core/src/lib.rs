//! NEO hardware wallet core
//!
//! This provides a common [Engine][engine] supporting on-device review and
//! signing of NEO transactions, for execution on hardware wallets.
//!
//! Interactions with the [Engine][engine] are performed via
//! [Event][engine::Event]s and [Output][engine::Output]s, see
//! [ledger_neo_apdu] for APDU objects and wire encodings.
//!
//! ## Operations
//!
//! ### Requesting public keys
//!
//! Public keys can be requested via [`PublicKeyReq`][ledger_neo_apdu::public_key::PublicKeyReq]
//! APDU, returning a [`PublicKeyResp`][ledger_neo_apdu::public_key::PublicKeyResp] containing
//! the uncompressed SECP256R1 public key for the requested BIP-44 path.
//!
//! ### Signing a transaction
//!
//! Transactions are streamed to the device as a sequence of
//! [`SignTxChunk`][ledger_neo_apdu::sign::SignTxChunk] APDUs, with the
//! signer's BIP-44 path appended to the final chunk. On receipt of the
//! final chunk the engine decodes the transaction, renders it for user
//! review, and on approval returns a
//! [`SignatureResp`][ledger_neo_apdu::sign::SignatureResp] containing the
//! DER-encoded signature and the SHA-256 digest that was signed.

#![cfg_attr(not(feature = "std"), no_std)]

pub use ledger_neo_apdu::{self as apdu};

pub mod address;
pub mod base;
pub mod engine;
pub mod grammar;
pub mod helpers;
pub mod reader;
pub mod screen;

/// Maximum accepted transaction size in bytes (BIP-44 path included)
pub const MAX_RAW_LENGTH: usize = 1024;
