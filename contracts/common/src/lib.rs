//! Shared utilities and error types for the staking contract suite.
//!
//! This crate provides:
//! - [`CommonError`] — standardised error codes for the collaborator contracts.
//! - [`admin_tiers`] — the tiered admin registry used for owner-gated calls.
//! - [`whitelist`] — named address sets (protocol members, token minters).
//!
//! Contract-specific errors can extend the range starting at code **100** and
//! above, ensuring no collisions with the common set.

#![no_std]

use soroban_sdk::contracterror;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod admin_tiers;
pub mod whitelist;

pub use admin_tiers::*;
pub use whitelist::*;

// ── Shared error enum ────────────────────────────────────────────────────────

/// Standardised error codes shared by the suite's collaborator contracts.
///
/// # Code ranges
/// | Range   | Purpose                       |
/// |---------|-------------------------------|
/// | 1 – 9   | Lifecycle / initialisation    |
/// | 10 – 19 | Authentication & authorisation|
/// | 30 – 39 | Validation / input            |
/// | 100+    | Reserved for contract-specific |
#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
#[repr(u32)]
pub enum CommonError {
    // ── Lifecycle (1–9) ──────────────────────────────────────
    /// The contract has not been initialised yet.
    NotInitialized = 1,

    /// The contract has already been initialised.
    AlreadyInitialized = 2,

    // ── Auth (10–19) ─────────────────────────────────────────
    /// The caller is not the owner or lacks the required tier.
    AccessDenied = 10,

    // ── Validation (30–39) ───────────────────────────────────
    /// One or more input parameters are invalid (e.g. zero epoch length).
    InvalidInput = 30,
}
