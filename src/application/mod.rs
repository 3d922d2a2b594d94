//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `OrderService`, the primary entry point for
//! driving orders through their lifecycle. Each public operation is one
//! load-modify-save round trip over the store ports, awaited sequentially
//! so callers observe all-or-nothing behavior per call.

pub mod service;
