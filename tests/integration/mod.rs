//! Integration test suite for folio.
//!
//! These tests drive a whole session through `folio::app::dispatch` the
//! way the logic thread does, with a virtual clock in place of tokio
//! timers so multi-second chains run instantly and deterministically.
//!
//! # Test Categories
//!
//! - `boot`: Full and fast boot, the per-session boot flag
//! - `prompt`: History recall, Tab completion, focus and scrolling
//! - `meltdown`: Confirmation, crash, recovery and sabotage-proofing
//! - `overlays`: Matrix rain, exit redirect, links and résumé export

mod fixtures;

mod boot;
mod meltdown;
mod overlays;
mod prompt;
