//! Shared test harness modules for the PraiaFinder CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod beaches_unit;
mod fs_unit;
mod helpers;
