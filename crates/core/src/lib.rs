// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

pub use apply::{apply_batch, finalize_audit, record_receipt};
pub use command::BatchCommand;
pub use error::{CoreError, StateError, ValidationError};
pub use state::{
    BatchTransition, CARRIER_PLACEHOLDER, DEFAULT_DISPATCH_ADDRESS, ReceiptTransition,
    ReturnBatch, ReturnStep,
};
