//! Immutable money values backed by arbitrary-precision fixed-point decimal
//! arithmetic.
//!
//! This crate eliminates binary-floating-point rounding error from financial
//! computation. The core is [`DecimalAmount`], a canonical fixed-point
//! decimal with exact addition/subtraction, truncating multiplication and
//! division at an explicit scale, and round-half-away-from-zero on top of
//! those truncating primitives. [`Money`] wraps one such amount in minor
//! currency units and exposes a purely functional operation surface: every
//! arithmetic call returns a brand-new value.
//!
//! Persistence column adapters and test assertion helpers consume that
//! surface without adding numeric logic of their own.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod amount;
pub mod casts;
pub mod money;
pub mod testing;

// Re-export main types
pub use amount::{DecimalAmount, MoneyError, MoneyResult, DEFAULT_SCALE};
pub use casts::{ColumnValue, MoneyColumn, MoneyFromCents, MoneyFromDollars, Operand};
pub use money::Money;
pub use testing::{
    assert_money_eq, assert_money_eq_cents, assert_money_eq_dollars, assert_money_is_zero,
    BinaryOp,
};

// Re-export for convenience
pub use num_bigint::BigInt;
