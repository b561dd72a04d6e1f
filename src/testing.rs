//! Assertion helpers for tests that work with money values.
//!
//! These helpers consume the public money surface only; they carry no
//! numeric logic. Failure messages include both canonical amounts so a
//! mismatch is readable without re-running under a debugger.

use crate::amount::MoneyResult;
use crate::money::Money;

/// A binary money operation, dispatched through an explicit match.
///
/// Tests that used to select an operation by name pick a variant instead;
/// the set is closed on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// Exact addition.
    Add,
    /// Exact subtraction.
    Subtract,
    /// Multiplication with default rounding.
    Multiply,
    /// Division with default rounding.
    Divide,
}

impl BinaryOp {
    /// Apply the operation to two money operands.
    pub fn apply(self, lhs: &Money, rhs: &Money) -> MoneyResult<Money> {
        match self {
            BinaryOp::Add => Ok(lhs.add(rhs)),
            BinaryOp::Subtract => Ok(lhs.subtract(rhs)),
            BinaryOp::Multiply => Ok(lhs.multiply_by_money(rhs, true)),
            BinaryOp::Divide => lhs.divide_by_money(rhs, true),
        }
    }
}

/// Assert that two money values are equal.
///
/// # Panics
///
/// Panics when the amounts differ at the default scale.
pub fn assert_money_eq(expected: &Money, actual: &Money) {
    assert!(
        expected.is_equal_to(actual),
        "expected Money amount {} does not match actual {}",
        expected.amount(),
        actual.amount()
    );
}

/// Assert that a money value is zero.
///
/// # Panics
///
/// Panics when the amount is non-zero at the default scale.
pub fn assert_money_is_zero(actual: &Money) {
    assert_money_eq(&Money::zero(), actual);
}

/// Assert that a money value matches the given amount of cents.
///
/// # Panics
///
/// Panics when the amounts differ at the default scale.
pub fn assert_money_eq_cents(expected: &Money, cents: i64) {
    assert_money_eq(expected, &Money::from(cents));
}

/// Assert that a money value matches the given amount of dollars, supplied
/// as a decimal string.
///
/// # Panics
///
/// Panics when the amounts differ at the default scale, or when the dollar
/// string is malformed.
pub fn assert_money_eq_dollars(expected: &Money, dollars: &str) {
    let dollars = match Money::from_dollars(dollars) {
        Ok(money) => money,
        Err(error) => panic!("malformed dollar amount {:?}: {}", dollars, error),
    };
    assert_money_eq(expected, &dollars);
}
