//! Persistence column adapters.
//!
//! These adapters translate between a storage column and [`Money`] without
//! containing any numeric logic of their own: a minor-unit (integer) column
//! goes through [`Money::from_cents`] on read and [`Money::in_cents`] on
//! write, a major-unit (decimal string) column through
//! [`Money::from_dollars`] and [`Money::in_dollars`]. Writes accept only a
//! money value or null; anything else is rejected with
//! [`MoneyError::InvalidOperand`] before it can reach the column.

use crate::amount::{MoneyError, MoneyResult};
use crate::money::Money;

/// A raw column value, as the storage layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// SQL NULL.
    Null,
    /// An integer column value.
    Integer(i64),
    /// A floating-point column value.
    Real(f64),
    /// A textual column value.
    Text(String),
}

/// A value handed to an adapter on write. Only [`Operand::Money`] and
/// [`Operand::Null`] are writable.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// No value.
    Null,
    /// A money value.
    Money(Money),
    /// A raw integer that bypassed the money type.
    Integer(i64),
    /// A raw float that bypassed the money type.
    Real(f64),
    /// A raw string that bypassed the money type.
    Text(String),
}

/// Translation between one storage column shape and [`Money`].
pub trait MoneyColumn {
    /// Convert a raw column value into a money value; NULL reads as `None`.
    fn read(&self, value: ColumnValue) -> MoneyResult<Option<Money>>;

    /// Prepare a write value for storage, rejecting anything that is not a
    /// money value or null.
    fn write(&self, value: Operand) -> MoneyResult<ColumnValue>;
}

/// Adapter for a column storing minor units (cents) as an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoneyFromCents;

impl MoneyColumn for MoneyFromCents {
    fn read(&self, value: ColumnValue) -> MoneyResult<Option<Money>> {
        match value {
            ColumnValue::Null => Ok(None),
            ColumnValue::Integer(cents) => Money::from_cents(cents).map(Some),
            ColumnValue::Real(cents) => Money::from_cents(cents).map(Some),
            ColumnValue::Text(cents) => Money::from_cents(cents.as_str()).map(Some),
        }
    }

    fn write(&self, value: Operand) -> MoneyResult<ColumnValue> {
        match value {
            Operand::Null => Ok(ColumnValue::Null),
            Operand::Money(money) => Ok(ColumnValue::Integer(money.in_cents()?)),
            _ => Err(MoneyError::InvalidOperand),
        }
    }
}

/// Adapter for a column storing major units (dollars) as a decimal string.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoneyFromDollars;

impl MoneyColumn for MoneyFromDollars {
    fn read(&self, value: ColumnValue) -> MoneyResult<Option<Money>> {
        match value {
            ColumnValue::Null => Ok(None),
            ColumnValue::Integer(dollars) => Money::from_dollars(dollars).map(Some),
            ColumnValue::Real(dollars) => Money::from_dollars(dollars).map(Some),
            ColumnValue::Text(dollars) => Money::from_dollars(dollars.as_str()).map(Some),
        }
    }

    fn write(&self, value: Operand) -> MoneyResult<ColumnValue> {
        match value {
            Operand::Null => Ok(ColumnValue::Null),
            Operand::Money(money) => Ok(ColumnValue::Text(money.in_dollars())),
            _ => Err(MoneyError::InvalidOperand),
        }
    }
}
