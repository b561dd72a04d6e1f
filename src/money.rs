//! The immutable [`Money`] value type.
//!
//! A `Money` wraps exactly one [`DecimalAmount`], always denominated in the
//! smallest currency unit (cents) once constructed. Every operation is a pure
//! function: the receiver is never mutated, and each arithmetic or rounding
//! call allocates a brand-new value. Because of that, sharing values across
//! threads needs no coordination.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::{DecimalAmount, MoneyError, MoneyResult, DEFAULT_SCALE};

/// An immutable monetary value in minor units, backed by arbitrary-precision
/// fixed-point decimal arithmetic.
///
/// Construction accepts integers, finite floats, and decimal strings; floats
/// are normalized to [`DEFAULT_SCALE`] fractional digits, and strings are
/// validated against the canonical decimal grammar. Addition and subtraction
/// are exact at the default scale. Multiplication and division truncate at
/// the default scale and, unless asked not to, round the result half away
/// from zero to whole minor units.
#[derive(Clone)]
pub struct Money {
    amount: DecimalAmount,
}

impl Money {
    /// Create a money value from an amount in minor units.
    pub fn new<T>(amount: T) -> MoneyResult<Self>
    where
        T: TryInto<DecimalAmount>,
        MoneyError: From<T::Error>,
    {
        Ok(Self { amount: amount.try_into()? })
    }

    /// Create a money value from an amount in minor units (cents).
    pub fn from_cents<T>(amount: T) -> MoneyResult<Self>
    where
        T: TryInto<DecimalAmount>,
        MoneyError: From<T::Error>,
    {
        Self::new(amount)
    }

    /// Create a money value from an amount in major units (dollars).
    /// The input is normalized, then multiplied by 100 exactly.
    pub fn from_dollars<T>(amount: T) -> MoneyResult<Self>
    where
        T: TryInto<DecimalAmount>,
        MoneyError: From<T::Error>,
    {
        let dollars: DecimalAmount = amount.try_into()?;
        Ok(Self { amount: dollars.mul_pow10(2) })
    }

    /// A zero money value.
    pub fn zero() -> Self {
        Self { amount: DecimalAmount::zero() }
    }

    /// The raw amount in its canonical decimal string form.
    pub fn amount(&self) -> String {
        self.amount.to_string()
    }

    /// Borrow the underlying decimal amount.
    pub fn decimal(&self) -> &DecimalAmount {
        &self.amount
    }

    /// The amount in cents, truncating any sub-unit fractional remainder
    /// accumulated by prior operations (sign preserved). Fails with
    /// [`MoneyError::Overflow`] when the value does not fit in an `i64`.
    pub fn in_cents(&self) -> MoneyResult<i64> {
        self.amount.to_i64_truncated()
    }

    /// The amount in dollars as a fixed two-decimal string: the stored
    /// amount divided by 100 truncated at three fractional digits, then
    /// rounded half away from zero to two.
    pub fn in_dollars(&self) -> String {
        self.amount.div_pow10(2, 3).round_half_away(2).to_string()
    }

    /// Add another amount to this amount.
    pub fn add(&self, operand: &Money) -> Self {
        Self { amount: self.amount.add(&operand.amount, DEFAULT_SCALE) }
    }

    /// Subtract another amount from this amount.
    pub fn subtract(&self, operand: &Money) -> Self {
        Self { amount: self.amount.sub(&operand.amount, DEFAULT_SCALE) }
    }

    /// Multiply this amount by another money operand.
    ///
    /// With `round` set, the truncated raw product is rounded half away from
    /// zero to whole minor units; otherwise the raw product is returned with
    /// its full default-scale precision, for callers chaining exact
    /// intermediate computations.
    pub fn multiply_by_money(&self, operand: &Money, round: bool) -> Self {
        let raw = self.amount.mul(&operand.amount, DEFAULT_SCALE);
        Self { amount: if round { raw.round_half_away(0) } else { raw } }
    }

    /// Multiply this amount by the given scale factor.
    pub fn multiply_by<T>(&self, multiplier: T, round: bool) -> MoneyResult<Self>
    where
        T: TryInto<DecimalAmount>,
        MoneyError: From<T::Error>,
    {
        let multiplier: DecimalAmount = multiplier.try_into()?;
        let raw = self.amount.mul(&multiplier, DEFAULT_SCALE);
        Ok(Self { amount: if round { raw.round_half_away(0) } else { raw } })
    }

    /// Divide this amount by another money operand.
    ///
    /// Fails with [`MoneyError::DivisionByZero`] when the operand's
    /// magnitude is zero.
    pub fn divide_by_money(&self, operand: &Money, round: bool) -> MoneyResult<Self> {
        let raw = self.amount.div(&operand.amount, DEFAULT_SCALE)?;
        Ok(Self { amount: if round { raw.round_half_away(0) } else { raw } })
    }

    /// Divide this amount by the given scale factor.
    pub fn divide_by<T>(&self, divisor: T, round: bool) -> MoneyResult<Self>
    where
        T: TryInto<DecimalAmount>,
        MoneyError: From<T::Error>,
    {
        let divisor: DecimalAmount = divisor.try_into()?;
        let raw = self.amount.div(&divisor, DEFAULT_SCALE)?;
        Ok(Self { amount: if round { raw.round_half_away(0) } else { raw } })
    }

    /// The absolute value of this amount.
    pub fn absolute(&self) -> Self {
        Self { amount: self.amount.abs() }
    }

    /// This amount with its sign flipped. A pure sign flip: no rounding and
    /// no precision loss.
    pub fn invert_sign(&self) -> Self {
        Self { amount: self.amount.negated() }
    }

    /// Round this amount half away from zero at the given precision
    /// (negative precision is clamped to zero).
    pub fn round(&self, precision: i32) -> Self {
        Self { amount: self.amount.round_half_away(precision) }
    }

    fn cmp_default(&self, other: &Money) -> Ordering {
        self.amount.cmp_at_scale(&other.amount, DEFAULT_SCALE)
    }

    /// Whether the amount is zero at the default scale. Negative zero and
    /// any magnitude smaller than one unit at that scale count as zero.
    pub fn is_zero(&self) -> bool {
        self.cmp_default(&Money::zero()) == Ordering::Equal
    }

    /// Whether the amount is different from zero at the default scale.
    pub fn is_nonzero(&self) -> bool {
        !self.is_zero()
    }

    /// Whether the amount is greater than or equal to zero. Zero itself is
    /// positive.
    pub fn is_positive(&self) -> bool {
        self.cmp_default(&Money::zero()) != Ordering::Less
    }

    /// Whether the amount is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.cmp_default(&Money::zero()) == Ordering::Less
    }

    /// Whether this amount equals the given amount, comparing at the default
    /// scale so differing fractional widths do not matter.
    pub fn is_equal_to(&self, operand: &Money) -> bool {
        self.cmp_default(operand) == Ordering::Equal
    }

    /// Whether this amount differs from the given amount at the default
    /// scale.
    pub fn is_not_equal_to(&self, operand: &Money) -> bool {
        !self.is_equal_to(operand)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({})", self.amount)
    }
}

// Equality, ordering, and hashing all normalize to the default scale so they
// agree with is_equal_to; "12.34" and "12.34000" are the same key.
impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_default(other) == Ordering::Equal
    }
}

impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_default(other)
    }
}

impl Hash for Money {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.amount.normalized(DEFAULT_SCALE).hash(state);
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self { amount: DecimalAmount::from(value) }
    }
}

impl From<i32> for Money {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl TryFrom<f64> for Money {
    type Error = MoneyError;

    fn try_from(value: f64) -> MoneyResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Money {
    type Error = MoneyError;

    fn try_from(value: &str) -> MoneyResult<Self> {
        Self::new(value)
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::add(&self, &other)
    }
}

impl Add<&Money> for &Money {
    type Output = Money;

    fn add(self, other: &Money) -> Money {
        Money::add(self, other)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        self.subtract(&other)
    }
}

impl Sub<&Money> for &Money {
    type Output = Money;

    fn sub(self, other: &Money) -> Money {
        self.subtract(other)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        self.invert_sign()
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Money {
        self.invert_sign()
    }
}

// Serialized as the canonical decimal string so arbitrary-width amounts
// survive a round trip without precision loss.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.amount())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let literal = String::deserialize(deserializer)?;
        Money::new(literal.as_str()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let money = Money::default();
        assert!(money.is_zero());
        assert_eq!(money.in_cents().unwrap(), 0);
    }

    #[test]
    fn test_display_and_debug() {
        let money = Money::new("12.34").unwrap();
        assert_eq!(money.to_string(), "12.34");
        assert_eq!(format!("{:?}", money), "Money(12.34)");
    }

    #[test]
    fn test_decimal_borrows_the_stored_amount() {
        let money = Money::new("-12.340").unwrap();
        let decimal = money.decimal();

        assert_eq!(decimal.to_string(), money.amount());
        assert_eq!(decimal.scale(), 3);
    }

    #[test]
    fn test_operators_match_named_methods() {
        let a = Money::from(150);
        let b = Money::from(50);

        assert_eq!((&a + &b).in_cents().unwrap(), 200);
        assert_eq!((&a - &b).in_cents().unwrap(), 100);
        assert_eq!((-&a).in_cents().unwrap(), -150);
        assert_eq!((a.clone() + b.clone()).in_cents().unwrap(), 200);
        assert_eq!((a - b).in_cents().unwrap(), 100);
    }

    #[test]
    fn test_ord_uses_default_scale() {
        let a = Money::new("12.34").unwrap();
        let b = Money::new("12.34000").unwrap();
        let c = Money::new("12.35").unwrap();

        assert_eq!(a, b);
        assert!(a < c);
        assert!(c > b);
    }

    #[test]
    fn test_hash_consistent_with_eq() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        seen.insert(Money::new("12.34").unwrap());
        assert!(seen.contains(&Money::new("12.34000").unwrap()));
        assert!(!seen.contains(&Money::new("12.35").unwrap()));
    }

    #[test]
    fn test_from_str() {
        let money: Money = "1234.56".parse().unwrap();
        assert_eq!(money.in_cents().unwrap(), 1234);
        assert!("not money".parse::<Money>().is_err());
    }
}
