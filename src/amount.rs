//! Canonical fixed-point decimal representation and its arithmetic engines.
//!
//! This module implements the [`DecimalAmount`] type, a base-10 fixed-point
//! number with an arbitrary-width magnitude backed by `BigUint`. All monetary
//! arithmetic in the crate bottoms out here: exact addition and subtraction,
//! truncating multiplication and division at an explicit target scale, and a
//! rounding engine that turns the truncating primitives into
//! round-half-away-from-zero behavior.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Float, ToPrimitive, Zero};
use thiserror::Error;

/// Number of fractional digits carried by default through arithmetic,
/// comparison, and float normalization.
pub const DEFAULT_SCALE: u32 = 6;

/// Errors that can occur during money operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// A divisor's magnitude was exactly zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// A string did not match the canonical decimal grammar.
    #[error("Cannot parse decimal amount from string: {0}")]
    ParseError(String),
    /// A numeric input could not be represented as a decimal amount.
    #[error("Invalid numeric conversion: {0}")]
    InvalidConversion(String),
    /// A value did not fit in the requested target type.
    #[error("Value too large for target type: {0}")]
    Overflow(String),
    /// A column adapter was handed a write value that is not a Money.
    #[error("The given value is not a Money instance")]
    InvalidOperand,
}

/// Result type for money operations.
pub type MoneyResult<T> = Result<T, MoneyError>;

impl From<Infallible> for MoneyError {
    fn from(value: Infallible) -> Self {
        match value {}
    }
}

/// An arbitrary-precision fixed-point decimal number.
///
/// The value is `magnitude * 10^-scale`, negated when `negative` is set.
/// A negative sign with a zero magnitude is a valid stored value (`-0`,
/// `-0.00`) and is preserved by construction, but every comparison treats
/// it as numerically equal to zero.
///
/// The canonical text form produced by [`fmt::Display`] is an optional `-`,
/// integer digits without redundant leading zeros, and optionally a `.`
/// followed by exactly `scale` fractional digits. Exponential notation never
/// appears: float inputs are decoded exactly from their binary representation
/// instead of being formatted natively.
#[derive(Clone, PartialEq, Eq)]
pub struct DecimalAmount {
    /// Sign flag, meaningful even when the magnitude is zero.
    negative: bool,

    /// Unsigned scaled integer value.
    magnitude: BigUint,

    /// Number of fractional digits.
    scale: u32,
}

fn pow10(exp: u32) -> BigUint {
    BigUint::from(10u32).pow(exp)
}

fn pow10_int(exp: u32) -> BigInt {
    BigInt::from(10).pow(exp)
}

impl DecimalAmount {
    /// Zero with no fractional digits.
    pub fn zero() -> Self {
        Self { negative: false, magnitude: BigUint::zero(), scale: 0 }
    }

    /// Parse a decimal amount from a string. Surrounding whitespace is
    /// trimmed; the rest must match the grammar `-? digits (. digits)?`.
    /// Lone fractional forms (`.5`) and a trailing point (`12.`) are
    /// normalized; signs other than `-`, exponents, and non-digit
    /// characters fail with [`MoneyError::ParseError`].
    pub fn parse(input: &str) -> MoneyResult<Self> {
        let trimmed = input.trim();
        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MoneyError::ParseError(input.to_string()));
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MoneyError::ParseError(input.to_string()));
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);

        let magnitude = digits
            .parse::<BigUint>()
            .map_err(|_| MoneyError::ParseError(input.to_string()))?;

        Ok(Self { negative, magnitude, scale: frac_part.len() as u32 })
    }

    /// Convert a finite float into a decimal amount with [`DEFAULT_SCALE`]
    /// fractional digits.
    ///
    /// The float is decomposed into its exact binary mantissa and exponent,
    /// scaled, and rounded half away from zero at the scale boundary. This
    /// sidesteps the native formatter entirely, so exponential notation for
    /// very small or very large values cannot leak into the representation.
    pub fn from_f64(value: f64) -> MoneyResult<Self> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidConversion(format!(
                "cannot create a decimal amount from non-finite value: {}",
                value
            )));
        }

        let (mantissa, exponent, sign) = Float::integer_decode(value);
        let negative = sign < 0;
        let scaled = BigUint::from(mantissa) * pow10(DEFAULT_SCALE);

        let magnitude = if exponent >= 0 {
            scaled << exponent as usize
        } else {
            let denominator = BigUint::from(1u8) << (-exponent) as usize;
            let quotient = &scaled / &denominator;
            let remainder = scaled % &denominator;
            // Ties round away from zero, matching the rounding engine.
            if remainder * 2u32 >= denominator {
                quotient + 1u32
            } else {
                quotient
            }
        };

        Ok(Self { negative, magnitude, scale: DEFAULT_SCALE })
    }

    /// Number of fractional digits in this representation.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Whether the stored magnitude is exactly zero, at any scale. The sign
    /// flag is ignored, so `-0.00` is zero here.
    pub fn is_zero_magnitude(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// The value with its sign cleared.
    pub fn abs(&self) -> Self {
        Self { negative: false, magnitude: self.magnitude.clone(), scale: self.scale }
    }

    /// The value with its sign flipped. Negating zero yields `-0`, which
    /// every predicate treats as zero.
    pub fn negated(&self) -> Self {
        Self { negative: !self.negative, magnitude: self.magnitude.clone(), scale: self.scale }
    }

    /// The signed scaled integer, with `-0` collapsed to zero.
    fn signed(&self) -> BigInt {
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        // BigInt normalizes a zero magnitude to NoSign.
        BigInt::from_biguint(sign, self.magnitude.clone())
    }

    fn from_signed(value: BigInt, scale: u32) -> Self {
        let (sign, magnitude) = value.into_parts();
        Self { negative: sign == Sign::Minus, magnitude, scale }
    }

    /// Move a signed scaled integer between scales: padding with zero digits
    /// when widening, dropping digits (truncation toward zero) when
    /// narrowing.
    fn rescaled(value: BigInt, from: u32, to: u32) -> BigInt {
        if from > to {
            value / pow10_int(from - to)
        } else {
            value * pow10_int(to - from)
        }
    }

    /// The signed value truncated to `scale` fractional digits, as a scaled
    /// integer. This is the normalization behind every comparison.
    pub(crate) fn normalized(&self, scale: u32) -> BigInt {
        Self::rescaled(self.signed(), self.scale, scale)
    }

    /// Exact addition, truncated or zero-padded to exactly `scale`
    /// fractional digits. Addition at a fixed scale never rounds.
    pub fn add(&self, other: &Self, scale: u32) -> Self {
        let working = self.scale.max(other.scale);
        let sum = self.normalized(working) + other.normalized(working);
        Self::from_signed(Self::rescaled(sum, working, scale), scale)
    }

    /// Exact subtraction, truncated or zero-padded to exactly `scale`
    /// fractional digits.
    pub fn sub(&self, other: &Self, scale: u32) -> Self {
        let working = self.scale.max(other.scale);
        let difference = self.normalized(working) - other.normalized(working);
        Self::from_signed(Self::rescaled(difference, working, scale), scale)
    }

    /// Multiplication: the exact product truncated toward zero at `scale`
    /// fractional digits. No rounding happens here; callers that want
    /// conventional rounding apply [`DecimalAmount::round_half_away`] to the
    /// result.
    pub fn mul(&self, other: &Self, scale: u32) -> Self {
        let product = self.signed() * other.signed();
        Self::from_signed(Self::rescaled(product, self.scale + other.scale, scale), scale)
    }

    /// Division: the exact quotient truncated toward zero at `scale`
    /// fractional digits.
    ///
    /// Fails with [`MoneyError::DivisionByZero`] before any computation when
    /// the divisor's magnitude is exactly zero, whatever its scale.
    pub fn div(&self, other: &Self, scale: u32) -> MoneyResult<Self> {
        if other.is_zero_magnitude() {
            return Err(MoneyError::DivisionByZero);
        }

        // quotient * 10^-scale == self / other, truncated toward zero:
        // shift the dividend so the integer division lands on `scale`.
        let shift = scale as i64 + other.scale as i64 - self.scale as i64;
        let quotient = if shift >= 0 {
            (self.signed() * pow10_int(shift as u32)) / other.signed()
        } else {
            self.signed() / (other.signed() * pow10_int((-shift) as u32))
        };

        Ok(Self::from_signed(quotient, scale))
    }

    /// Divide by `10^digits` exactly, truncating the result toward zero at
    /// `scale` fractional digits.
    pub(crate) fn div_pow10(&self, digits: u32, scale: u32) -> Self {
        Self::from_signed(Self::rescaled(self.signed(), self.scale + digits, scale), scale)
    }

    /// Multiply by `10^digits` exactly, preferring to shrink the scale so no
    /// digits are invented or lost. The sign flag survives, so `-0.00`
    /// shifted stays negative zero.
    pub(crate) fn mul_pow10(&self, digits: u32) -> Self {
        let absorbed = digits.min(self.scale);
        Self {
            negative: self.negative,
            magnitude: &self.magnitude * pow10(digits - absorbed),
            scale: self.scale - absorbed,
        }
    }

    /// Round half away from zero at `precision` fractional digits
    /// (negative precision is clamped to zero).
    ///
    /// The truncating primitives cannot round on their own, so the bias
    /// constant `5 * 10^-(precision + 1)` is added to the magnitude before
    /// truncating to `precision` digits. Adding to the magnitude is adding
    /// for positive values and subtracting for negative ones, which is what
    /// carries `12.5` to `13` and `-12.5` to `-13`. Amounts without
    /// fractional digits pass through untouched; otherwise the result
    /// carries exactly `precision` fractional digits.
    pub fn round_half_away(&self, precision: i32) -> Self {
        let precision = precision.max(0) as u32;
        if self.scale == 0 {
            return self.clone();
        }

        let working = self.scale.max(precision + 1);
        let biased = &self.magnitude * pow10(working - self.scale)
            + BigUint::from(5u32) * pow10(working - precision - 1);

        Self {
            negative: self.negative,
            magnitude: biased / pow10(working - precision),
            scale: precision,
        }
    }

    /// Compare two amounts after truncating both to `scale` fractional
    /// digits (the shorter side is implicitly zero-padded). Negative zero
    /// and any magnitude smaller than one unit at `scale` compare equal to
    /// zero.
    pub fn cmp_at_scale(&self, other: &Self, scale: u32) -> Ordering {
        self.normalized(scale).cmp(&other.normalized(scale))
    }

    /// The integer part of the value, truncating fractional digits toward
    /// zero with the sign preserved.
    pub fn integer_part(&self) -> BigInt {
        Self::rescaled(self.signed(), self.scale, 0)
    }

    /// The integer part as an `i64`, failing with [`MoneyError::Overflow`]
    /// when it does not fit.
    pub fn to_i64_truncated(&self) -> MoneyResult<i64> {
        let integer = self.integer_part();
        integer
            .to_i64()
            .ok_or_else(|| MoneyError::Overflow(format!("{} does not fit in an i64", integer)))
    }
}

impl Default for DecimalAmount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.magnitude.to_string();
        let scale = self.scale as usize;

        let padded = if digits.len() <= scale {
            let mut padded = "0".repeat(scale + 1 - digits.len());
            padded.push_str(&digits);
            padded
        } else {
            digits
        };

        if self.negative {
            f.write_str("-")?;
        }
        if scale > 0 {
            let (int_part, frac_part) = padded.split_at(padded.len() - scale);
            write!(f, "{}.{}", int_part, frac_part)
        } else {
            f.write_str(&padded)
        }
    }
}

impl fmt::Debug for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DecimalAmount({})", self)
    }
}

impl From<i64> for DecimalAmount {
    fn from(value: i64) -> Self {
        Self {
            negative: value < 0,
            magnitude: BigUint::from(value.unsigned_abs()),
            scale: 0,
        }
    }
}

impl From<i32> for DecimalAmount {
    fn from(value: i32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u32> for DecimalAmount {
    fn from(value: u32) -> Self {
        Self::from(i64::from(value))
    }
}

impl From<u64> for DecimalAmount {
    fn from(value: u64) -> Self {
        Self { negative: false, magnitude: BigUint::from(value), scale: 0 }
    }
}

impl TryFrom<f64> for DecimalAmount {
    type Error = MoneyError;

    fn try_from(value: f64) -> MoneyResult<Self> {
        Self::from_f64(value)
    }
}

impl TryFrom<&str> for DecimalAmount {
    type Error = MoneyError;

    fn try_from(value: &str) -> MoneyResult<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for DecimalAmount {
    type Error = MoneyError;

    fn try_from(value: String) -> MoneyResult<Self> {
        Self::parse(&value)
    }
}

impl FromStr for DecimalAmount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
