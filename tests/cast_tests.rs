// Column adapter scenarios ported from the reference cast test suite.

use moneybags::testing::assert_money_eq;
use moneybags::{
    ColumnValue, Money, MoneyColumn, MoneyError, MoneyFromCents, MoneyFromDollars, Operand,
};

#[test]
fn test_cents_gets_and_sets_integer_columns() {
    let cast = MoneyFromCents;

    for value in [ColumnValue::Integer(1234), ColumnValue::Text("1234".to_string())] {
        let attribute = cast.read(value).unwrap().expect("non-null column");
        assert_money_eq(&Money::from_cents(1234).unwrap(), &attribute);

        let raw = cast.write(Operand::Money(attribute)).unwrap();
        assert_eq!(raw, ColumnValue::Integer(1234));
    }
}

#[test]
fn test_cents_write_truncates_sub_unit_remainder() {
    let cast = MoneyFromCents;
    let money = Money::from(100).divide_by(3, false).unwrap();

    assert_eq!(cast.write(Operand::Money(money)).unwrap(), ColumnValue::Integer(33));
}

#[test]
fn test_dollars_gets_and_sets_decimal_columns() {
    let cast = MoneyFromDollars;

    for value in [ColumnValue::Real(12.34), ColumnValue::Text("12.34".to_string())] {
        let attribute = cast.read(value).unwrap().expect("non-null column");
        assert_money_eq(&Money::from_dollars("12.34").unwrap(), &attribute);

        let raw = cast.write(Operand::Money(attribute)).unwrap();
        assert_eq!(raw, ColumnValue::Text("12.34".to_string()));
    }
}

#[test]
fn test_handles_null_values() {
    let cents = MoneyFromCents;
    assert_eq!(cents.read(ColumnValue::Null).unwrap(), None);
    assert_eq!(cents.write(Operand::Null).unwrap(), ColumnValue::Null);

    let dollars = MoneyFromDollars;
    assert_eq!(dollars.read(ColumnValue::Null).unwrap(), None);
    assert_eq!(dollars.write(Operand::Null).unwrap(), ColumnValue::Null);
}

#[test]
fn test_rejects_other_write_values() {
    let cents = MoneyFromCents;
    let dollars = MoneyFromDollars;

    for bad in [
        Operand::Integer(1234),
        Operand::Real(12.34),
        Operand::Text("12.34".to_string()),
    ] {
        assert_eq!(cents.write(bad.clone()), Err(MoneyError::InvalidOperand));
        assert_eq!(dollars.write(bad), Err(MoneyError::InvalidOperand));
    }
}

#[test]
fn test_malformed_column_text_fails_loudly() {
    let cents = MoneyFromCents;
    assert!(matches!(
        cents.read(ColumnValue::Text("12,34".to_string())),
        Err(MoneyError::ParseError(_))
    ));
}
