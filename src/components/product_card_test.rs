use super::*;

#[test]
fn format_price_uses_two_decimals() {
    assert_eq!(format_price(12.5), "$12.50");
    assert_eq!(format_price(0.0), "$0.00");
}

#[test]
fn stock_label_requires_flag_and_quantity() {
    assert_eq!(stock_label(true, 3), "In stock");
    assert_eq!(stock_label(true, 0), "Out of stock");
    assert_eq!(stock_label(false, 3), "Out of stock");
}
