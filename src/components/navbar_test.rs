use super::*;

#[test]
fn search_target_filters_the_product_listing() {
    assert_eq!(search_target(" gaming mouse ").as_deref(), Some("/products?search=gaming%20mouse"));
}

#[test]
fn blank_search_stays_put() {
    assert_eq!(search_target("   "), None);
}
