use super::*;

fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_owned(),
        description: String::new(),
        brand: "Acme".to_owned(),
        price: 10.0,
        category: "Misc".to_owned(),
        release_date: None,
        stock_quantity: 1,
        available: true,
        image_name: None,
        image_type: None,
    }
}

fn loaded() -> ProductState {
    ProductState { items: vec![product(1, "Lamp"), product(2, "Desk")], ..ProductState::default() }
}

#[test]
fn pending_sets_loading_and_clears_error() {
    let mut state = ProductState { error: Some("old".to_owned()), ..ProductState::default() };
    apply(&mut state, ProductAction::FetchAll(Transition::Pending));
    assert!(state.loading);
    assert_eq!(state.error, None);
}

#[test]
fn fetch_all_replaces_items() {
    let mut state = loaded();
    apply(&mut state, ProductAction::FetchAll(Transition::Fulfilled(vec![product(3, "Chair")])));
    assert_eq!(state.items.len(), 1);
    assert!(!state.loading);
}

#[test]
fn fetch_one_sets_current() {
    let mut state = ProductState::default();
    apply(&mut state, ProductAction::FetchOne(Transition::Fulfilled(product(5, "Sofa"))));
    assert_eq!(state.current.map(|p| p.id), Some(5));
}

#[test]
fn create_appends_and_sets_notice() {
    let mut state = loaded();
    apply(&mut state, ProductAction::Create(Transition::Fulfilled(Some(product(3, "Chair")))));
    assert_eq!(state.items.len(), 3);
    assert_eq!(state.notice.as_deref(), Some(CREATED_NOTICE));

    apply(&mut state, ProductAction::Create(Transition::Fulfilled(None)));
    assert_eq!(state.items.len(), 3);
}

#[test]
fn update_replaces_matching_item_and_current() {
    let mut state = loaded();
    state.current = Some(product(2, "Desk"));
    apply(&mut state, ProductAction::Update(Transition::Fulfilled(Some(product(2, "Standing desk")))));
    assert_eq!(state.items[1].name, "Standing desk");
    assert_eq!(state.current.as_ref().map(|p| p.name.as_str()), Some("Standing desk"));
    assert_eq!(state.notice.as_deref(), Some(UPDATED_NOTICE));
}

#[test]
fn delete_removes_item_and_matching_current() {
    let mut state = loaded();
    state.current = Some(product(1, "Lamp"));
    apply(&mut state, ProductAction::Delete(Transition::Fulfilled(1)));
    assert_eq!(state.items.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(state.current, None);
    assert_eq!(state.notice.as_deref(), Some(DELETED_NOTICE));
}

#[test]
fn delete_keeps_unrelated_current() {
    let mut state = loaded();
    state.current = Some(product(2, "Desk"));
    apply(&mut state, ProductAction::Delete(Transition::Fulfilled(1)));
    assert!(state.current.is_some());
}

#[test]
fn rejected_records_error_and_keeps_items() {
    let mut state = loaded();
    apply(&mut state, ProductAction::Delete(Transition::Pending));
    apply(&mut state, ProductAction::Delete(Transition::Rejected("Access Denied".to_owned())));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Access Denied"));
    assert_eq!(state.items.len(), 2);
}

#[test]
fn clear_actions_reset_messages() {
    let mut state = ProductState {
        error: Some("e".to_owned()),
        notice: Some("n".to_owned()),
        ..ProductState::default()
    };
    apply(&mut state, ProductAction::ClearError);
    apply(&mut state, ProductAction::ClearNotice);
    assert_eq!(state.error, None);
    assert_eq!(state.notice, None);
}
