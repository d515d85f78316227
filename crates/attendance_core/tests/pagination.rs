use attendance_core::{Pagination, PaginationError, DEFAULT_ITEMS_PER_PAGE};

#[test]
fn default_starts_on_first_page() {
    let pagination = Pagination::default();
    assert_eq!(pagination.current_page(), 1);
    assert_eq!(pagination.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
}

#[test]
fn new_rejects_zero_values() {
    assert_eq!(Pagination::new(0, 10), Err(PaginationError::ZeroPage));
    assert_eq!(Pagination::new(1, 0), Err(PaginationError::ZeroItemsPerPage));
}

#[test]
fn next_and_prev_move_one_page() {
    let mut pagination = Pagination::new(1, 5).expect("valid pagination");

    pagination.next_page();
    pagination.next_page();
    assert_eq!(pagination.current_page(), 3);

    pagination.prev_page();
    assert_eq!(pagination.current_page(), 2);
}

#[test]
fn prev_never_goes_below_first_page() {
    let mut pagination = Pagination::new(3, 5).expect("valid pagination");
    for _ in 0..10 {
        pagination.prev_page();
        assert!(pagination.current_page() >= 1);
    }
    assert_eq!(pagination.current_page(), 1);
}

#[test]
fn set_page_then_reset_returns_to_initial_page() {
    let mut pagination = Pagination::new(1, 10).expect("valid pagination");

    pagination.set_page(5);
    assert_eq!(pagination.current_page(), 5);
    pagination.set_items_per_page(25).expect("valid page size");

    pagination.reset();
    assert_eq!(pagination.current_page(), 1);
    assert_eq!(pagination.items_per_page(), 10);
}

#[test]
fn set_page_floors_zero_to_first_page() {
    let mut pagination = Pagination::new(2, 10).expect("valid pagination");
    pagination.set_page(0);
    assert_eq!(pagination.current_page(), 1);
}

#[test]
fn set_items_per_page_rejects_zero_and_returns_to_first_page() {
    let mut pagination = Pagination::new(4, 10).expect("valid pagination");

    assert_eq!(
        pagination.set_items_per_page(0),
        Err(PaginationError::ZeroItemsPerPage)
    );
    assert_eq!(pagination.current_page(), 4);

    pagination.set_items_per_page(20).expect("valid page size");
    assert_eq!(pagination.current_page(), 1);
    assert_eq!(pagination.items_per_page(), 20);
}

#[test]
fn page_items_slices_and_total_pages_rounds_up() {
    let items: Vec<u32> = (1..=23).collect();
    let mut pagination = Pagination::new(1, 10).expect("valid pagination");

    assert_eq!(pagination.total_pages(items.len()), 3);
    assert_eq!(pagination.total_pages(0), 1);
    assert_eq!(pagination.page_items(&items), &items[0..10]);

    pagination.set_page(3);
    assert_eq!(pagination.offset(), 20);
    assert_eq!(pagination.page_items(&items), &[21, 22, 23]);

    pagination.next_page();
    assert!(pagination.page_items(&items).is_empty());
}
