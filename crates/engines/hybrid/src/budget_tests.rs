use super::*;

#[test]
fn test_unlimited_never_exhausts() {
    let mut budget = SearchBudget::unlimited();
    budget.start();
    assert!(!budget.exhausted(0));
    assert!(!budget.exhausted(u64::MAX));
}

#[test]
fn test_node_cap() {
    let budget = SearchBudget::unlimited().with_max_nodes(10);
    assert!(!budget.exhausted(9));
    assert!(budget.exhausted(10));
}

#[test]
fn test_stop_handle_is_shared() {
    let budget = SearchBudget::unlimited();
    let handle = budget.stop_handle();
    assert!(!budget.exhausted(0));

    std::thread::spawn(move || handle.stop()).join().unwrap();
    assert!(budget.exhausted(0));
}

#[test]
fn test_time_limit() {
    let mut budget = SearchBudget::unlimited().with_time_limit(Duration::from_millis(200));
    budget.start();
    assert!(!budget.exhausted(0));
    std::thread::sleep(Duration::from_millis(250));
    assert!(budget.exhausted(0));
    assert!(budget.elapsed() >= Duration::from_millis(200));
}

#[test]
fn test_elapsed_zero_before_start() {
    assert_eq!(SearchBudget::unlimited().elapsed(), Duration::ZERO);
}
