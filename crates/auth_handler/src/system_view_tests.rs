use super::*;

#[test]
fn test_default_limits() {
    let view = SystemView::default();

    assert_eq!(view.default_lease_ttl(), Duration::from_secs(86_400));
    assert_eq!(view.max_lease_ttl(), Duration::from_secs(2_764_800));
}

#[test]
fn test_explicit_limits() {
    let view = SystemView::new(Duration::from_secs(3600), Duration::from_secs(7200));

    assert_eq!(view.default_lease_ttl(), Duration::from_secs(3600));
    assert_eq!(view.max_lease_ttl(), Duration::from_secs(7200));
}
