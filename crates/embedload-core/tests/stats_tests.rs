use embedload_core::RunStats;

#[test]
fn success_rate_is_a_percentage() {
    let mut stats = RunStats::new();
    for ok in [true, true, false, true] {
        stats.begin_request();
        if ok {
            stats.record_success();
        }
    }
    assert_eq!(stats.total(), 4);
    assert_eq!(stats.successful(), 3);
    assert_eq!(stats.success_rate(), 75.0);
}

#[test]
fn empty_run_has_zero_rate() {
    assert_eq!(RunStats::new().success_rate(), 0.0);
}

#[test]
fn successes_never_outnumber_requests() {
    let mut stats = RunStats::new();
    stats.record_success();
    assert_eq!(stats.successful(), 0);
    assert_eq!(stats.begin_request(), 1);
    stats.record_success();
    stats.record_success();
    assert_eq!(stats.successful(), 1);
    assert!(stats.successful() <= stats.total());
}
