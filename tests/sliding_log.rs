use admission_core::limiters::{SlidingLog, SlidingLogConfig};
use admission_core::{ConfigError, RateLimiter, TimeRegression};

#[test]
fn test_new_sliding_log() {
    assert!(SlidingLog::new(5, 5).is_ok());
}

#[test]
fn test_new_with_invalid_config() {
    assert_eq!(
        SlidingLog::new(0, 5).unwrap_err(),
        ConfigError::NonPositiveWindow(0)
    );
    assert_eq!(SlidingLog::new(5, 0).unwrap_err(), ConfigError::ZeroLimit);
}

#[test]
fn test_config_defaults() {
    let config = SlidingLogConfig::default();
    assert_eq!(config.window, 5);
    assert_eq!(config.limit, 5);
    assert!(SlidingLog::try_from(config).is_ok());
}

// Walkthrough with window = 5, limit = 5: saturate at tick 0, admit again
// once the tick-0 entries fall out of the span at tick 5.
#[test]
fn test_window_walkthrough() {
    let mut limiter = SlidingLog::new(5, 5).unwrap();

    limiter.tick(0).unwrap();
    for _ in 0..5 {
        assert_eq!(limiter.check("client-1", 0), Ok(true));
    }
    assert_eq!(limiter.check("client-1", 0), Ok(false));
    assert_eq!(limiter.log_len("client-1"), 5);

    // Tick 5 evicts every tick-0 entry: 0 <= 5 - 5
    limiter.tick(5).unwrap();
    assert_eq!(limiter.log_len("client-1"), 0);
    assert_eq!(limiter.check("client-1", 5), Ok(true));
}

#[test]
fn test_partial_eviction_from_front() {
    let mut limiter = SlidingLog::new(5, 3).unwrap();

    limiter.tick(0).unwrap();
    assert_eq!(limiter.check("a", 0), Ok(true));
    limiter.tick(1).unwrap();
    assert_eq!(limiter.check("a", 1), Ok(true));
    limiter.tick(2).unwrap();
    assert_eq!(limiter.check("a", 2), Ok(true));

    limiter.tick(4).unwrap();
    // All three stamps still inside (-1, 4]
    assert_eq!(limiter.check("a", 4), Ok(false));

    // Tick 5: only the tick-0 stamp has expired
    limiter.tick(5).unwrap();
    assert_eq!(limiter.log_len("a"), 2);
    assert_eq!(limiter.check("a", 5), Ok(true));

    // Tick 6: the tick-1 stamp follows
    limiter.tick(6).unwrap();
    assert_eq!(limiter.log_len("a"), 2); // stamps 2 and 5 remain
}

#[test]
fn test_check_evicts_when_ticks_were_skipped() {
    let mut limiter = SlidingLog::new(5, 2).unwrap();

    limiter.tick(0).unwrap();
    assert_eq!(limiter.check("a", 0), Ok(true));
    assert_eq!(limiter.check("a", 0), Ok(true));
    assert_eq!(limiter.check("a", 0), Ok(false));

    // No tick since 0: the decision at tick 7 must still be exact
    assert_eq!(limiter.check("a", 7), Ok(true));
    assert_eq!(limiter.log_len("a"), 1);
}

#[test]
fn test_sliding_span_has_no_boundary_artifact() {
    let mut limiter = SlidingLog::new(4, 2).unwrap();

    limiter.tick(3).unwrap();
    assert_eq!(limiter.check("a", 3), Ok(true));
    assert_eq!(limiter.check("a", 3), Ok(true));

    // A fixed window aligned at 4 would reset here; the sliding span
    // (0, 4] still holds both admissions.
    limiter.tick(4).unwrap();
    assert_eq!(limiter.check("a", 4), Ok(false));

    limiter.tick(7).unwrap();
    assert_eq!(limiter.check("a", 7), Ok(true));
}

#[test]
fn test_clients_are_accounted_independently() {
    let mut limiter = SlidingLog::new(5, 1).unwrap();

    limiter.tick(0).unwrap();
    assert_eq!(limiter.check("a", 0), Ok(true));
    assert_eq!(limiter.check("a", 0), Ok(false));
    assert_eq!(limiter.check("b", 0), Ok(true));
}

#[test]
fn test_unknown_client_starts_with_full_capacity() {
    let mut limiter = SlidingLog::new(5, 4).unwrap();
    limiter.tick(9).unwrap();

    assert_eq!(limiter.log_len("fresh"), 0);
    assert_eq!(limiter.capacity_remaining("fresh"), 4);
    assert_eq!(limiter.check("fresh", 9), Ok(true));
    assert_eq!(limiter.capacity_remaining("fresh"), 3);
}

#[test]
fn test_denied_check_appends_no_entry() {
    let mut limiter = SlidingLog::new(5, 1).unwrap();
    limiter.tick(0).unwrap();
    assert_eq!(limiter.check("a", 0), Ok(true));

    for _ in 0..5 {
        assert_eq!(limiter.check("a", 0), Ok(false));
    }
    assert_eq!(limiter.log_len("a"), 1);
}

#[test]
fn test_admissions_in_any_span_never_exceed_limit() {
    let mut limiter = SlidingLog::new(5, 5).unwrap();
    let mut admitted: Vec<i64> = Vec::new();

    for t in 0..30 {
        limiter.tick(t).unwrap();
        for _ in 0..3 {
            if limiter.check("client-1", t).unwrap() {
                admitted.push(t);
            }
        }
    }

    for t in 0..30 {
        let in_span = admitted
            .iter()
            .filter(|&&stamp| stamp > t - 5 && stamp <= t)
            .count();
        assert!(in_span <= 5, "span ending at {} holds {} admissions", t, in_span);
    }
}

#[test]
fn test_time_regression_rejected() {
    let mut limiter = SlidingLog::new(5, 5).unwrap();
    limiter.tick(4).unwrap();
    assert_eq!(limiter.check("a", 4), Ok(true));

    assert_eq!(limiter.tick(2), Err(TimeRegression { now: 2, last_seen: 4 }));
    assert_eq!(
        limiter.check("a", 1),
        Err(TimeRegression { now: 1, last_seen: 4 })
    );
    assert_eq!(limiter.log_len("a"), 1);
}

#[test]
fn test_repeated_tick_is_noop() {
    let mut limiter = SlidingLog::new(5, 5).unwrap();
    limiter.tick(0).unwrap();
    assert_eq!(limiter.check("a", 0), Ok(true));

    limiter.tick(3).unwrap();
    limiter.tick(3).unwrap();
    assert_eq!(limiter.log_len("a"), 1);
}
