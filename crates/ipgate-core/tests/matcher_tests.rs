//! Integration tests for allowlist matching

use ipgate_core::{
    is_allowed, AddressMatcher, Allowlist, AllowlistEntry, LiteralResolver, NullSink,
    RecordingSink,
};

fn matcher() -> AddressMatcher {
    AddressMatcher::new()
        .with_resolver(LiteralResolver)
        .with_diagnostics(NullSink)
}

#[test]
fn test_verbatim_entry_matches() {
    let m = matcher();
    for ip in ["192.168.1.1", "10.0.0.1", "::1", "2001:db8::42"] {
        assert!(m.is_allowed(ip, ip), "{ip} should match itself verbatim");
        assert!(
            m.is_allowed(ip, &format!("  {ip} , 172.16.0.1")),
            "{ip} should match post-trim"
        );
    }
}

#[test]
fn test_full_width_subnet_is_self_match() {
    let m = matcher();
    assert!(m.is_allowed("192.0.2.7", "192.0.2.7/32"));
    assert!(!m.is_allowed("192.0.2.8", "192.0.2.7/32"));
    assert!(m.is_allowed("2001:db8::7", "2001:db8::7/128"));
    assert!(!m.is_allowed("2001:db8::8", "2001:db8::7/128"));
}

#[test]
fn test_zero_prefix_matches_any_v4() {
    let m = matcher();
    for ip in ["0.0.0.0", "8.8.8.8", "255.255.255.255", "127.0.0.1"] {
        assert!(m.is_allowed(ip, "0.0.0.0/0"), "{ip} should match 0.0.0.0/0");
    }
}

#[test]
fn test_mixed_family_never_matches() {
    let m = matcher();
    assert!(!m.is_allowed("::1", "192.168.0.0/16"));
    assert!(!m.is_allowed("::ffff:192.168.0.1", "192.168.0.0/16"));
    assert!(!m.is_allowed("10.0.0.1", "2001:db8::/32"));
}

#[test]
fn test_malformed_entry_does_not_abort_scan() {
    let m = matcher();
    assert!(m.is_allowed("10.0.0.5", "not-a-cidr/xx, 10.0.0.0/8"));
}

#[test]
fn test_empty_allowlist_denies() {
    let m = matcher();
    assert!(!m.is_allowed("1.2.3.4", ""));
}

#[test]
fn test_slash_23_boundary() {
    let m = matcher();
    assert!(m.is_allowed("192.168.0.5", "192.168.1.0/23"));
    assert!(!m.is_allowed("192.168.2.5", "192.168.1.0/23"));
}

#[test]
fn test_repeated_calls_are_stable() {
    let m = matcher();
    let allowlist = "10.0.0.0/8, 192.168.1.1, junk/99x";
    let first = m.is_allowed("10.5.5.5", allowlist);
    for _ in 0..10 {
        assert_eq!(m.is_allowed("10.5.5.5", allowlist), first);
    }
}

#[test]
fn test_diagnostics_for_each_failure_kind() {
    let sink = RecordingSink::new();
    let list = Allowlist::parse_with("10.0.0.0/xx, ::/200, 1.2.3.4", &sink);
    assert_eq!(list.len(), 1);
    assert_eq!(list.entries()[0], AllowlistEntry::Exact("1.2.3.4".to_string()));

    let reported = sink.entries();
    assert_eq!(reported.len(), 2);
    assert!(reported[0].1.contains("not a base-10 integer"));
    assert!(reported[1].1.contains("out of range"));
}

#[test]
fn test_default_matcher_free_function() {
    assert!(is_allowed("10.0.0.5", "10.0.0.0/8"));
    assert!(!is_allowed("10.0.0.5", "192.168.0.0/16"));
}

#[test]
fn test_tracing_diagnostics_do_not_affect_result() {
    // Install a subscriber so the default TracingSink path actually runs
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let m = AddressMatcher::new().with_resolver(LiteralResolver);
        assert!(m.is_allowed("10.0.0.5", "garbage/zz, 10.0.0.0/8"));
        assert!(!m.is_allowed("10.0.0.5", "garbage/zz"));
    });
}
