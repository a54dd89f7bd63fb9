use gzshard::util::human_bytes;

#[test]
fn test_human_bytes_formatting() {
    assert_eq!(human_bytes(0), "0 B");
    assert_eq!(human_bytes(999), "999 B");
    assert_eq!(human_bytes(1000), "1.0 kB");
    assert_eq!(human_bytes(1_500_000), "1.5 MB");
    // Rounding must promote the unit instead of printing "1000 kB".
    assert_eq!(human_bytes(999_999), "1.0 MB");
    assert_eq!(human_bytes(999_499), "999 kB");
    assert_eq!(human_bytes(250_000_000_000), "250 GB");
    assert_eq!(human_bytes(3_000_000_000_000), "3.0 TB");
}
