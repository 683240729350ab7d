//! End-to-end resolution from raw query strings, decoded the way an HTTP
//! framework would hand them over.

use chrono::{DateTime, Duration, TimeZone, Utc};
use timespan::{resolve_timespan_at, TimespanError, TimespanRequest};
use url::form_urlencoded;

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 0).unwrap()
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

fn query(qs: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(qs.as_bytes()).into_owned().collect()
}

#[test]
fn test_query_string_table() {
    let cases = [
        ("interval=2014", utc(2014, 1, 1, 0, 0, 0), utc(2014, 12, 31, 23, 59, 59)),
        ("start=2013&end=2014", utc(2013, 1, 1, 0, 0, 0), utc(2014, 12, 31, 23, 59, 59)),
        ("start=201405&end=20140526", utc(2014, 5, 1, 0, 0, 0), utc(2014, 5, 26, 23, 59, 59)),
        ("interval=-1w", anchor() - Duration::weeks(1), anchor()),
        ("interval=%2B1h10s", anchor(), anchor() + Duration::seconds(3610)),
        ("bucket=day&interval=201405&metric=tokens", utc(2014, 5, 1, 0, 0, 0), utc(2014, 5, 31, 23, 59, 59)),
    ];

    for (qs, start, end) in cases {
        let span = resolve_timespan_at(&query(qs), anchor())
            .unwrap_or_else(|e| panic!("unexpected error parsing {qs}: {e}"));
        assert_eq!(span.start, start, "start of {qs}");
        assert_eq!(span.end, end, "end of {qs}");
    }
}

#[test]
fn test_query_string_errors() {
    for qs in ["interval=1", "interval=20145", "start=2013&end=1", "start=x&end=2014"] {
        let err = resolve_timespan_at(&query(qs), anchor()).unwrap_err();
        assert!(matches!(err, TimespanError::InvalidFormat(_)), "{qs}: got {err}");
    }
}

#[test]
fn test_query_string_missing_parameters() {
    for qs in ["", "start=2013", "end=2014", "interval=", "range=last7days"] {
        let err = resolve_timespan_at(&query(qs), anchor()).unwrap_err();
        assert_eq!(err, TimespanError::MissingParameters, "{qs}");
    }
}

#[test]
fn test_unescaped_plus_is_invalid() {
    // Form decoding turns a bare '+' into a space, which no grammar accepts.
    let err = resolve_timespan_at(&query("interval=+1h"), anchor()).unwrap_err();
    assert!(matches!(err, TimespanError::InvalidFormat(_)), "got: {err}");

    let span = resolve_timespan_at(&query("interval=%2B1h"), anchor()).unwrap();
    assert_eq!(span.start, anchor());
    assert_eq!(span.end, anchor() + Duration::hours(1));
}

#[test]
fn test_request_struct_from_json() {
    let request: TimespanRequest =
        serde_json::from_str(r#"{"start": "201405", "end": "20140526"}"#).unwrap();
    let span = resolve_timespan_at(&request, anchor()).unwrap();
    assert_eq!(span.start, utc(2014, 5, 1, 0, 0, 0));
    assert_eq!(span.end, utc(2014, 5, 26, 23, 59, 59));
}
