//! Unit tests for spatial ID parsing and area checks

use crate::validation::spatial_id::*;

fn ids(zoom: u32, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}/0/{}/0", zoom, i)).collect()
}

#[test]
fn test_parse_round_trip() {
    for raw in ["20/0/931176/412938", "1/-3/0/0", "25/12/33554431/0"] {
        let id: SpatialId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    let id = SpatialId::parse("20/-1/931176/412938", ZoomRule::Positive).unwrap();
    assert_eq!(id, SpatialId::new(20, -1, 931176, 412938));
}

#[test]
fn test_segment_count() {
    assert_eq!(
        SpatialId::parse("1/0/1", ZoomRule::Positive),
        Err(ShapeError::SegmentCount { found: 3 })
    );
    assert_eq!(
        SpatialId::parse("", ZoomRule::Positive),
        Err(ShapeError::SegmentCount { found: 1 })
    );
}

#[test]
fn test_trailing_separator_counts_as_fifth_segment() {
    // Empty trailing segments are kept, so exactly four segments means no trailing `/`
    assert_eq!(
        SpatialId::parse("1/0/1/1/", ZoomRule::Positive),
        Err(ShapeError::SegmentCount { found: 5 })
    );
    assert!(SpatialId::parse("1/0/1/1", ZoomRule::Positive).is_ok());
}

#[test]
fn test_malformed_segments() {
    let cases = [
        ("1/a/1/1", Segment::Elevation),
        ("1/+2/1/1", Segment::Elevation),
        ("0/0/1/1", Segment::Zoom),
        ("01/0/1/1", Segment::Zoom),
        ("1/0/-1/1", Segment::X),
        ("1/0/1/1.5", Segment::Y),
        ("1/0/1/", Segment::Y),
    ];

    for (raw, expected) in cases {
        match SpatialId::parse(raw, ZoomRule::Positive) {
            Err(ShapeError::Segment { segment, .. }) => assert_eq!(segment, expected, "{}", raw),
            other => panic!("{} parsed as {:?}", raw, other),
        }
    }
}

#[test]
fn test_zoom_rule() {
    assert!(SpatialId::parse("0/0/0/0", ZoomRule::Positive).is_err());
    assert_eq!(
        SpatialId::parse("0/0/0/0", ZoomRule::NonNegative),
        Ok(SpatialId::new(0, 0, 0, 0))
    );
}

#[test]
fn test_overflow() {
    let err = SpatialId::parse("1/0/999999999999999999999999/0", ZoomRule::Positive).unwrap_err();
    assert!(matches!(err, ShapeError::Overflow { segment: Segment::X, .. }));

    let err = SpatialId::parse("99999999999/0/0/0", ZoomRule::Positive).unwrap_err();
    assert!(matches!(err, ShapeError::Overflow { segment: Segment::Zoom, .. }));
}

#[test]
fn test_absent_values_pass() {
    assert_eq!(parse_and_check_shape(None, ZoomRule::Positive), Ok(None));
    assert!(check_zoom_range(None, 1, 5));
    assert!(check_area_bound(Vec::<String>::new(), 0, 2));
    assert!(check_polygon_area(None, 100));
    assert!(check_minimum_vertices::<String>(None));
    let empty: Vec<String> = Vec::new();
    assert!(check_minimum_vertices(Some(empty.as_slice())));
}

#[test]
fn test_zoom_range() {
    let id = SpatialId::new(10, 0, 0, 0);
    assert!(check_zoom_range(Some(&id), 10, 10));
    assert!(check_zoom_range(Some(&id), 5, 15));
    assert!(!check_zoom_range(Some(&id), 11, 15));
    assert!(!check_zoom_range(Some(&id), 1, 9));
}

#[test]
fn test_area_bound_examples() {
    // 4^2 = 16 cells of zoom 2 per zoom 0 cell
    assert!(!check_area_bound(ids(0, 5), 0, 2));
    assert!(check_area_bound(ids(0, 1), 0, 2));
    assert!(check_area_bound(ids(2, 4), 0, 2));
}

#[test]
fn test_area_bound_equality_is_accepted() {
    assert!(check_area_bound(ids(2, 16), 0, 2));
    assert!(!check_area_bound(ids(2, 17), 0, 2));

    // 3 * 4 + 4 = 16
    let mut mixed = ids(1, 3);
    mixed.extend(ids(2, 4));
    assert!(check_area_bound(&mixed, 0, 2));

    mixed.push("2/0/9/9".to_string());
    assert!(!check_area_bound(&mixed, 0, 2));
}

#[test]
fn test_area_bound_order_independent() {
    let mut mixed = ids(0, 1);
    mixed.extend(ids(2, 1));
    assert!(!check_area_bound(&mixed, 0, 2));

    mixed.reverse();
    assert!(!check_area_bound(&mixed, 0, 2));

    let mut mixed = ids(2, 4);
    mixed.extend(ids(1, 3));
    let forward = check_area_bound(&mixed, 0, 2);
    mixed.reverse();
    assert_eq!(forward, check_area_bound(&mixed, 0, 2));
    mixed.rotate_left(3);
    assert_eq!(forward, check_area_bound(&mixed, 0, 2));
}

#[test]
fn test_area_bound_zoom_outside_bounds() {
    // Coarser than the lower bound can never fit
    assert!(!check_area_bound(ids(0, 1), 1, 2));

    // Finer than the upper bound counts as a fraction of a cell
    assert!(check_area_bound(ids(3, 64), 0, 2));
    assert!(!check_area_bound(ids(3, 65), 0, 2));
}

#[test]
fn test_area_bound_wide_zoom_span() {
    assert!(check_area_bound(ids(0, 1), 0, 60));
    assert!(!check_area_bound(ids(0, 2), 0, 60));
    assert!(check_area_bound(ids(60, 1000), 0, 60));
    assert!(check_area_bound(ids(u32::MAX, 3), 0, 1));
}

#[test]
fn test_area_bound_skips_unreadable_zoom() {
    let mixed = vec!["x/0/0/0".to_string(), "2/0/0/0".to_string()];
    assert!(check_area_bound(&mixed, 0, 2));
}

#[test]
fn test_polygon_area() {
    assert!(check_polygon_area(Some(10.0), 10));
    assert!(check_polygon_area(Some(0.5), 10));
    assert!(!check_polygon_area(Some(10.5), 10));
}

#[test]
fn test_minimum_vertices() {
    let five = vec!["1"; 5];
    let six = vec!["1"; 6];
    assert!(!check_minimum_vertices(Some(five.as_slice())));
    assert!(check_minimum_vertices(Some(six.as_slice())));
}
