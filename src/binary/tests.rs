//! Search behaviour tests against hand-built database images.

use super::fixture::DatBuilder;
use super::format::*;
use super::reader::CarrierDatabase;
use super::search::{bucket_range, find_record, search};
use crate::{Carrier, Error, Lookup};

const MOBILE: i32 = Carrier::MOBILE_CODE;
const TELECOM: i32 = Carrier::TELECOM_CODE;
const UNICOM: i32 = Carrier::UNICOM_CODE;

fn open(builder: DatBuilder) -> CarrierDatabase {
    CarrierDatabase::from_bytes(builder.build()).expect("Failed to open database")
}

fn code_for(i: usize) -> i32 {
    match i % 3 {
        0 => MOBILE,
        1 => TELECOM,
        _ => UNICOM,
    }
}

/// 10.i.0.0 - 10.i.0.255 for i in 0..count, leaving 10.i.1.0+ as gaps.
fn dense_bucket(count: usize) -> DatBuilder {
    let mut builder = DatBuilder::new().range([9, 0, 0, 0], [9, 255, 255, 255], MOBILE);
    for i in 0..count {
        let b = i as u8;
        builder = builder.range([10, b, 0, 0], [10, b, 0, 255], code_for(i));
    }
    builder.range([11, 0, 0, 0], [11, 0, 0, 0], TELECOM)
}

// ============================================================================
// Bucket Tests
// ============================================================================

#[test]
fn test_single_record_scenario() {
    let db = open(DatBuilder::new().range([1, 0, 0, 0], [1, 0, 0, 255], MOBILE));

    assert_eq!(db.lookup("1.0.0.128").unwrap(), Lookup::Carrier(Carrier::Mobile));
    assert_eq!(db.lookup("1.0.1.0").unwrap(), Lookup::Unknown);
    assert_eq!(db.lookup("2.0.0.0").unwrap(), Lookup::Unknown);
}

#[test]
fn test_single_record_with_next_bucket() {
    let db = open(
        DatBuilder::new()
            .range([1, 0, 0, 0], [1, 0, 0, 255], MOBILE)
            .range([2, 0, 0, 0], [2, 0, 0, 9], TELECOM),
    );

    assert_eq!(db.bucket_range(1).unwrap(), Some(0..1));
    assert_eq!(db.lookup("1.0.0.128").unwrap(), Lookup::Carrier(Carrier::Mobile));
    assert_eq!(db.lookup("1.0.1.0").unwrap(), Lookup::Unknown);
    assert_eq!(db.lookup("2.0.0.0").unwrap(), Lookup::Carrier(Carrier::Telecom));
    assert_eq!(db.lookup("2.0.0.10").unwrap(), Lookup::Unknown);
}

#[test]
fn test_empty_octet_is_unknown() {
    let db = open(dense_bucket(16));

    for addr in ["0.0.0.0", "8.255.255.255", "12.0.0.1", "200.1.2.3", "255.255.255.255"] {
        assert_eq!(db.lookup(addr).unwrap(), Lookup::Unknown, "{}", addr);
    }
}

#[test]
fn test_bucket_upper_bound_skips_empty_octets() {
    let data = DatBuilder::new()
        .range([3, 0, 0, 0], [3, 0, 0, 1], MOBILE)
        .range([3, 1, 0, 0], [3, 1, 0, 1], MOBILE)
        .range([7, 0, 0, 0], [7, 0, 0, 1], UNICOM)
        .build();

    assert_eq!(bucket_range(&data, 3).unwrap(), Some(0..2));
    assert_eq!(bucket_range(&data, 7).unwrap(), Some(2..3));
    assert_eq!(bucket_range(&data, 4).unwrap(), None);
}

#[test]
fn test_last_octets_use_end_of_table() {
    let db = open(
        DatBuilder::new()
            .range([0, 0, 0, 0], [0, 255, 255, 255], TELECOM)
            .range([255, 0, 0, 0], [255, 0, 0, 255], UNICOM)
            .range([255, 255, 255, 0], [255, 255, 255, 255], MOBILE),
    );

    assert_eq!(db.bucket_range(255).unwrap(), Some(1..3));
    assert_eq!(db.lookup("0.0.0.0").unwrap(), Lookup::Carrier(Carrier::Telecom));
    assert_eq!(db.lookup("255.0.0.7").unwrap(), Lookup::Carrier(Carrier::Unicom));
    assert_eq!(
        db.lookup("255.255.255.255").unwrap(),
        Lookup::Carrier(Carrier::Mobile)
    );
    assert_eq!(db.lookup("255.128.0.0").unwrap(), Lookup::Unknown);
}

// ============================================================================
// Range Containment Tests
// ============================================================================

#[test]
fn test_boundaries_are_inclusive() {
    let count = 200;
    let db = open(dense_bucket(count));

    for i in 0..count {
        let b = i as u8;
        let expected = Lookup::from_code(code_for(i));
        assert_eq!(db.lookup_octets([10, b, 0, 0]).unwrap(), expected, "start {}", i);
        assert_eq!(db.lookup_octets([10, b, 0, 255]).unwrap(), expected, "end {}", i);
    }
}

#[test]
fn test_interior_points_agree() {
    let db = open(dense_bucket(64));

    for i in 0..64u8 {
        let first = db.lookup_octets([10, i, 0, 1]).unwrap();
        for last in [2u8, 77, 128, 254] {
            assert_eq!(db.lookup_octets([10, i, 0, last]).unwrap(), first);
        }
        assert!(!first.is_unknown());
    }
}

#[test]
fn test_gaps_are_unknown() {
    let db = open(dense_bucket(100));

    for i in 0..100u8 {
        assert_eq!(db.lookup_octets([10, i, 1, 0]).unwrap(), Lookup::Unknown);
        assert_eq!(db.lookup_octets([10, i, 255, 255]).unwrap(), Lookup::Unknown);
    }
    // Past the last range of the bucket
    assert_eq!(db.lookup_octets([10, 200, 0, 0]).unwrap(), Lookup::Unknown);
}

#[test]
fn test_neighbouring_buckets_unaffected() {
    let db = open(dense_bucket(50));

    assert_eq!(db.lookup("9.128.0.1").unwrap(), Lookup::Carrier(Carrier::Mobile));
    assert_eq!(db.lookup("11.0.0.0").unwrap(), Lookup::Carrier(Carrier::Telecom));
    assert_eq!(db.lookup("11.0.0.1").unwrap(), Lookup::Unknown);
}

#[test]
fn test_byte_order_comparison() {
    // Ranges that would sort differently if read as little-endian integers.
    let db = open(
        DatBuilder::new()
            .range([20, 0, 0, 255], [20, 0, 1, 0], MOBILE)
            .range([20, 1, 0, 0], [20, 1, 0, 0], TELECOM)
            .range([20, 255, 0, 0], [20, 255, 255, 0], UNICOM),
    );

    assert_eq!(db.lookup("20.0.0.255").unwrap(), Lookup::Carrier(Carrier::Mobile));
    assert_eq!(db.lookup("20.0.1.0").unwrap(), Lookup::Carrier(Carrier::Mobile));
    assert_eq!(db.lookup("20.0.1.1").unwrap(), Lookup::Unknown);
    assert_eq!(db.lookup("20.1.0.0").unwrap(), Lookup::Carrier(Carrier::Telecom));
    assert_eq!(db.lookup("20.255.128.0").unwrap(), Lookup::Carrier(Carrier::Unicom));
}

// ============================================================================
// Tie-break Tests
// ============================================================================

#[test]
fn test_lower_bound_wins_on_overlap() {
    // Overlapping records: the lower bound is checked first.
    let data = DatBuilder::new()
        .range([1, 0, 0, 0], [1, 0, 0, 10], MOBILE)
        .range([1, 0, 0, 5], [1, 0, 0, 20], TELECOM)
        .build();

    assert_eq!(find_record(&data, [1, 0, 0, 7]).unwrap(), Some(0));
    assert_eq!(find_record(&data, [1, 0, 0, 15]).unwrap(), Some(1));
}

#[test]
fn test_upper_bound_checked_before_midpoint() {
    // Record 2 heads bucket 2 but its range also covers 1.0.0.15+, which
    // record 1 covers too. The exclusive upper bound is probed before the
    // midpoint, so record 2 is reported.
    let data = DatBuilder::new()
        .range([1, 0, 0, 0], [1, 0, 0, 9], MOBILE)
        .range([1, 0, 0, 10], [1, 0, 0, 19], TELECOM)
        .range([1, 0, 0, 15], [2, 0, 0, 255], UNICOM)
        .index(2, 2)
        .build();

    assert_eq!(bucket_range(&data, 1).unwrap(), Some(0..2));
    assert_eq!(find_record(&data, [1, 0, 0, 16]).unwrap(), Some(2));
    assert_eq!(search(&data, [1, 0, 0, 16]).unwrap(), Lookup::Carrier(Carrier::Unicom));
    assert_eq!(find_record(&data, [1, 0, 0, 12]).unwrap(), Some(1));
    assert_eq!(find_record(&data, [1, 0, 0, 3]).unwrap(), Some(0));
}

// ============================================================================
// Carrier Code Tests
// ============================================================================

#[test]
fn test_all_known_codes() {
    let db = open(
        DatBuilder::new()
            .range([30, 0, 0, 0], [30, 0, 0, 255], MOBILE)
            .range([30, 0, 1, 0], [30, 0, 1, 255], TELECOM)
            .range([30, 0, 2, 0], [30, 0, 2, 255], UNICOM),
    );

    assert_eq!(db.lookup("30.0.0.1").unwrap().label(), Some("中国移动"));
    assert_eq!(db.lookup("30.0.1.1").unwrap().label(), Some("中国电信"));
    assert_eq!(db.lookup("30.0.2.1").unwrap().label(), Some("中国联通"));
    assert_eq!(db.lookup("30.0.3.1").unwrap().label(), Some("未知"));
}

#[test]
fn test_unmapped_code_is_not_unknown() {
    let db = open(
        DatBuilder::new()
            .range([40, 0, 0, 0], [40, 0, 0, 255], 100099)
            .range([40, 0, 1, 0], [40, 0, 1, 255], -1),
    );

    assert_eq!(db.lookup("40.0.0.1").unwrap(), Lookup::Unmapped(100099));
    assert_eq!(db.lookup("40.0.1.1").unwrap(), Lookup::Unmapped(-1));
    assert_eq!(db.lookup("40.0.2.1").unwrap(), Lookup::Unknown);
}

// ============================================================================
// Auxiliary Data and Corruption Tests
// ============================================================================

#[test]
fn test_aux_data_is_ignored_by_earlier_buckets() {
    let db = open(
        DatBuilder::new()
            .range([5, 0, 0, 0], [5, 0, 0, 255], MOBILE)
            .range([6, 0, 0, 0], [6, 0, 0, 255], UNICOM)
            .aux(&[0xAB; 45]),
    );

    // Partial trailing record slots are not counted.
    assert_eq!(db.record_count().unwrap(), 4);
    assert_eq!(db.lookup("5.0.0.1").unwrap(), Lookup::Carrier(Carrier::Mobile));
    assert_eq!(db.lookup("6.0.0.255").unwrap(), Lookup::Carrier(Carrier::Unicom));
    assert_eq!(db.lookup("7.0.0.1").unwrap(), Lookup::Unknown);
}

#[test]
fn test_negative_index_entry_rejected() {
    let data = DatBuilder::new()
        .range([1, 0, 0, 0], [1, 0, 0, 255], MOBILE)
        .index(1, -5)
        .build();

    assert!(matches!(
        search(&data, [1, 0, 0, 1]),
        Err(Error::InvalidIndex { octet: 1, value: -5 })
    ));
}

#[test]
fn test_upper_bound_past_table_rejected() {
    let data = DatBuilder::new()
        .range([1, 0, 0, 0], [1, 0, 0, 255], MOBILE)
        .index(9, 500)
        .build();

    assert!(matches!(
        search(&data, [1, 0, 0, 1]),
        Err(Error::InvalidIndex { octet: 9, value: 500 })
    ));
    // Buckets after the bad entry are unaffected.
    assert_eq!(search(&data, [10, 0, 0, 1]).unwrap(), Lookup::Unknown);
}

#[test]
fn test_lower_bound_past_upper_is_unknown() {
    let data = DatBuilder::new()
        .range([1, 0, 0, 0], [1, 0, 0, 255], MOBILE)
        .range([2, 0, 0, 0], [2, 0, 0, 255], MOBILE)
        .index(1, 1)
        .index(2, 0)
        .build();

    assert_eq!(find_record(&data, [1, 0, 0, 1]).unwrap(), None);
}

#[test]
fn test_truncated_table_fails_instead_of_reading_past_end() {
    let mut data = DatBuilder::new()
        .range([1, 0, 0, 0], [1, 0, 0, 255], MOBILE)
        .range([1, 0, 1, 0], [1, 0, 1, 255], MOBILE)
        .range([1, 0, 2, 0], [1, 0, 2, 255], MOBILE)
        .index(2, 3)
        .build();
    // Chop the last record; index entry 2 now points past the table.
    data.truncate(HEADER_SIZE + 2 * RECORD_SIZE + 10);

    assert!(matches!(
        search(&data, [1, 0, 2, 1]),
        Err(Error::InvalidIndex { octet: 2, value: 3 })
    ));
}

#[test]
fn test_search_on_short_buffer_is_corrupt() {
    let data = vec![0xFFu8; 100];
    assert!(matches!(search(&data, [200, 2, 3, 4]), Err(Error::Corrupt { .. })));
}
