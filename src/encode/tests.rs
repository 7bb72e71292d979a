// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::*;
use chrono::TimeZone;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn encode_primitives() {
    assert_eq!(string("maple"), json!("maple"));
    assert_eq!(char('a'), json!("a"));
    assert_eq!(bool(true), json!(true));
    assert_eq!(nil(), Json::Null);
    assert_eq!(unit(), Json::Null);
    assert_eq!(i8(-4), json!(-4));
    assert_eq!(u8(255), json!(255));
    assert_eq!(i16(-300), json!(-300));
    assert_eq!(u16(1000), json!(1000));
    assert_eq!(i32(12), json!(12));
    assert_eq!(u32(12), json!(12));
}

#[test]
fn wide_numbers_encode_as_strings() {
    assert_eq!(i64(86), json!("86"));
    assert_eq!(u64(u64::MAX), json!("18446744073709551615"));
    assert_eq!(
        bigint(&"123456789123456789".parse::<BigInt>().unwrap()),
        json!("123456789123456789")
    );
    assert_eq!(
        decimal(&"0.7833".parse::<Decimal>().unwrap()),
        json!("0.7833")
    );
}

#[test]
fn floats_encode_as_numbers() {
    assert_eq!(f64(1.5), json!(1.5));
    assert_eq!(f32(0.25), json!(0.25));
}

#[test]
fn non_finite_floats_encode_as_null() {
    assert_eq!(f64(f64::NAN), Json::Null);
    assert_eq!(f64(f64::INFINITY), Json::Null);
    assert_eq!(f64(f64::NEG_INFINITY), Json::Null);
    assert_eq!(f32(f32::NAN), Json::Null);
}

#[test]
fn encode_uuid() {
    let id = "d178f8a1-02b7-4a91-9c8f-e9ad8e8e2f6f".parse::<Uuid>().unwrap();
    assert_eq!(uuid(&id), json!("d178f8a1-02b7-4a91-9c8f-e9ad8e8e2f6f"));
}

#[test]
fn encode_dates() {
    let dt = Utc.with_ymd_and_hms(2018, 10, 1, 11, 12, 55).unwrap();
    assert_eq!(datetime(&dt), json!("2018-10-01T11:12:55Z"));

    let offset = FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2018, 10, 1, 11, 12, 55)
        .unwrap();
    assert_eq!(datetime_offset(&offset), json!("2018-10-01T11:12:55+02:00"));

    assert_eq!(
        datetime_local(&dt.naive_utc()),
        json!("2018-10-01T11:12:55")
    );
}

#[test]
fn encode_timespan() {
    assert_eq!(
        timespan(&(TimeDelta::hours(23) + TimeDelta::minutes(45))),
        json!("23:45:00")
    );
}

#[test]
fn object_preserves_pair_order() {
    let encoded = object(vec![
        ("b".to_string(), i32(1)),
        ("a".to_string(), i32(2)),
        ("c".to_string(), i32(3)),
    ]);
    assert_eq!(to_string(0, &encoded), r#"{"b":1,"a":2,"c":3}"#);
}

#[test]
fn encode_collections() {
    assert_eq!(array(vec![i32(1), i32(2)]), json!([1, 2]));
    assert_eq!(list(vec![bool(true)]), json!([true]));
    assert_eq!(seq((0..3).map(i32)), json!([0, 1, 2]));

    let entries: BTreeMap<String, Json> =
        vec![("a".to_string(), i32(1))].into_iter().collect();
    assert_eq!(dict(entries), json!({"a": 1}));
}

#[test]
fn encode_option() {
    assert_eq!(option(|n: &i32| i32(*n), &Some(3)), json!(3));
    assert_eq!(option(|n: &i32| i32(*n), &None), Json::Null);
}

#[test]
fn encode_tuples() {
    assert_eq!(
        tuple2(|n: &i32| i32(*n), |s: &String| string(s), &(1, "x".to_string())),
        json!([1, "x"])
    );
    assert_eq!(
        tuple3(
            |n: &i32| i32(*n),
            |n: &i32| i32(*n),
            |n: &i32| i32(*n),
            &(1, 2, 3)
        ),
        json!([1, 2, 3])
    );
}

#[test]
fn encode_map_as_pair_array() {
    let entries: BTreeMap<i32, String> =
        vec![(1, "one".to_string()), (2, "two".to_string())].into_iter().collect();
    assert_eq!(
        map(|k: &i32| i32(*k), |v: &String| string(v), &entries),
        json!([[1, "one"], [2, "two"]])
    );
}

#[test]
fn to_string_compact_and_indented() {
    let value = json!({"a": [1, 2]});
    assert_eq!(to_string(0, &value), r#"{"a":[1,2]}"#);
    assert_eq!(
        to_string(4, &value),
        "{\n    \"a\": [\n        1,\n        2\n    ]\n}"
    );
    assert!(!to_string(2, &value).contains('\r'));
}

#[test]
fn encoder_wrapper_applies_its_function() {
    let enc = Encoder::new(|n: &i32| i32(*n));
    assert_eq!(enc.encode(&9), json!(9));
    assert_eq!(enc.clone().encode(&9), json!(9));
}
