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
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;

fn run<T: 'static>(dec: &Decoder<T>, text: &str) -> Result<T, String> {
    from_str(dec, text)
}

#[test]
fn decode_string() {
    assert_eq!(run(&string(), "\"maple\""), Ok("maple".to_string()));
    assert!(run(&string(), "12").is_err());
}

#[test]
fn decode_char() {
    assert_eq!(run(&char(), "\"a\""), Ok('a'));
    let err = run(&char(), "\"ab\"").unwrap_err();
    assert!(err.contains("Expecting a single character string"));
}

#[test]
fn decode_bool() {
    assert_eq!(run(&bool(), "true"), Ok(true));
    assert_eq!(run(&bool(), "false"), Ok(false));
    assert!(run(&bool(), "1").is_err());
}

#[test]
fn decode_int() {
    assert_eq!(run(&i32(), "42"), Ok(42));
    assert_eq!(run(&i32(), "-3"), Ok(-3));
    assert_eq!(run(&i32(), "\"42\""), Ok(42));
}

#[test]
fn decode_int_out_of_range() {
    assert_eq!(
        run(&i32(), "99999999999"),
        Err("Error at: `$`\nExpecting an int but instead got: 99999999999\n\
             Reason: Value was either too large or too small for an int"
            .to_string())
    );
}

#[test]
fn decode_int_rejects_floats() {
    assert_eq!(
        run(&i32(), "3.5"),
        Err("Error at: `$`\nExpecting an int but instead got: 3.5\n\
             Reason: Value is not an integral value"
            .to_string())
    );
}

#[test]
fn decode_integer_widths() {
    assert_eq!(run(&i8(), "-128"), Ok(-128i8));
    assert!(run(&i8(), "128").is_err());
    assert_eq!(run(&u8(), "255"), Ok(255u8));
    assert!(run(&u8(), "-1").is_err());
    assert_eq!(run(&i16(), "-32768"), Ok(-32768i16));
    assert_eq!(run(&u16(), "65535"), Ok(65535u16));
    assert_eq!(run(&u32(), "4294967295"), Ok(4294967295u32));
    assert_eq!(run(&i64(), "\"-9223372036854775808\""), Ok(i64::MIN));
    assert_eq!(run(&u64(), "\"18446744073709551615\""), Ok(u64::MAX));
}

#[test]
fn decode_floats() {
    assert_eq!(run(&f64(), "1.5"), Ok(1.5));
    assert_eq!(run(&f64(), "3"), Ok(3.0));
    assert_eq!(run(&f32(), "0.25"), Ok(0.25f32));
    assert!(run(&f64(), "\"1.5\"").is_err());
}

#[test]
fn decode_decimal() {
    use rust_decimal::Decimal;
    assert_eq!(run(&decimal(), "\"0.7833\""), Ok("0.7833".parse::<Decimal>().unwrap()));
    assert_eq!(run(&decimal(), "10"), Ok(Decimal::from(10)));
    assert!(run(&decimal(), "true").is_err());
}

#[test]
fn decode_bigint() {
    assert_eq!(run(&bigint(), "12"), Ok(BigInt::from(12)));
    assert_eq!(
        run(&bigint(), "\"123456789123456789123456789\""),
        Ok("123456789123456789123456789".parse::<BigInt>().unwrap())
    );
    assert!(run(&bigint(), "1.5").is_err());
}

#[test]
fn decode_uuid() {
    let id = "d178f8a1-02b7-4a91-9c8f-e9ad8e8e2f6f";
    assert_eq!(
        run(&uuid(), &format!("\"{}\"", id)),
        Ok(id.parse::<Uuid>().unwrap())
    );
    let err = run(&uuid(), "\"not-a-guid\"").unwrap_err();
    assert!(err.contains("Expecting a guid"));
}

#[test]
fn decode_unit() {
    assert_eq!(run(&unit(), "null"), Ok(()));
    assert!(run(&unit(), "0").is_err());
}

#[test]
fn decode_datetimes() {
    let expected = Utc
        .from_utc_datetime(
            &NaiveDate::from_ymd_opt(2018, 10, 1)
                .unwrap()
                .and_hms_opt(11, 12, 55)
                .unwrap(),
        );
    assert_eq!(
        run(&datetime_utc(), "\"2018-10-01T11:12:55Z\""),
        Ok(expected)
    );
    assert_eq!(
        run(&datetime_utc(), "\"2018-10-01T12:12:55+01:00\""),
        Ok(expected)
    );
    assert_eq!(
        run(&datetime_local(), "\"2018-10-01T11:12:55\""),
        Ok(expected.naive_utc())
    );
    let offset = run(&datetime_offset(), "\"2018-10-01T11:12:55+02:00\"").unwrap();
    assert_eq!(offset.offset().local_minus_utc(), 7200);
    assert!(run(&datetime_utc(), "\"not a date\"").is_err());
}

#[test]
fn decode_timespan() {
    assert_eq!(
        run(&timespan(), "\"23:45:00\""),
        Ok(TimeDelta::hours(23) + TimeDelta::minutes(45))
    );
    assert!(run(&timespan(), "\"later\"").is_err());
}

#[test]
fn decode_field() {
    let dec = field("name", string());
    assert_eq!(run(&dec, r#"{"name": "ripple"}"#), Ok("ripple".to_string()));

    let err = run(&dec, r#"{"other": 1}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$`\nExpecting an object with a field named `name`"));

    let err = run(&field("a", i32()), r#"{"a": "text"}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$.a`\n"));

    let err = run(&dec, "4").unwrap_err();
    assert!(err.contains("Expecting an object"));
}

#[test]
fn decode_field_present_null_reaches_inner_decoder() {
    let dec = field("name", option(string()));
    assert_eq!(run(&dec, r#"{"name": null}"#), Ok(None));
}

#[test]
fn decode_at() {
    let dec = at(&["a", "b"], i32());
    assert_eq!(run(&dec, r#"{"a": {"b": 3}}"#), Ok(3));

    let err = run(&at(&["a", "b", "c"], i32()), r#"{"a": {"b": null}}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$.a.b`\nExpecting an object with path `a.b.c`"));
    assert!(err.ends_with("Node `c` is unknown."));

    let err = run(&at(&["a", "x"], i32()), r#"{"a": {"b": 1}}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$.a`\n"));
    assert!(err.ends_with("Node `x` is unknown."));
}

#[test]
fn decode_optional() {
    let dec = optional("name", string());
    assert_eq!(run(&dec, "{}"), Ok(None));
    assert_eq!(run(&dec, r#"{"name": null}"#), Ok(None));
    assert_eq!(run(&dec, r#"{"name": "x"}"#), Ok(Some("x".to_string())));

    let err = run(&dec, r#"{"name": 1}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$.name`\nExpecting a string"));

    assert!(run(&dec, "4").is_err());
}

#[test]
fn decode_optional_at() {
    let dec = optional_at(&["a", "b"], i32());
    assert_eq!(run(&dec, r#"{"a": {"b": 4}}"#), Ok(Some(4)));
    assert_eq!(run(&dec, r#"{"a": {}}"#), Ok(None));
    assert_eq!(run(&dec, r#"{"a": null}"#), Ok(None));
    assert_eq!(run(&dec, r#"{"a": {"b": null}}"#), Ok(None));
    assert!(run(&dec, r#"{"a": 5}"#).is_err());
}

#[test]
fn decode_index() {
    let dec = index(1, string());
    assert_eq!(run(&dec, r#"["a", "b"]"#), Ok("b".to_string()));

    let err = run(&index(2, string()), r#"["a"]"#).unwrap_err();
    assert!(err.contains("Need index `2` but there are only `1` entries"));
}

#[test]
fn decode_option() {
    let dec = option(i32());
    assert_eq!(run(&dec, "null"), Ok(None));
    assert_eq!(run(&dec, "5"), Ok(Some(5)));
    assert!(run(&dec, "\"x\"").is_err());
}

#[test]
fn decode_list() {
    assert_eq!(run(&list(i32()), "[1, 2, 3]"), Ok(vec![1, 2, 3]));
    assert_eq!(run(&array(bool()), "[true]"), Ok(vec![true]));

    let err = run(&list(i32()), "[1, \"x\", 3]").unwrap_err();
    assert!(err.starts_with("Error at: `$[1]`\n"));

    let err = run(&list(i32()), "{}").unwrap_err();
    assert!(err.contains("Expecting a list"));
    let err = run(&array(i32()), "{}").unwrap_err();
    assert!(err.contains("Expecting an array"));
}

#[test]
fn decode_keys_in_insertion_order() {
    assert_eq!(
        run(&keys(), r#"{"b": 1, "a": 2, "c": 3}"#),
        Ok(vec!["b".to_string(), "a".to_string(), "c".to_string()])
    );
    assert!(run(&keys(), "[]").is_err());
}

#[test]
fn decode_key_value_pairs() {
    assert_eq!(
        run(&key_value_pairs(i32()), r#"{"a": 1, "b": 2}"#),
        Ok(vec![("a".to_string(), 1), ("b".to_string(), 2)])
    );

    let err = run(&key_value_pairs(i32()), r#"{"a": 1, "b": "x"}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$.b`\n"));
}

#[test]
fn decode_dict() {
    let expected: BTreeMap<String, _> =
        vec![("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
    assert_eq!(run(&dict(i32()), r#"{"a": 1, "b": 2}"#), Ok(expected));
}

#[test]
fn decode_map_pairs() {
    let expected: BTreeMap<_, _> = vec![(1, "one".to_string()), (2, "two".to_string())]
        .into_iter()
        .collect();
    assert_eq!(
        run(&map_pairs(i32(), string()), r#"[[1, "one"], [2, "two"]]"#),
        Ok(expected)
    );
}

#[test]
fn decode_tuples() {
    assert_eq!(
        run(&tuple2(i32(), string()), r#"[1, "x"]"#),
        Ok((1, "x".to_string()))
    );
    assert_eq!(
        run(&tuple3(i32(), i32(), i32()), "[1, 2, 3]"),
        Ok((1, 2, 3))
    );
    // A longer array than the arity decodes from its prefix.
    assert_eq!(run(&tuple2(i32(), i32()), "[1, 2, 3]"), Ok((1, 2)));

    let err = run(&tuple3(i32(), i32(), i32()), "[1, 2]").unwrap_err();
    assert!(err.contains("Need index `2` but there are only `2` entries"));

    let err = run(&tuple2(i32(), string()), r#"[1, 2]"#).unwrap_err();
    assert!(err.starts_with("Error at: `$[1]`\n"));
}

#[test]
fn decode_succeed_and_fail() {
    assert_eq!(run(&succeed(7), "\"anything\""), Ok(7));
    assert_eq!(
        run(&fail::<i32>("bad input"), "1"),
        Err("Error at: `$`\nThe following `failure` occurred with the decoder: bad input"
            .to_string())
    );
}

#[test]
fn decode_value_passthrough() {
    assert_eq!(run(&value(), r#"{"a": 1}"#), Ok(json!({"a": 1})));
}

#[test]
fn decode_nil() {
    assert_eq!(run(&nil(9), "null"), Ok(9));
    assert!(run(&nil(9), "1").is_err());
}

#[test]
fn decoder_map_and_then() {
    let doubled = i32().map(|n| n * 2);
    assert_eq!(run(&doubled, "21"), Ok(42));

    let versioned = field("version", i32()).and_then(|version| match version {
        1 => field("data", string()),
        _ => fail("unsupported version"),
    });
    assert_eq!(
        run(&versioned, r#"{"version": 1, "data": "ok"}"#),
        Ok("ok".to_string())
    );
    assert!(run(&versioned, r#"{"version": 2, "data": "ok"}"#).is_err());
}

#[test]
fn decode_map_combinators() {
    let dec = map2(
        |a, b| (a, b),
        field("a", i32()),
        field("b", string()),
    );
    assert_eq!(
        run(&dec, r#"{"a": 1, "b": "two"}"#),
        Ok((1, "two".to_string()))
    );

    // The first failing decoder in parameter order wins.
    let err = run(
        &map2(|a: i32, b: i32| a + b, field("a", i32()), field("b", i32())),
        r#"{"a": "x", "b": "y"}"#,
    )
    .unwrap_err();
    assert!(err.starts_with("Error at: `$.a`\n"));

    let dec8 = map8(
        |a, b, c, d, e, f, g, h| a + b + c + d + e + f + g + h,
        index(0, i32()),
        index(1, i32()),
        index(2, i32()),
        index(3, i32()),
        index(4, i32()),
        index(5, i32()),
        index(6, i32()),
        index(7, i32()),
    );
    assert_eq!(run(&dec8, "[1, 2, 3, 4, 5, 6, 7, 8]"), Ok(36));
}

#[test]
fn decode_all() {
    let dec = all(vec![index(0, i32()), index(1, i32())]);
    assert_eq!(run(&dec, "[1, 2]"), Ok(vec![1, 2]));
    assert!(run(&all(vec![i32(), fail("nope")]), "1").is_err());
}

#[test]
fn decode_one_of() {
    let dec = one_of(vec![i32(), field("value", i32())]);
    assert_eq!(run(&dec, "5"), Ok(5));
    assert_eq!(run(&dec, r#"{"value": 6}"#), Ok(6));

    let err = run(&one_of(vec![i32(), nil(0)]), "true").unwrap_err();
    assert!(err.starts_with("The following errors were found:\n\n"));
    let first = err.find("Expecting an int").unwrap();
    let second = err.find("Expecting null").unwrap();
    assert!(first < second);
}

#[test]
fn decode_and_map_builder() {
    #[derive(Debug, PartialEq)]
    struct User {
        id: i32,
        name: String,
    }

    let ctor = succeed(Arc::new(|id: i32| {
        Arc::new(move |name: String| User { id, name }) as Arc<dyn Fn(String) -> User + Send + Sync>
    }) as Arc<dyn Fn(i32) -> Arc<dyn Fn(String) -> User + Send + Sync> + Send + Sync>);
    let dec = and_map(field("name", string()), and_map(field("id", i32()), ctor));
    assert_eq!(
        run(&dec, r#"{"id": 4, "name": "finn"}"#),
        Ok(User {
            id: 4,
            name: "finn".to_string()
        })
    );
}

#[test]
fn object_builder_success() {
    #[derive(Debug, PartialEq)]
    struct Record {
        name: String,
        age: i32,
        nickname: Option<String>,
    }

    let dec = object(|g| Record {
        name: g.required_field("name", string()),
        age: g.required_field("age", i32()),
        nickname: g.optional_field("nickname", string()),
    });
    assert_eq!(
        run(&dec, r#"{"name": "ada", "age": 36}"#),
        Ok(Record {
            name: "ada".to_string(),
            age: 36,
            nickname: None
        })
    );
}

#[test]
fn object_builder_single_error_forwards() {
    let dec = object(|g| g.required_field("age", i32()));
    let err = run(&dec, r#"{"name": "ada"}"#).unwrap_err();
    assert!(err.starts_with("Error at: `$`\nExpecting an object with a field named `age`"));
}

#[test]
fn object_builder_aggregates_every_error() {
    let dec = object(|g| {
        (
            g.required_field("a", i32()),
            g.required_field("b", string()),
        )
    });
    let err = run(&dec, r#"{"a": "x"}"#).unwrap_err();
    assert!(err.starts_with("The following errors were found:\n\n"));
    let first = err.find("Error at: `$.a`").unwrap();
    let second = err.find("an object with a field named `b`").unwrap();
    assert!(first < second);
}

#[test]
fn object_builder_requires_an_object() {
    let dec = object(|g| g.required_field("a", i32()));
    let err = run(&dec, "[1]").unwrap_err();
    assert!(err.contains("Expecting an object"));
}

#[test]
fn object_builder_required_at_and_raw() {
    let dec = object(|g| {
        (
            g.required_at(&["outer", "inner"], i32()),
            g.required_raw(keys()),
        )
    });
    assert_eq!(
        run(&dec, r#"{"outer": {"inner": 3}}"#),
        Ok((3, vec!["outer".to_string()]))
    );
}

#[test]
fn object_builder_optional_raw_downgrades_absence() {
    // Missing field: downgraded to None with no recorded error.
    let dec = object(|g| g.optional_raw(field("missing", i32())));
    assert_eq!(run(&dec, "{}"), Ok(None));

    // Null value under a kind mismatch: downgraded.
    let dec = object(|g| g.optional_raw(field("a", i32())));
    assert_eq!(run(&dec, r#"{"a": null}"#), Ok(None));

    // A real mismatch is still an error.
    let dec = object(|g| g.optional_raw(field("a", i32())));
    assert!(run(&dec, r#"{"a": "text"}"#).is_err());
}

#[test]
fn runner_reports_invalid_json() {
    let err = run(&i32(), "{not json").unwrap_err();
    assert!(err.starts_with("Given an invalid JSON: "));
}

#[test]
fn force_from_str_returns_the_value() {
    assert_eq!(force_from_str(&i32(), "3"), 3);
}

#[test]
#[should_panic(expected = "Expecting an int")]
fn force_from_str_panics_on_failure() {
    force_from_str(&i32(), "true");
}
