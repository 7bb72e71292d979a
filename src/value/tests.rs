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
use serde_json::json;

#[test]
fn kinds() {
    assert_eq!(kind_of(&Json::Null), JsonKind::Null);
    assert_eq!(kind_of(&json!(true)), JsonKind::Bool);
    assert_eq!(kind_of(&json!(3)), JsonKind::Number);
    assert_eq!(kind_of(&json!(3.5)), JsonKind::Number);
    assert_eq!(kind_of(&json!("text")), JsonKind::String);
    assert_eq!(kind_of(&json!([1, 2])), JsonKind::Array);
    assert_eq!(kind_of(&json!({"a": 1})), JsonKind::Object);
}

#[test]
fn integer_extraction_in_range() {
    assert_eq!(try_integer::<i8>(&json!(100)), Some(100i8));
    assert_eq!(try_integer::<i8>(&json!(-128)), Some(-128i8));
    assert_eq!(try_integer::<u8>(&json!(255)), Some(255u8));
    assert_eq!(try_integer::<i64>(&json!(i64::MIN)), Some(i64::MIN));
    assert_eq!(try_integer::<u64>(&json!(u64::MAX)), Some(u64::MAX));
}

#[test]
fn integer_extraction_out_of_range() {
    assert_eq!(try_integer::<i8>(&json!(128)), None);
    assert_eq!(try_integer::<u8>(&json!(-1)), None);
    assert_eq!(try_integer::<u32>(&json!(4294967296i64)), None);
    assert_eq!(try_integer::<i64>(&json!(u64::MAX)), None);
}

#[test]
fn integer_extraction_rejects_floats() {
    assert_eq!(try_integer::<i32>(&json!(1.5)), None);
    assert_eq!(try_integer::<i32>(&json!(2.0)), None);
    assert_eq!(try_integer::<i32>(&json!("3")), None);
}

#[test]
fn object_access() {
    let value = json!({"first": 1, "second": null});
    assert_eq!(field_of(&value, "first"), Some(&json!(1)));
    assert_eq!(field_of(&value, "second"), Some(&Json::Null));
    assert_eq!(field_of(&value, "third"), None);
    assert_eq!(field_of(&json!(4), "first"), None);

    let keys = entries(&value)
        .expect("an object")
        .map(|(k, _)| k)
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["first", "second"]);
}

#[test]
fn parse_and_print() {
    let value = parse_str(r#"{"a": [1, 2]}"#).expect("valid JSON");
    assert_eq!(value, json!({"a": [1, 2]}));
    assert_eq!(print(&value), r#"{"a":[1,2]}"#);
    assert!(parse_str("{oops").is_err());
}

#[test]
fn print_indented_uses_requested_indent() {
    let value = json!({"a": 1});
    assert_eq!(print_indented(4, &value), "{\n    \"a\": 1\n}");
    assert_eq!(print_indented(2, &value), "{\n  \"a\": 1\n}");
    assert_eq!(print_indented(4, &json!(5)), "5");
}
