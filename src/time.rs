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

//! Duration formatting for the `timespan` coders.
//!
//! The wire form is `[-][d.]hh:mm:ss[.fffffff]`. The fractional part is
//! written with seven digits (hundreds of nanoseconds), extended to nine when
//! the duration has precision below that.

use chrono::TimeDelta;

pub(crate) fn format_timespan(delta: &TimeDelta) -> String {
    let total_seconds = delta.num_seconds();
    let nanos = delta.subsec_nanos();
    let negative = total_seconds < 0 || nanos < 0;
    let total_seconds = total_seconds.unsigned_abs();
    let nanos = nanos.unsigned_abs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds / 3_600) % 24;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        out.push_str(&days.to_string());
        out.push('.');
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if nanos > 0 {
        if nanos % 100 == 0 {
            out.push_str(&format!(".{:07}", nanos / 100));
        } else {
            out.push_str(&format!(".{:09}", nanos));
        }
    }
    out
}

pub(crate) fn parse_timespan(text: &str) -> Option<TimeDelta> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut parts = rest.split(':');
    let first = parts.next()?;
    let minutes_part = parts.next()?;
    let seconds_part = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (days, hours_part) = match first.split_once('.') {
        Some((days, hours)) => (parse_component(days)?, hours),
        None => (0, first),
    };
    let hours = parse_component(hours_part)?;
    let minutes = parse_component(minutes_part)?;
    let (seconds_text, fraction) = match seconds_part.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (seconds_part, None),
    };
    let seconds = parse_component(seconds_text)?;
    if minutes > 59 || seconds > 59 {
        return None;
    }

    let nanos = match fraction {
        Some(digits) => {
            if digits.is_empty() || digits.len() > 9 || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return None;
            }
            format!("{:0<9}", digits).parse::<i64>().ok()?
        }
        None => 0,
    };

    let total = TimeDelta::try_days(days)?
        + TimeDelta::try_hours(hours)?
        + TimeDelta::try_minutes(minutes)?
        + TimeDelta::try_seconds(seconds)?
        + TimeDelta::nanoseconds(nanos);
    Some(if negative { -total } else { total })
}

fn parse_component(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_seconds() {
        assert_eq!(format_timespan(&TimeDelta::seconds(0)), "00:00:00");
        assert_eq!(
            format_timespan(&(TimeDelta::hours(2) + TimeDelta::minutes(3) + TimeDelta::seconds(4))),
            "02:03:04"
        );
    }

    #[test]
    fn formats_days_and_fractions() {
        let delta = TimeDelta::days(1)
            + TimeDelta::hours(2)
            + TimeDelta::minutes(3)
            + TimeDelta::seconds(4)
            + TimeDelta::milliseconds(500);
        assert_eq!(format_timespan(&delta), "1.02:03:04.5000000");
    }

    #[test]
    fn formats_negative_durations() {
        assert_eq!(format_timespan(&TimeDelta::seconds(-61)), "-00:01:01");
        assert_eq!(
            format_timespan(&TimeDelta::milliseconds(-1500)),
            "-00:00:01.5000000"
        );
    }

    #[test]
    fn parses_what_it_formats() {
        let cases = vec![
            TimeDelta::zero(),
            TimeDelta::seconds(59),
            TimeDelta::hours(23) + TimeDelta::minutes(59) + TimeDelta::seconds(59),
            TimeDelta::days(4) + TimeDelta::milliseconds(250),
            TimeDelta::nanoseconds(-1234),
            TimeDelta::seconds(-86_401),
        ];
        for delta in cases {
            let text = format_timespan(&delta);
            assert_eq!(parse_timespan(&text), Some(delta), "case {}", text);
        }
    }

    #[test]
    fn rejects_malformed_durations() {
        assert_eq!(parse_timespan(""), None);
        assert_eq!(parse_timespan("12:34"), None);
        assert_eq!(parse_timespan("00:60:00"), None);
        assert_eq!(parse_timespan("00:00:60"), None);
        assert_eq!(parse_timespan("aa:00:00"), None);
        assert_eq!(parse_timespan("00:00:00."), None);
        assert_eq!(parse_timespan("00:-1:00"), None);
    }
}
