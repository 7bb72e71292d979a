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

/// The policy mapping a record field name to its JSON key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseStrategy {
    /// Keep the field name as written.
    #[default]
    PascalCase,
    /// Lower the first letter.
    CamelCase,
    /// Lower the first letter and prefix every other uppercase letter with
    /// an underscore, lowering it.
    SnakeCase,
}

impl CaseStrategy {
    pub fn convert(&self, name: &str) -> String {
        match self {
            CaseStrategy::PascalCase => name.to_string(),
            CaseStrategy::CamelCase => lower_first(name),
            CaseStrategy::SnakeCase => {
                let mut out = String::with_capacity(name.len() + 4);
                let mut chars = name.chars();
                if let Some(first) = chars.next() {
                    out.extend(first.to_lowercase());
                }
                for c in chars {
                    if c.is_uppercase() {
                        out.push('_');
                        out.extend(c.to_lowercase());
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::CaseStrategy;

    #[test]
    fn pascal_is_identity() {
        assert_eq!(CaseStrategy::PascalCase.convert("HorsePower"), "HorsePower");
        assert_eq!(CaseStrategy::PascalCase.convert("x"), "x");
    }

    #[test]
    fn camel_lowers_the_first_letter() {
        assert_eq!(CaseStrategy::CamelCase.convert("HorsePower"), "horsePower");
        assert_eq!(CaseStrategy::CamelCase.convert("Name"), "name");
        assert_eq!(CaseStrategy::CamelCase.convert("already"), "already");
        assert_eq!(CaseStrategy::CamelCase.convert(""), "");
    }

    #[test]
    fn snake_separates_uppercase_letters() {
        assert_eq!(CaseStrategy::SnakeCase.convert("HorsePower"), "horse_power");
        assert_eq!(CaseStrategy::SnakeCase.convert("Name"), "name");
        assert_eq!(CaseStrategy::SnakeCase.convert("ABC"), "a_b_c");
        assert_eq!(CaseStrategy::SnakeCase.convert("plain"), "plain");
    }

    #[test]
    fn default_is_pascal() {
        assert_eq!(CaseStrategy::default(), CaseStrategy::PascalCase);
    }
}
