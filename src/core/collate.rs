//! Prefix collation used to order the result mapping.
//!
//! Three levels, in order:
//! 1. Case-insensitive: compare the Unicode-lowercased strings, ranking
//!    punctuation and symbols below digits and digits below letters.
//! 2. Case: at the first char that differs only by case, lowercase first.
//! 3. Raw byte order, so distinct strings never compare equal.
//!
//! Names made of letters, digits and `_`/`-` order the way root-locale
//! collation orders them, e.g. `apple < Banana < banana2`, `a < A` and
//! `medical_ai < medical2`. Punctuation marks compare by code point among
//! themselves, which root locale does not.

use std::cmp::Ordering;

/// Primary weight: character class, then the char itself.
fn weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c)
}

fn folded(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.chars().flat_map(char::to_lowercase).map(weight)
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return Ordering::Equal,
        }
    }
    Ordering::Equal
}

/// Total order over addon prefixes.
pub fn compare_prefixes(a: &str, b: &str) -> Ordering {
    folded(a)
        .cmp(folded(b))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut v: Vec<&str>) -> Vec<&str> {
        v.sort_by(|a, b| compare_prefixes(a, b));
        v
    }

    #[test]
    fn test_case_insensitive_primary_order() {
        assert_eq!(sorted(vec!["Banana", "apple", "cherry"]), vec!["apple", "Banana", "cherry"]);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(sorted(vec!["A", "a"]), vec!["a", "A"]);
        assert_eq!(sorted(vec!["Medical", "medical"]), vec!["medical", "Medical"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(sorted(vec!["medical_ai", "medical"]), vec!["medical", "medical_ai"]);
    }

    #[test]
    fn test_punctuation_before_digits_before_letters() {
        assert_eq!(
            sorted(vec!["medical2", "medicala", "medical_ai"]),
            vec!["medical_ai", "medical2", "medicala"]
        );
        assert_eq!(sorted(vec!["x9", "x-y", "xa"]), vec!["x-y", "x9", "xa"]);
    }

    #[test]
    fn test_byte_order_differs() {
        // Plain byte order would put "Zeus" before "advanced_ballistics"
        assert_eq!(
            sorted(vec!["Zeus", "advanced_ballistics"]),
            vec!["advanced_ballistics", "Zeus"]
        );
    }

    #[test]
    fn test_equal_only_for_identical() {
        assert_eq!(compare_prefixes("zeus", "zeus"), Ordering::Equal);
        assert_ne!(compare_prefixes("ß", "SS"), Ordering::Equal);
    }
}
