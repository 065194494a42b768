//! Sibling ordering
//!
//! Branches come before leaves. Within each group, names compare in natural
//! order at primary strength: case and accents are ignored (`"Água"` sorts
//! with `"agua"`, before `"Bomba"`), and runs of digits compare by numeric
//! value so that `"Item 2"` sorts before `"Item 10"`. Whitespace sorts before
//! punctuation, punctuation before digits, digits before letters. The sort is
//! stable, so siblings that compare equal keep their construction order.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::forest::TreeNode;

/// Sort one sibling sequence in place: branches first, then by natural name order.
pub fn sort_forest(siblings: &mut [TreeNode]) {
    siblings.sort_by_cached_key(|node| {
        (
            !node.has_children(),
            collation_key(node.attributes.display_name()),
        )
    });
}

/// Case- and accent-insensitive, numeric-aware comparison of two names.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// One collation element. Variant order is the primary order between classes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Element {
    Space,
    Punctuation(char),
    /// Digit run without leading zeros; longer runs are larger numbers.
    Number { len: usize, digits: String },
    Letter(char),
}

fn collation_key(name: &str) -> Vec<Element> {
    let mut key = Vec::new();
    // NFKD splits accented letters into base + combining mark, then the marks are dropped
    let mut chars = name.nfkd().filter(|c| !is_combining_mark(*c)).peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut run = String::from(c);
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                run.push(d);
            }
            let digits = run.trim_start_matches('0').to_string();
            key.push(Element::Number {
                len: digits.len(),
                digits,
            });
        } else if c.is_whitespace() {
            key.push(Element::Space);
        } else if c.is_alphanumeric() {
            key.extend(c.to_lowercase().map(Element::Letter));
        } else {
            key.push(Element::Punctuation(c));
        }
    }

    key
}
