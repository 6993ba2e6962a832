//! Weighted similarity scoring between canonical field names and raw column labels.
//!
//! Scores are integers on a 0-100 scale. The weighting favours substring
//! matches when one side is much longer than the other, so `date` scores high
//! against `txn_date` while `debit` stays low against `credit`.

use std::collections::BTreeSet;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// Best overall score between two strings, 0 when either is empty after preprocessing.
pub fn weighted_ratio(query: &str, choice: &str) -> u8 {
    let query = preprocess(query);
    let choice = preprocess(choice);

    if query.is_empty() || choice.is_empty() {
        return 0;
    }

    let base = ratio(&query, &choice) as f64;

    let query_len = query.chars().count() as f64;
    let choice_len = choice.chars().count() as f64;
    let length_ratio = query_len.max(choice_len) / query_len.min(choice_len);

    let best = if length_ratio < 1.5 {
        let token_sort = token_sort_ratio(&query, &choice, ratio) as f64 * UNBASE_SCALE;
        let token_set = token_set_ratio(&query, &choice, ratio) as f64 * UNBASE_SCALE;

        base.max(token_sort).max(token_set)
    } else {
        let scale = if length_ratio > 8.0 { LONG_PARTIAL_SCALE } else { PARTIAL_SCALE };
        let partial = partial_ratio(&query, &choice) as f64 * scale;
        let partial_sort = token_sort_ratio(&query, &choice, partial_ratio) as f64 * UNBASE_SCALE * scale;
        let partial_set = token_set_ratio(&query, &choice, partial_ratio) as f64 * UNBASE_SCALE * scale;

        base.max(partial).max(partial_sort).max(partial_set)
    };

    best.round() as u8
}

/// Lower-cases and replaces everything except letters, digits and `_` with spaces.
fn preprocess(value: &str) -> String {
    value.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Indel similarity: `2 * lcs / (len_a + len_b)`, scaled to 0-100.
fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    char_ratio(&a, &b)
}

fn char_ratio(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();

    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let matches = 2 * longest_common_subsequence(a, b);

    (100.0 * matches as f64 / total as f64).round() as u8
}

/// Best ratio of the shorter string against every equally long window of the longer one.
fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };

    if shorter.is_empty() {
        return 0;
    }

    let mut best = 0;

    for window in longer.windows(shorter.len()) {
        best = best.max(char_ratio(shorter, window));

        if best == 100 {
            break;
        }
    }

    best
}

fn token_sort_ratio(a: &str, b: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    scorer(&sorted_tokens(a), &sorted_tokens(b))
}

fn token_set_ratio(a: &str, b: &str, scorer: fn(&str, &str) -> u8) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = join(tokens_a.intersection(&tokens_b).copied());
    let only_a = join(tokens_a.difference(&tokens_b).copied());
    let only_b = join(tokens_b.difference(&tokens_a).copied());

    let combined_a = format!("{intersection} {only_a}").trim().to_string();
    let combined_b = format!("{intersection} {only_b}").trim().to_string();

    [
        scorer(&intersection, &combined_a),
        scorer(&intersection, &combined_b),
        scorer(&combined_a, &combined_b)
    ].into_iter().max().unwrap_or(0)
}

fn sorted_tokens(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for &left in a {
        for (j, &right) in b.iter().enumerate() {
            current[j + 1] = if left == right {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }

        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
