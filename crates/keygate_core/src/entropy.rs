use std::collections::HashMap;

/// Calculates Shannon entropy in bits per character.
///
/// The distribution is taken over characters, not bytes, so multi-byte
/// code points count once. Returns 0.0 for the empty string.
///
/// Typical values:
/// - < 2.5: placeholder-like (e.g. "EXAMPLE", "xxxxxxxx")
/// - 2.5 - 3.5: suspicious but often legitimate identifiers
/// - >= 3.5: likely generated material (keys, tokens)
#[must_use]
pub fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, u32> = HashMap::new();
    let mut char_count: u32 = 0;

    for ch in s.chars() {
        *freq.entry(ch).or_insert(0) += 1;
        char_count += 1;
    }

    let len = f64::from(char_count);

    freq.values()
        .map(|&count| {
            let p = f64::from(count) / len;
            -p * p.log2()
        })
        .sum()
}

/// Returns `true` if `s` is at least `min_length` characters long and its
/// entropy meets `threshold`.
#[must_use]
pub fn is_high_entropy(s: &str, threshold: f64, min_length: usize) -> bool {
    if s.chars().count() < min_length {
        return false;
    }
    shannon_entropy(s) >= threshold
}
