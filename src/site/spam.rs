//! Spam heuristics for contact form names.
//!
//! Randomly generated bot names tend to be high-entropy, hard to pronounce,
//! oddly cased and long. Each signal adds to a 0-10 score; 6 and above is
//! treated as spam.

use std::collections::HashMap;

const MAX_SCORE: u8 = 10;
const BLOCK_THRESHOLD: u8 = 6;

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Shannon entropy in bits, case-insensitive, over `len` code units
fn shannon_entropy(chars: &[char], len: f64) -> f64 {
    let mut frequencies: HashMap<char, usize> = HashMap::new();
    for c in chars.iter().flat_map(|c| c.to_lowercase()) {
        *frequencies.entry(c).or_insert(0) += 1;
    }

    frequencies
        .values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

fn longest_run(chars: &[char], pred: impl Fn(char) -> bool) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for &c in chars {
        if pred(c) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// Non-overlapping lower/upper or upper/lower adjacent pairs
fn case_changes(chars: &[char]) -> usize {
    let mut count = 0;
    let mut i = 0;
    while i + 1 < chars.len() {
        let (a, b) = (chars[i], chars[i + 1]);
        let flips = (a.is_ascii_lowercase() && b.is_ascii_uppercase())
            || (a.is_ascii_uppercase() && b.is_ascii_lowercase());
        if flips {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// Score a submitted name from 0 (plausible) to 10 (almost certainly spam)
pub fn name_spam_score(name: &str) -> u8 {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return MAX_SCORE;
    }

    let chars: Vec<char> = trimmed.chars().collect();
    // Lengths and ratios count UTF-16 code units, as browsers measure names
    let units = trimmed.encode_utf16().count();
    let len = units as f64;
    let mut score: u8 = 0;

    let entropy = shannon_entropy(&chars, len);
    score += if entropy > 3.8 {
        4
    } else if entropy > 3.4 {
        3
    } else if entropy > 3.0 {
        2
    } else {
        0
    };

    let vowel_ratio = chars.iter().filter(|&&c| is_vowel(c)).count() as f64 / len;
    if !(0.2..=0.6).contains(&vowel_ratio) {
        score += 3;
    } else if !(0.25..=0.55).contains(&vowel_ratio) {
        score += 2;
    }

    match longest_run(&chars, is_consonant) {
        n if n >= 4 => score += 3,
        3 => score += 1,
        _ => {}
    }

    match case_changes(&chars) {
        n if n > 3 => score += 3,
        3 => score += 2,
        _ => {}
    }

    if longest_run(&chars[1..], |c| c.is_ascii_uppercase()) >= 3 {
        score += 2;
    }

    if units > 20 {
        score += 3;
    } else if units > 15 {
        score += 2;
    }

    let digit_ratio = chars.iter().filter(|c| c.is_ascii_digit()).count() as f64 / len;
    if digit_ratio > 0.3 {
        score += 3;
    } else if digit_ratio > 0.2 {
        score += 2;
    }

    score.min(MAX_SCORE)
}

/// Whether a contact submission with this name should be rejected
pub fn should_block(name: &str) -> bool {
    name_spam_score(name) >= BLOCK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_names_score_max() {
        assert_eq!(name_spam_score(""), 10);
        assert_eq!(name_spam_score("   "), 10);
        assert!(should_block(""));
    }

    #[test]
    fn test_ordinary_names_pass() {
        assert_eq!(name_spam_score("Maria"), 2);
        assert_eq!(name_spam_score("John Smith"), 4);
        assert!(!should_block("Maria"));
        assert!(!should_block("John Smith"));
    }

    #[test]
    fn test_random_strings_blocked() {
        assert!(should_block("xKqZpWvRtYmLbNc"));
        assert!(should_block("aB3dE7gH9jK2mN5pQ"));
    }

    #[test]
    fn test_entropy() {
        let uniform: Vec<char> = "abcd".chars().collect();
        assert!((shannon_entropy(&uniform, 4.0) - 2.0).abs() < 1e-9);
        let same: Vec<char> = "aAaA".chars().collect();
        assert_eq!(shannon_entropy(&same, 4.0), 0.0);
    }

    #[test]
    fn test_case_changes_do_not_overlap() {
        let chars: Vec<char> = "aBc".chars().collect();
        assert_eq!(case_changes(&chars), 1);
        let chars: Vec<char> = "aBcD".chars().collect();
        assert_eq!(case_changes(&chars), 2);
    }

    #[test]
    fn test_astral_characters_count_as_two_units() {
        // 8 guitars are 16 UTF-16 units: long (+2) and vowel-free (+3)
        assert_eq!(name_spam_score("🎸🎸🎸🎸🎸🎸🎸🎸"), 5);
        assert!(!should_block("🎸🎸🎸🎸🎸🎸🎸🎸"));
    }

    #[test]
    fn test_score_is_capped() {
        assert!(name_spam_score("QWRTZPLKJHGFDSXCVBNMQWRTZ1234567890") <= 10);
    }
}
