// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text helpers for dashboard labels.

/// Capitalize each whitespace-separated word.
///
/// Letters after an apostrophe stay lowercase: "dragon's bones" becomes
/// "Dragon's Bones", not "Dragon'S Bones".
pub fn proper_title(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut parts = word.split('\'');
            let first = capitalize(parts.next().unwrap_or_default());
            parts.fold(first, |mut acc, part| {
                acc.push('\'');
                acc.push_str(&part.to_lowercase());
                acc
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First character uppercase, the rest lowercase.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Greedy word wrap against a pixel width.
///
/// `measure` returns the rendered width of a candidate line. A single word
/// wider than `max_width` is placed on a line of its own.
pub fn wrap_text<F>(text: &str, max_width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure(&candidate) <= max_width {
            current = candidate;
        } else if current.is_empty() {
            lines.push(word.to_string());
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Left edge that centers text of `width` pixels on `center_x`.
pub fn centered_x(center_x: i32, width: u32) -> i32 {
    center_x - (width as i32) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-width "font": 6px per character.
    fn mono(s: &str) -> u32 {
        s.chars().count() as u32 * 6
    }

    #[test]
    fn test_proper_title_apostrophe() {
        assert_eq!(proper_title("dragon's bones"), "Dragon's Bones");
        assert_eq!(proper_title("AHRIM'S ROBETOP"), "Ahrim's Robetop");
        assert_eq!(proper_title("  rune   scimitar "), "Rune Scimitar");
        assert_eq!(proper_title(""), "");
    }

    #[test]
    fn test_wrap_text_greedy() {
        let lines = wrap_text("the quick brown fox jumps over", 60, mono);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over"]);
        assert!(lines.iter().all(|l| mono(l) <= 60));
    }

    #[test]
    fn test_wrap_text_long_word_gets_own_line() {
        let lines = wrap_text("a supercalifragilistic b", 30, mono);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert!(wrap_text("", 100, mono).is_empty());
    }

    #[test]
    fn test_centered_x() {
        assert_eq!(centered_x(605, 100), 555);
        assert_eq!(centered_x(605, 101), 555);
    }
}
