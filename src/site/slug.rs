use deunicode::deunicode_char;

/// Symbols spelled out as words, the way release URLs have always been built
fn symbol_word(c: char) -> Option<&'static str> {
    Some(match c {
        '$' => "dollar",
        '%' => "percent",
        '&' => "and",
        '<' => "less",
        '>' => "greater",
        '|' => "or",
        '¢' => "cent",
        '£' => "pound",
        '¤' => "currency",
        '¥' => "yen",
        '©' => "(c)",
        '®' => "(r)",
        '€' => "euro",
        '™' => "tm",
        '∞' => "infinity",
        '♥' => "love",
        _ => return None,
    })
}

/// Latin, Greek and Cyrillic letters transliterate; other scripts are dropped
fn transliterates(c: char) -> bool {
    matches!(c as u32, 0x00C0..=0x052F | 0x1E00..=0x1EFF)
}

/// URL slug for a release or post title.
///
/// Accented letters are transliterated (`é` -> `e`) and a few symbols spelled
/// out (`&` -> `and`) in place; what remains is reduced to lowercase ASCII
/// alphanumerics joined by single hyphens.
pub fn slugify(text: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(word) = symbol_word(c) {
            expanded.push_str(word);
        } else if transliterates(c) {
            expanded.push_str(deunicode_char(c).unwrap_or(""));
        } else {
            expanded.push(c);
        }
    }

    let mut slug = String::with_capacity(expanded.len());
    let mut pending_separator = false;

    for c in expanded.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Summer EP"), "summer-ep");
        assert_eq!(slugify("  Night   Drive -- Remix "), "night-drive-remix");
        assert_eq!(slugify("Don't Stop"), "dont-stop");
        assert_eq!(slugify("Track #1"), "track-1");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_transliterates_accents() {
        assert_eq!(slugify("Café Noir"), "cafe-noir");
        assert_eq!(slugify("Señorita"), "senorita");
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("Ça Va"), "ca-va");
    }

    #[test]
    fn test_slugify_spells_out_symbols() {
        assert_eq!(slugify("Rock & Roll"), "rock-and-roll");
        assert_eq!(slugify("R&B"), "randb");
        assert_eq!(slugify("$100 Bill"), "dollar100-bill");
        assert_eq!(slugify("100% Real"), "100percent-real");
    }
}
