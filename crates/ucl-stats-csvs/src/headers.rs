/*!
# Header Normalization

Turns raw CSV header cells into names that are safe to use as SQL identifiers.
The same sanitizer derives table names from file names.
*/

use std::collections::HashMap;

/// Prefix pandas gives to blank header cells; treated as blank here too
const UNNAMED_PREFIX: &str = "Unnamed";

/// Sanitize a header cell or file stem into a lowercase SQL identifier.
///
/// `%` becomes `pct`, `/` becomes `_per_`, parentheses are dropped and every
/// other character outside `[a-z0-9_]` becomes `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for ch in name.trim().to_lowercase().chars() {
        match ch {
            '%' => out.push_str("pct"),
            '/' => out.push_str("_per_"),
            '(' | ')' => {}
            c if c.is_ascii_alphanumeric() || c == '_' => out.push(c),
            _ => out.push('_'),
        }
    }

    if out.is_empty() {
        return "col".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Whether a raw header cell carries no usable name
pub fn is_unnamed(header: &str) -> bool {
    let header = header.trim();
    header.is_empty() || header.starts_with(UNNAMED_PREFIX)
}

/// Normalize a raw header row.
///
/// Unnamed cells become positional placeholders (`col1`, `col2`, ...), every
/// name is sanitized, and names that collide after sanitizing get `_2`, `_3`
/// suffixes in order of appearance.
pub fn normalize_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for (i, header) in raw.into_iter().enumerate() {
        let base = if is_unnamed(header) {
            format!("col{}", i + 1)
        } else {
            sanitize_identifier(header)
        };

        // A suffixed name may itself clash with a literal header
        let count = seen.entry(base.clone()).or_insert(0);
        let name = loop {
            *count += 1;
            let candidate = if *count == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, count)
            };
            if !headers.contains(&candidate) {
                break candidate;
            }
        };

        headers.push(name);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_identifier() {
        assert_eq!(sanitize_identifier("Player Name"), "player_name");
        assert_eq!(
            sanitize_identifier("Passing Accuracy(%)"),
            "passing_accuracypct"
        );
        assert_eq!(sanitize_identifier("passing_accuracy(%)"), "passing_accuracypct");
        assert_eq!(sanitize_identifier("Goals/Game"), "goals_per_game");
        assert_eq!(sanitize_identifier("t-shirt.no"), "t_shirt_no");
        assert_eq!(sanitize_identifier("  Age "), "age");
        assert_eq!(sanitize_identifier("90s"), "_90s");
        assert_eq!(sanitize_identifier("()"), "col");
        assert_eq!(sanitize_identifier("Key_Stats_Data"), "key_stats_data");
    }

    #[test]
    fn test_unnamed_headers_become_positional() {
        let headers = normalize_headers(["", "player_name", "Unnamed: 2", "goals"]);
        assert_eq!(headers, vec!["col1", "player_name", "col3", "goals"]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let headers = normalize_headers(["Goals", "goals", "GOALS", "goals_2"]);
        assert_eq!(headers, vec!["goals", "goals_2", "goals_3", "goals_2_2"]);
    }

    #[test]
    fn test_placeholder_collision() {
        let headers = normalize_headers(["col2", ""]);
        assert_eq!(headers, vec!["col2", "col2_2"]);
    }
}
