//! Key-point extraction — derives benefit bullets from the free-text description.

/// At most this many key points are passed to the generators.
pub const MAX_KEY_POINTS: usize = 5;

/// Sentences must be strictly longer than this (in characters) to count.
const MIN_SENTENCE_CHARS: usize = 10;
/// ...and strictly shorter than this.
const MAX_SENTENCE_CHARS: usize = 100;

/// Length of the fallback key point when no sentence qualifies.
const FALLBACK_CHARS: usize = 100;

/// Splits `text` on `.` and `。`, keeps mid-length sentences, caps at `MAX_KEY_POINTS`.
///
/// Never empty for non-empty input: when no sentence qualifies, the result is a
/// single item holding the first 100 characters of `text`.
pub fn extract_key_points(text: &str) -> Vec<String> {
    let points: Vec<String> = text
        .split(|c| c == '.' || c == '。')
        .map(str::trim)
        .filter(|sentence| {
            let len = sentence.chars().count();
            len > MIN_SENTENCE_CHARS && len < MAX_SENTENCE_CHARS
        })
        .take(MAX_KEY_POINTS)
        .map(String::from)
        .collect();

    if points.is_empty() {
        vec![leading_chars(text, FALLBACK_CHARS)]
    } else {
        points
    }
}

/// The first `n` characters of `text` (not bytes).
pub fn leading_chars(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_mid_length_sentences_in_order() {
        let text = "短い。このオンライン講座では副業の始め方を基礎から学べます。\
            現役マーケターが実践的なノウハウを直接指導します。OK";
        let points = extract_key_points(text);
        assert_eq!(
            points,
            vec![
                "このオンライン講座では副業の始め方を基礎から学べます",
                "現役マーケターが実践的なノウハウを直接指導します",
            ]
        );
    }

    #[test]
    fn test_splits_on_ascii_period_too() {
        let text = "Learn the basics of side businesses. Get coached by working marketers. ok.";
        let points = extract_key_points(text);
        assert_eq!(
            points,
            vec![
                "Learn the basics of side businesses",
                "Get coached by working marketers",
            ]
        );
    }

    #[test]
    fn test_caps_at_five_points() {
        let text = "これは十分に長い一文目の説明です。".repeat(8);
        let points = extract_key_points(&text);
        assert_eq!(points.len(), MAX_KEY_POINTS);
    }

    #[test]
    fn test_boundary_lengths_are_excluded() {
        // exactly 10 and exactly 100 characters are both rejected
        let ten = "あ".repeat(10);
        let hundred = "い".repeat(100);
        let text = format!("{ten}。{hundred}。");
        let points = extract_key_points(&text);
        assert_eq!(points, vec![leading_chars(&text, 100)]);
    }

    #[test]
    fn test_fallback_is_first_100_chars_when_nothing_qualifies() {
        let text = format!("短文。{}", "長".repeat(150));
        let points = extract_key_points(&text);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].chars().count(), 100);
        assert_eq!(points[0], text.chars().take(100).collect::<String>());
    }

    #[test]
    fn test_fallback_keeps_short_text_whole() {
        assert_eq!(extract_key_points("短い説明"), vec!["短い説明"]);
    }

    #[test]
    fn test_leading_chars_counts_characters_not_bytes() {
        assert_eq!(leading_chars("日本語テキスト", 3), "日本語");
        assert_eq!(leading_chars("abc", 10), "abc");
    }
}
