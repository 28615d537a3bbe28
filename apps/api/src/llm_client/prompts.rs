// Shared prompt fragments and prompt-building utilities.
// Each generator defines its own templates in generation/prompts.rs.
// This file contains the pieces they have in common.

/// Appended to every marketing prompt.
pub const MARKETING_TONE_INSTRUCTION: &str =
    "マーケティング的に効果的で、読者の購買意欲を高める表現を使ってください。";

/// Fills `{key}` placeholders in one pass. Substituted values are never rescanned,
/// so user text containing braces is inserted verbatim. Unknown keys are left as-is.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let substitution = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (end, *value))
        });

        match substitution {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Renders items as a `- item` list, one per line.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a price the way the ja-JP locale does: `12,800円`.
pub fn format_yen(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{grouped}円")
}

/// `価格: 12,800円` when a price is set, empty otherwise.
pub fn price_line(price: Option<u64>) -> String {
    price
        .map(|p| format!("価格: {}", format_yen(p)))
        .unwrap_or_default()
}
