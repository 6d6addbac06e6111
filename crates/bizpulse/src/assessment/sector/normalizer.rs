/// Fold free text into the comparable form used by sector and field lookups:
/// lowercase, diacritics removed, separators turned into spaces, everything
/// outside `[a-z0-9 -]` dropped and whitespace collapsed.
pub(crate) fn normalize_text(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for ch in value.chars().flat_map(char::to_lowercase) {
        match ch {
            '_' | '\'' | '\u{2019}' | '/' | '\t' | '\n' | '\u{a0}' => folded.push(' '),
            'a'..='z' | '0'..='9' | ' ' | '-' => folded.push(ch),
            other => {
                if let Some(replacement) = fold_diacritic(other) {
                    folded.push_str(replacement);
                }
            }
        }
    }

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_diacritic(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => "a",
        'ç' => "c",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ñ' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'œ' => "oe",
        'æ' => "ae",
        _ => return None,
    };
    Some(folded)
}
