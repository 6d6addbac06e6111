use crate::assessment::sector::normalize_text;

const HEADER_NAMES: &[&str] = &[
    "champ",
    "champs",
    "field",
    "indicateur",
    "libelle",
    "parametre",
    "donnee",
    "cle",
    "key",
];

#[derive(Debug)]
pub(crate) struct FieldRow {
    pub(crate) line: usize,
    pub(crate) raw_name: String,
    pub(crate) normalized_name: String,
    pub(crate) value: String,
}

/// Split a two-column export into field/value rows. The delimiter is taken
/// from the first non-blank line and a leading header row is skipped.
pub(crate) fn parse_rows(content: &str) -> Result<Vec<FieldRow>, csv::Error> {
    let content = content.trim_start_matches('\u{feff}');
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(sniff_delimiter(content))
        .from_reader(content.as_bytes());
    let mut rows = Vec::new();

    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let raw_name = record.get(0).unwrap_or_default().to_string();
        let normalized_name = normalize_text(&raw_name);
        if normalized_name.is_empty() {
            continue;
        }
        if index == 0 && HEADER_NAMES.contains(&normalized_name.as_str()) {
            continue;
        }

        rows.push(FieldRow {
            line: record
                .position()
                .map_or(index + 1, |position| position.line() as usize),
            raw_name,
            normalized_name,
            value: record.get(1).unwrap_or_default().to_string(),
        });
    }

    Ok(rows)
}

fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or_default();
    if first_line.contains(';') {
        b';'
    } else if first_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

#[cfg(test)]
pub(crate) fn sniff_for_tests(content: &str) -> u8 {
    sniff_delimiter(content)
}
