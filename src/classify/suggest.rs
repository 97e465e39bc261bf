use super::tables::SUGGESTION_TARGETS;
use crate::validator::domain_to_ascii;

const MAX_DISTANCE: usize = 2;

/// Suggest a well-known mail domain when `domain` looks like a typo of one
/// (`gmial.com` -> `gmail.com`). Returns an empty string when there is no
/// better match or the domain is already a known one.
pub fn suggest(domain: &str) -> String {
    let ascii = domain_to_ascii(domain);
    if ascii.is_empty() || SUGGESTION_TARGETS.contains(&ascii.as_str()) {
        return String::new();
    }

    let mut best: Option<(usize, &str)> = None;
    for candidate in SUGGESTION_TARGETS {
        let distance = edit_distance(&ascii, candidate);
        if distance == 0 || distance > MAX_DISTANCE {
            continue;
        }
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, c)| c.to_string()).unwrap_or_default()
}

/// Optimal string alignment distance (Levenshtein plus adjacent swaps).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut rows = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in rows.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        rows[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (rows[i - 1][j] + 1)
                .min(rows[i][j - 1] + 1)
                .min(rows[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(rows[i - 2][j - 2] + 1);
            }
            rows[i][j] = best;
        }
    }
    rows[a.len()][b.len()]
}
