//! Outbound-link decoration.
//!
//! Appends the captured attribution onto outbound URLs so campaign tracking
//! survives the hop to the product site and social profiles. Pure string
//! work — no allocation beyond the output, no side effects.

use crate::attribution::AttributionRecord;

/// Append the recorded attribution keys to `base` as query parameters.
///
/// An empty record returns `base` unchanged. Appends with `?` or `&`
/// depending on whether `base` already carries a query string. A key that
/// already exists on the base URL is left alone and not appended again, so
/// the result's parameter set is the duplicate-free union of both sides.
/// Values are percent-encoded; the fixed keys need no encoding.
#[must_use]
pub fn decorate(base: &str, attribution: &AttributionRecord) -> String {
    let pairs = attribution.pairs();
    if pairs.is_empty() {
        return base.to_owned();
    }

    let existing = base_query_keys(base);
    let mut out = String::with_capacity(base.len() + 48);
    out.push_str(base);

    let mut separator = if base.contains('?') { '&' } else { '?' };
    for (key, value) in pairs {
        if existing.iter().any(|k| *k == key) {
            continue;
        }
        out.push(separator);
        out.push_str(key);
        out.push('=');
        out.push_str(&urlencoding::encode(value));
        separator = '&';
    }

    out
}

/// Parameter keys already present on the base URL's query string.
fn base_query_keys(base: &str) -> Vec<&str> {
    match base.split_once('?') {
        Some((_, query)) => query
            .split('&')
            .filter_map(|pair| pair.split('=').next())
            .filter(|key| !key.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: Option<&str>, medium: Option<&str>, campaign: Option<&str>) -> AttributionRecord {
        AttributionRecord {
            utm_source: source.map(ToOwned::to_owned),
            utm_medium: medium.map(ToOwned::to_owned),
            utm_campaign: campaign.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn empty_record_is_identity() {
        let base = "https://mealistik.com";
        assert_eq!(decorate(base, &AttributionRecord::default()), base);
    }

    #[test]
    fn appends_with_question_mark_on_bare_url() {
        let out = decorate("https://mealistik.com", &record(Some("ig"), None, Some("launch")));
        assert_eq!(out, "https://mealistik.com?utm_source=ig&utm_campaign=launch");
    }

    #[test]
    fn appends_with_ampersand_when_query_exists() {
        let out = decorate("https://mealistik.com?ref=bio", &record(Some("ig"), None, None));
        assert_eq!(out, "https://mealistik.com?ref=bio&utm_source=ig");
    }

    #[test]
    fn does_not_duplicate_existing_parameters() {
        let out = decorate(
            "https://mealistik.com?utm_source=old",
            &record(Some("new"), Some("email"), None),
        );
        assert_eq!(out, "https://mealistik.com?utm_source=old&utm_medium=email");
    }

    #[test]
    fn percent_encodes_values() {
        let out = decorate("https://mealistik.com", &record(Some("spring sale&more"), None, None));
        assert_eq!(out, "https://mealistik.com?utm_source=spring%20sale%26more");
    }

    #[test]
    fn output_parses_to_union_of_both_sides() {
        let out = decorate(
            "https://mealistik.com?ref=bio",
            &record(Some("ig"), Some("social"), Some("launch")),
        );

        let (_, query) = out.split_once('?').unwrap();
        let mut keys: Vec<&str> = query
            .split('&')
            .filter_map(|p| p.split('=').next())
            .collect();
        keys.sort_unstable();

        assert_eq!(keys, vec!["ref", "utm_campaign", "utm_medium", "utm_source"]);
    }
}
