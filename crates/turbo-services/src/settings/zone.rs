//! Country zones.

use serde_json::Value;

use crate::settings::node;

/// A group of countries sharing one settings subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone<'a> {
    /// Normalized country codes, in configured order.
    pub countries: Vec<String>,
    /// The whole zone node, including its `countries` key.
    pub settings: &'a Value,
}

impl<'a> Zone<'a> {
    /// Read a zone from its settings node.
    ///
    /// The `countries` field is a comma separated list; all whitespace is
    /// stripped before splitting.
    pub fn from_node(settings: &'a Value) -> Self {
        let raw = node::text(node::get(settings, "countries"));
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        let countries = compact.split(',').map(str::to_string).collect();

        Self { countries, settings }
    }

    /// Whether the zone lists `country`.
    pub fn contains(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }
}

/// Finds the zone a cart's country belongs to.
pub struct ZoneMatcher;

impl ZoneMatcher {
    /// First zone, in list order, whose countries include `country`.
    ///
    /// `zones` may be a list or a keyed mapping of zone nodes. Returns
    /// `None` when there is no country, no zones, or no match.
    pub fn find<'a>(zones: &'a Value, country: Option<&str>) -> Option<Zone<'a>> {
        let country = country?;
        let entries = node::entries(zones)?;

        let matched = entries
            .into_iter()
            .map(|(_, settings)| Zone::from_node(settings))
            .find(|zone| zone.contains(country));

        match &matched {
            Some(zone) => tracing::trace!(country, zone = ?zone.countries, "zone matched"),
            None => tracing::trace!(country, "no zone matched"),
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_normalizes_whitespace() {
        let settings = json!({ "countries": " DE, AT ,\tCH\n" });
        let zone = Zone::from_node(&settings);
        assert_eq!(zone.countries, vec!["DE", "AT", "CH"]);
        assert!(zone.contains("CH"));
        assert!(!zone.contains(" CH"));
    }

    #[test]
    fn test_first_match_wins() {
        let zones = json!([
            { "countries": "FR,BE", "preset": "a" },
            { "countries": "DE, AT", "preset": "b" },
            { "countries": "AT", "preset": "c" }
        ]);

        let zone = ZoneMatcher::find(&zones, Some("AT")).unwrap();
        assert_eq!(zone.settings["preset"], "b");
    }

    #[test]
    fn test_keyed_zones() {
        let zones = json!({
            "1": { "countries": "DE" },
            "2": { "countries": "US,CA" }
        });

        let zone = ZoneMatcher::find(&zones, Some("CA")).unwrap();
        assert_eq!(zone.countries, vec!["US", "CA"]);
    }

    #[test]
    fn test_no_match() {
        let zones = json!([{ "countries": "DE" }]);
        assert!(ZoneMatcher::find(&zones, Some("FR")).is_none());
        assert!(ZoneMatcher::find(&zones, None).is_none());
        assert!(ZoneMatcher::find(&json!([]), Some("DE")).is_none());
        assert!(ZoneMatcher::find(&json!(null), Some("DE")).is_none());
    }

    #[test]
    fn test_zone_without_countries_never_matches_real_country() {
        let zones = json!([{ "preset": "x" }]);
        assert!(ZoneMatcher::find(&zones, Some("DE")).is_none());
    }

    proptest! {
        #[test]
        fn prop_returns_first_containing_zone(
            zones in prop::collection::vec(prop::collection::vec("[A-E]{2}", 0..4), 0..6),
            country in "[A-E]{2}",
        ) {
            let nodes: Vec<Value> = zones
                .iter()
                .enumerate()
                .map(|(i, cs)| json!({ "countries": cs.join(" , "), "index": i }))
                .collect();
            let tree = Value::Array(nodes);

            let expected = zones.iter().position(|cs| cs.contains(&country));
            let found = ZoneMatcher::find(&tree, Some(country.as_str()))
                .and_then(|zone| zone.settings["index"].as_u64())
                .map(|i| i as usize);

            prop_assert_eq!(found, expected);
        }
    }
}
