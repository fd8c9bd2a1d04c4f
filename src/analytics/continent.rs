use std::collections::BTreeMap;

/// Continent reported for countries missing from the table.
pub const FALLBACK_CONTINENT: &str = "Other";

const DEFAULT_MAPPING: [(&str, &str); 17] = [
    ("Indonesia", "Asia"),
    ("China", "Asia"),
    ("Philippines", "Asia"),
    ("Japan", "Asia"),
    ("Russia", "Europe"),
    ("Finland", "Europe"),
    ("Greece", "Europe"),
    ("Australia", "Oceania"),
    ("New Caledonia", "Oceania"),
    ("USA", "North America"),
    ("Canada", "North America"),
    ("Cuba", "North America"),
    ("Brazil", "South America"),
    ("Colombia", "South America"),
    ("South Africa", "Africa"),
    ("Morocco", "Africa"),
    ("Botswana", "Africa"),
];

/// Immutable country → continent lookup.
///
/// The table is fixed at construction; classification never fails and
/// unmapped countries fall back to [`FALLBACK_CONTINENT`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinentClassifier {
    table: BTreeMap<String, String>,
}

impl Default for ContinentClassifier {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_MAPPING)
    }
}

impl ContinentClassifier {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Default table with `overrides` layered on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut classifier = Self::default();
        for (country, continent) in overrides {
            classifier
                .table
                .insert(country.clone(), continent.clone());
        }
        classifier
    }

    pub fn classify(&self, country: &str) -> &str {
        self.table
            .get(country)
            .map_or(FALLBACK_CONTINENT, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
