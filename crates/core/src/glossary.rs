//! Technical-term glossary for the shopping assistant.
//!
//! A static lookup of feature explanations (stabilization, display tech,
//! connectivity, memory). Lookups never fabricate an answer: a miss
//! reports the known keys so the dialogue layer can say so honestly.

use serde::{Deserialize, Serialize};

/// Explanation of one technical feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureExplanation {
    /// Full feature name.
    pub name: String,
    /// What the feature is.
    pub description: String,
    /// Why a buyer would care.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefit: Option<String>,
    /// Extra context lines (example phones, typical values, comparisons).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// One glossary entry: lookup key plus explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub key: String,
    pub explanation: FeatureExplanation,
}

/// Static lookup of feature explanations.
///
/// Entries are held longest-key-first, so when several keys match a query
/// by substring the most specific one wins and iteration order is
/// deterministic ("OIS vs EIS" beats "OIS").
#[derive(Debug, Clone)]
pub struct FeatureGlossary {
    entries: Vec<GlossaryEntry>,
}

impl FeatureGlossary {
    pub fn new(mut entries: Vec<GlossaryEntry>) -> Self {
        entries.sort_by(|a, b| b.key.len().cmp(&a.key.len()).then_with(|| a.key.cmp(&b.key)));
        Self { entries }
    }

    /// Explain a feature term.
    ///
    /// Exact case-insensitive key match first; otherwise a substring match
    /// in either direction (key inside the query, or query inside a key).
    pub fn explain(&self, term: &str) -> Option<&FeatureExplanation> {
        let term_lower = term.trim().to_lowercase();
        if term_lower.is_empty() {
            return None;
        }

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| e.key.eq_ignore_ascii_case(&term_lower))
        {
            return Some(&entry.explanation);
        }

        self.entries
            .iter()
            .find(|e| {
                let key_lower = e.key.to_lowercase();
                term_lower.contains(&key_lower) || key_lower.contains(&term_lower)
            })
            .map(|e| &e.explanation)
    }

    /// All known keys, in precedence order.
    pub fn known_features(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(
    key: &str,
    name: &str,
    description: &str,
    benefit: Option<&str>,
    notes: &[&str],
) -> GlossaryEntry {
    GlossaryEntry {
        key: key.to_string(),
        explanation: FeatureExplanation {
            name: name.to_string(),
            description: description.to_string(),
            benefit: benefit.map(str::to_string),
            notes: notes.iter().map(|n| n.to_string()).collect(),
        },
    }
}

impl Default for FeatureGlossary {
    fn default() -> Self {
        Self::new(vec![
            entry(
                "OIS",
                "Optical Image Stabilization",
                "Uses physical lenses to compensate for hand movement, reducing blur in photos and videos",
                Some("Better low-light photography and smoother videos"),
                &["Found on: Pixel 8a, OnePlus 12R, iPhone 15, Xiaomi 14"],
            ),
            entry(
                "EIS",
                "Electronic Image Stabilization",
                "Uses software to crop and shift frames to reduce blur, works with digital processing",
                Some("Works for all cameras, no physical hardware needed"),
                &["Found on: most modern phones"],
            ),
            entry(
                "OIS vs EIS",
                "OIS vs EIS Comparison",
                "OIS (Optical) uses physical lens movement - more effective but expensive. \
                 EIS (Electronic) uses software processing - faster but crops the image slightly. \
                 Many flagship phones use BOTH for best results.",
                Some("OIS is generally better for photography, EIS for video"),
                &[],
            ),
            entry(
                "5G",
                "5G Connectivity",
                "Fifth-generation mobile network technology offering much faster speeds than 4G LTE",
                Some("Faster downloads, lower latency, better for streaming and gaming"),
                &["Typical speeds: 4G LTE ~100Mbps, 5G ~1-10Gbps"],
            ),
            entry(
                "OLED",
                "OLED Display",
                "Organic Light-Emitting Diode - each pixel emits its own light",
                None,
                &[
                    "Perfect blacks",
                    "Better contrast",
                    "Faster response time",
                    "Better colors",
                    "Generally superior to LCD but more expensive",
                ],
            ),
            entry(
                "LCD",
                "LCD Display",
                "Liquid Crystal Display - uses a backlight with color filters",
                None,
                &[
                    "More affordable",
                    "Longer lifespan",
                    "Less power-intensive",
                    "Still good quality, but not as vibrant as OLED",
                ],
            ),
            entry(
                "Refresh Rate",
                "Display Refresh Rate",
                "How many times per second the display updates (measured in Hz)",
                None,
                &[
                    "60Hz: standard, smooth for most uses",
                    "90Hz: better for gaming, slightly smoother scrolling",
                    "120Hz: premium, very smooth for everything",
                    "144Hz: high-end gaming phones",
                ],
            ),
            entry(
                "RAM",
                "Random Access Memory",
                "Temporary memory used by apps and the OS for quick access to data",
                None,
                &[
                    "4GB: basic tasks",
                    "6-8GB: general use, gaming",
                    "12GB+: heavy multitasking, gaming, video editing",
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let glossary = FeatureGlossary::default();
        let explanation = glossary.explain("oled").unwrap();
        assert_eq!(explanation.name, "OLED Display");
        assert_eq!(glossary.explain("OLED").unwrap(), explanation);
    }

    #[test]
    fn test_longer_key_wins_substring_match() {
        let glossary = FeatureGlossary::default();
        // "ois vs eis" is a substring of the query; both "OIS" and "EIS"
        // also match, but the most specific key must win.
        let explanation = glossary.explain("What is OIS vs EIS").unwrap();
        assert_eq!(explanation.name, "OIS vs EIS Comparison");
    }

    #[test]
    fn test_query_inside_key_matches() {
        let glossary = FeatureGlossary::default();
        let explanation = glossary.explain("refresh").unwrap();
        assert_eq!(explanation.name, "Display Refresh Rate");
    }

    #[test]
    fn test_miss_returns_none_and_keys_are_listed() {
        let glossary = FeatureGlossary::default();
        assert!(glossary.explain("quantum dot").is_none());
        let keys = glossary.known_features();
        assert_eq!(keys.len(), 8);
        assert!(keys.contains(&"OIS vs EIS"));
    }

    #[test]
    fn test_blank_term_is_a_miss() {
        let glossary = FeatureGlossary::default();
        assert!(glossary.explain("   ").is_none());
    }

    #[test]
    fn test_serialized_explanation_skips_empty_fields() {
        let glossary = FeatureGlossary::default();
        let json = serde_json::to_value(glossary.explain("OLED").unwrap()).unwrap();
        assert!(json.get("benefit").is_none());
        assert!(json.get("notes").is_some());
    }
}
