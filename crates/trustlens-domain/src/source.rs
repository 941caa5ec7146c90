//! Evidence sources attached to a claim

use serde::{Deserialize, Serialize};

/// Role a source played in the verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRole {
    /// Backs the claim
    Supporting,
    /// Disputes the claim
    Contradicting,
    /// Related but not decisive
    #[default]
    Neutral,
}

/// A single piece of evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Page the evidence came from
    pub url: String,

    /// Host of `url`
    pub domain: String,

    /// Excerpt relevant to the claim
    pub snippet: String,

    /// Domain reputation, [0, 1]
    pub domain_score: f64,

    /// Publication date as reported by the provider (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    /// Role in the verdict
    #[serde(default)]
    pub role: SourceRole,
}

/// Sources for a claim, split by role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSources {
    /// Evidence backing the claim, most relevant first
    #[serde(default)]
    pub supporting: Vec<SourceInfo>,

    /// Evidence disputing the claim, most relevant first
    #[serde(default)]
    pub contradicting: Vec<SourceInfo>,
}

impl ClaimSources {
    /// Iterate over every source, supporting first
    pub fn iter(&self) -> impl Iterator<Item = &SourceInfo> {
        self.supporting.iter().chain(self.contradicting.iter())
    }

    /// Total number of sources
    pub fn len(&self) -> usize {
        self.supporting.len() + self.contradicting.len()
    }

    /// Check whether there are no sources at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_role_defaults_to_neutral() {
        let json = r#"{
            "url": "https://example.com/stats",
            "domain": "example.com",
            "snippet": "Used by 12,000+ teams globally",
            "domain_score": 0.85
        }"#;
        let source: SourceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(source.role, SourceRole::Neutral);
        assert!(source.published_at.is_none());
    }

    #[test]
    fn test_sources_iterate_supporting_first() {
        let make = |url: &str, role| SourceInfo {
            url: url.to_string(),
            domain: "example.com".to_string(),
            snippet: String::new(),
            domain_score: 0.5,
            published_at: None,
            role,
        };
        let sources = ClaimSources {
            supporting: vec![make("a", SourceRole::Supporting)],
            contradicting: vec![make("b", SourceRole::Contradicting)],
        };
        let urls: Vec<_> = sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, ["a", "b"]);
        assert_eq!(sources.len(), 2);
        assert!(!sources.is_empty());
    }
}
