//! Configuration for the highlighting engine

use crate::HighlightError;
use serde::{Deserialize, Serialize};

/// How the live page scrolls a new highlight into view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll
    #[default]
    Smooth,
    /// Jump straight to the highlight
    Instant,
    /// Leave the scroll position alone
    None,
}

/// Configuration for live-page highlighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Tag name of the injected wrapper element
    pub wrapper_tag: String,

    /// Prefix for CSS classes on injected wrappers
    pub class_prefix: String,

    /// Scroll behavior when a highlight is shown
    pub scroll_behavior: ScrollBehavior,

    /// Elements whose text is never searched (not rendered on the page)
    pub skip_tags: Vec<String>,

    /// Maximum tooltip length in chars (label included)
    pub tooltip_max_chars: usize,
}

impl HighlightConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), HighlightError> {
        if !is_tag_name(&self.wrapper_tag) {
            return Err(HighlightError::Config(format!(
                "wrapper_tag '{}' is not a valid element name",
                self.wrapper_tag
            )));
        }
        if self.class_prefix.is_empty() || self.class_prefix.contains(char::is_whitespace) {
            return Err(HighlightError::Config(
                "class_prefix must be a non-empty single token".to_string(),
            ));
        }
        if self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(&self.wrapper_tag)) {
            return Err(HighlightError::Config(format!(
                "wrapper_tag '{}' cannot also be a skipped tag",
                self.wrapper_tag
            )));
        }
        if self.tooltip_max_chars < 16 {
            return Err(HighlightError::Config(
                "tooltip_max_chars must be at least 16".to_string(),
            ));
        }
        Ok(())
    }

    /// Check whether text under `tag` is excluded from matching
    pub fn skips(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, HighlightError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, HighlightError> {
        toml::to_string_pretty(self)
            .map_err(|e| HighlightError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            wrapper_tag: "mark".to_string(),
            class_prefix: "trustlens".to_string(),
            scroll_behavior: ScrollBehavior::Smooth,
            skip_tags: ["script", "style", "noscript", "template"]
                .into_iter()
                .map(String::from)
                .collect(),
            tooltip_max_chars: 280,
        }
    }
}

fn is_tag_name(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HighlightConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scroll_behavior, ScrollBehavior::Smooth);
        assert!(config.skips("SCRIPT"));
        assert!(!config.skips("p"));
    }

    #[test]
    fn test_invalid_wrapper_tag() {
        let mut config = HighlightConfig::default();
        config.wrapper_tag = "<mark>".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wrapper_tag_cannot_be_skipped() {
        let mut config = HighlightConfig::default();
        config.wrapper_tag = "style".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = HighlightConfig::from_toml(
            r#"
            wrapper_tag = "span"
            scroll_behavior = "none"
            "#,
        )
        .unwrap();
        assert_eq!(config.wrapper_tag, "span");
        assert_eq!(config.scroll_behavior, ScrollBehavior::None);
        assert_eq!(config.class_prefix, "trustlens");
        assert_eq!(config.tooltip_max_chars, 280);
    }

    #[test]
    fn test_toml_rejects_unknown_scroll_behavior() {
        let err = HighlightConfig::from_toml(r#"scroll_behavior = "bouncy""#).unwrap_err();
        assert!(matches!(err, HighlightError::Config(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = HighlightConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = HighlightConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }
}
