//! Configuration structs for grammars and styles.
//!
//! Everything the engine matches or emits is driven by configuration passed
//! explicitly into each operation: the heading/subsection grammars and the
//! default heading/body styles. There is no process-wide mutable state, so
//! the same process can serve multiple institutions or document types.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RestructureError, Result};

/// Default chapter heading keyword (Indonesian thesis convention).
pub const DEFAULT_HEADING_KEYWORD: &str = "BAB";

/// Default subsection grammar: `<digits>.<digits> <title>`.
///
/// Exactly one level of numbering is recognized; deeper nesting such as
/// `1.2.3` falls outside the grammar and is left untouched.
pub const DEFAULT_SUBSECTION_PATTERN: &str = r"^(\d+)\.(\d+)\s+(\S.*)$";

/// Grammar describing how chapter and subsection headings are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Keyword that opens a chapter heading (e.g., "BAB", "CHAPTER").
    pub heading_keyword: String,

    /// When `true`, a keyword-prefixed block that fails to parse as a
    /// chapter heading is reported as a `MalformedChapterHeader` warning.
    /// When `false`, such blocks are silently treated as ordinary content.
    pub require_keyword: bool,

    /// Regex with three capture groups (chapter, index, title) matching a
    /// subsection heading against trimmed block text.
    pub subsection_pattern: String,

    /// Chapter titles that must be present (matched case-insensitively as
    /// substrings). Each missing title yields a `MissingChapter` violation.
    pub required_titles: Vec<String>,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            heading_keyword: DEFAULT_HEADING_KEYWORD.to_string(),
            require_keyword: false,
            subsection_pattern: DEFAULT_SUBSECTION_PATTERN.to_string(),
            required_titles: Vec::new(),
        }
    }
}

impl GrammarConfig {
    /// Grammar for a standard three-chapter research proposal.
    ///
    /// # Examples
    /// ```
    /// use skripsi_restructurer::config::GrammarConfig;
    ///
    /// let grammar = GrammarConfig::proposal();
    /// assert_eq!(grammar.required_titles.len(), 3);
    /// ```
    #[must_use]
    pub fn proposal() -> Self {
        Self {
            required_titles: vec![
                "PENDAHULUAN".to_string(),
                "TINJAUAN PUSTAKA".to_string(),
                "METODE PENELITIAN".to_string(),
            ],
            ..Self::default()
        }
    }

    /// Compile the grammar into reusable matchers.
    ///
    /// # Errors
    /// Returns [`RestructureError::InvalidGrammar`] when the keyword is empty
    /// or the subsection pattern does not compile to a three-group regex.
    pub fn compile(&self) -> Result<CompiledGrammar> {
        let keyword = self.heading_keyword.trim();
        if keyword.is_empty() {
            return Err(RestructureError::InvalidGrammar(
                "heading keyword must not be empty".to_string(),
            ));
        }

        let escaped = regex::escape(keyword);

        // Case-insensitive so matching never needs an upper-cased copy of
        // the block text; captured titles keep their original casing.
        let heading = Regex::new(&format!(r"(?i)^{escaped}\s+(\S+)\s+(\S.*)$"))
            .map_err(|e| RestructureError::InvalidGrammar(e.to_string()))?;

        let keyword_prefix = Regex::new(&format!(r"(?i)^{escaped}(\s|$)"))
            .map_err(|e| RestructureError::InvalidGrammar(e.to_string()))?;

        let subsection = Regex::new(&self.subsection_pattern)
            .map_err(|e| RestructureError::InvalidGrammar(e.to_string()))?;
        if subsection.captures_len() != 4 {
            return Err(RestructureError::InvalidGrammar(format!(
                "subsection pattern must have exactly 3 capture groups, found {}",
                subsection.captures_len() - 1
            )));
        }

        Ok(CompiledGrammar {
            keyword: keyword.to_string(),
            require_keyword: self.require_keyword,
            required_titles: self.required_titles.clone(),
            heading,
            keyword_prefix,
            subsection,
        })
    }
}

/// A [`GrammarConfig`] compiled into regex matchers.
///
/// Compiled once per operation; holds no reference to the source config.
#[derive(Debug, Clone)]
pub struct CompiledGrammar {
    pub(crate) keyword: String,
    pub(crate) require_keyword: bool,
    pub(crate) required_titles: Vec<String>,
    pub(crate) heading: Regex,
    pub(crate) keyword_prefix: Regex,
    pub(crate) subsection: Regex,
}

impl CompiledGrammar {
    /// The heading keyword as configured.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

/// An explicit text style applied to generated runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size_pt: f32,

    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    #[serde(default)]
    pub underline: bool,
}

impl TextStyle {
    /// 12pt Times New Roman, no emphasis.
    #[must_use]
    pub fn body_default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            font_size_pt: 12.0,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Styles applied to blocks the rebuild generates.
///
/// Injected by the caller; the engine hard-codes nothing about how a
/// corrected heading should look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Style for regenerated chapter heading runs.
    pub heading: TextStyle,

    /// Center regenerated chapter headings.
    pub heading_centered: bool,

    /// Upper-case the title in regenerated chapter headings.
    pub heading_uppercase: bool,

    /// Style for rewritten subsection heading runs.
    pub body: TextStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            heading: TextStyle {
                bold: true,
                ..TextStyle::body_default()
            },
            heading_centered: true,
            heading_uppercase: true,
            body: TextStyle::body_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grammar_compiles() {
        let compiled = GrammarConfig::default().compile().unwrap();
        assert_eq!(compiled.keyword(), "BAB");
        assert!(!compiled.require_keyword);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let grammar = GrammarConfig {
            heading_keyword: "   ".to_string(),
            ..GrammarConfig::default()
        };
        assert!(matches!(
            grammar.compile(),
            Err(RestructureError::InvalidGrammar(_))
        ));
    }

    #[test]
    fn test_subsection_pattern_group_count_checked() {
        let grammar = GrammarConfig {
            subsection_pattern: r"^(\d+)\s+(.+)$".to_string(),
            ..GrammarConfig::default()
        };
        let err = grammar.compile().unwrap_err();
        assert!(err.to_string().contains("3 capture groups"));
    }

    #[test]
    fn test_heading_regex_is_case_insensitive() {
        let compiled = GrammarConfig::default().compile().unwrap();
        assert!(compiled.heading.is_match("bab ii Tinjauan Pustaka"));
        assert!(compiled.heading.is_match("BAB II TINJAUAN PUSTAKA"));
    }

    #[test]
    fn test_heading_regex_requires_numeral_and_title() {
        let compiled = GrammarConfig::default().compile().unwrap();
        assert!(!compiled.heading.is_match("BAB II"));
        assert!(!compiled.heading.is_match("BABBLE II TITLE"));
        assert!(compiled.keyword_prefix.is_match("BAB II"));
        assert!(!compiled.keyword_prefix.is_match("BABBLE II TITLE"));
    }

    #[test]
    fn test_keyword_is_escaped() {
        let grammar = GrammarConfig {
            heading_keyword: "BAB.".to_string(),
            ..GrammarConfig::default()
        };
        let compiled = grammar.compile().unwrap();
        assert!(compiled.heading.is_match("BAB. I PENDAHULUAN"));
        // The dot must not act as a wildcard
        assert!(!compiled.heading.is_match("BABX I PENDAHULUAN"));
    }

    #[test]
    fn test_proposal_preset() {
        let grammar = GrammarConfig::proposal();
        assert!(grammar
            .required_titles
            .iter()
            .any(|t| t == "TINJAUAN PUSTAKA"));
    }

    #[test]
    fn test_style_config_defaults() {
        let styles = StyleConfig::default();
        assert!(styles.heading.bold);
        assert!(styles.heading_centered);
        assert!(!styles.body.bold);
        assert_eq!(styles.body.font_family, "Times New Roman");
    }

    #[test]
    fn test_grammar_config_serde_defaults() {
        let grammar: GrammarConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(grammar.heading_keyword, "BAB");
        assert_eq!(grammar.subsection_pattern, DEFAULT_SUBSECTION_PATTERN);
    }
}
