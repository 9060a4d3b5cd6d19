//! Core data types for the restructurer.
//!
//! The document model mirrors what the storage adapter delivers: an ordered
//! sequence of [`Block`]s, each holding styled [`Run`]s. Everything derived
//! from it ([`ChapterRecord`], [`StructureAnalysis`]) is a read-only
//! projection that is recomputed on every analysis call.

use serde::{Deserialize, Serialize};

/// Paragraph alignment of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// A contiguous styled text fragment within a block.
///
/// Style attributes follow inherit-when-absent semantics: `None` for
/// `font_family`/`font_size_pt` means the attribute comes from the
/// surrounding document style. Runs are immutable once read from source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f32>,

    #[serde(default)]
    pub bold: bool,

    #[serde(default)]
    pub italic: bool,

    #[serde(default)]
    pub underline: bool,
}

impl Run {
    /// Create a plain run with inherited style.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_family: None,
            font_size_pt: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }

    /// Create a run carrying an explicit text style.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: &crate::config::TextStyle) -> Self {
        Self {
            text: text.into(),
            font_family: Some(style.font_family.clone()),
            font_size_pt: Some(style.font_size_pt),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
        }
    }
}

/// The atomic ordered unit of document content (a paragraph).
///
/// Blocks are addressed by their 0-based position in the source sequence;
/// the position is not stored on the block itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub runs: Vec<Run>,

    #[serde(default)]
    pub alignment: Alignment,
}

impl Block {
    /// Create a block from a list of runs.
    #[must_use]
    pub fn new(runs: Vec<Run>, alignment: Alignment) -> Self {
        Self { runs, alignment }
    }

    /// Create a left-aligned block holding a single plain run.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            runs: vec![Run::plain(text)],
            alignment: Alignment::Left,
        }
    }

    /// Full text of the block: the concatenation of its run texts.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Block text with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }
}

/// A subsection heading found inside a chapter's content range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionRecord {
    /// 0-based block position in the source sequence.
    pub position: usize,

    /// Numbering label as written in the source (e.g., "3.1").
    pub label: String,

    /// Title text following the label.
    pub title: String,
}

/// A chapter heading discovered in the block sequence.
///
/// `chapter_number` is derived from `roman_numeral` at extraction time. It is
/// a label, not a rank: sorting chapters never reassigns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// 0-based block position of the heading in the source sequence.
    pub position: usize,

    /// Roman numeral token, upper-cased (e.g., "III").
    pub roman_numeral: String,

    /// Numeric value of the numeral.
    pub chapter_number: u32,

    /// Title in its original casing.
    pub title: String,

    /// Subsection headings found inside this chapter's content range.
    #[serde(default)]
    pub subsections: Vec<SubsectionRecord>,
}

/// Half-open block range `[start, end)` owned by a chapter.
///
/// The heading block itself is excluded: it is regenerated on rebuild, not
/// copied verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRange {
    pub start: usize,
    pub end: usize,
}

impl ContentRange {
    /// Number of blocks in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range holds no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Severity of a structural violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// Kinds of structural findings reported by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Physical chapter order differs from canonical numeric order.
    ChapterOrder,

    /// The same chapter number appears on more than one heading.
    DuplicateChapterNumber,

    /// A keyword-prefixed block failed to parse as a chapter heading.
    MalformedChapterHeader,

    /// A required chapter title was not found in the document.
    MissingChapter,
}

/// A single structural finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralViolation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,

    /// Block position of the chapter heading this finding refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter_position: Option<usize>,
}

impl StructuralViolation {
    /// Create a violation without a chapter reference.
    #[must_use]
    pub fn new(kind: ViolationKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            chapter_position: None,
        }
    }

    /// Attach the heading position this finding refers to.
    #[must_use]
    pub fn at_chapter(mut self, position: usize) -> Self {
        self.chapter_position = Some(position);
        self
    }
}

/// Complete structural diagnosis of a document snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    /// Chapters in physical (source) order; positions strictly increasing.
    pub chapters_by_position: Vec<ChapterRecord>,

    /// Chapters sorted ascending by number, stable (ties keep source order).
    pub canonical_order: Vec<ChapterRecord>,

    /// Content range per chapter, parallel to `chapters_by_position`.
    pub boundaries: Vec<ContentRange>,

    /// Whether physical order differs from canonical order.
    pub reordering_needed: bool,

    /// All structural findings, in detection order.
    pub violations: Vec<StructuralViolation>,
}

impl StructureAnalysis {
    /// Whether any finding has `Error` severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }
}

/// Options controlling a restructure run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestructureOptions {
    /// Rebuild the document in canonical chapter order when needed.
    pub reorder_chapters: bool,

    /// Skip the caller confirmation step.
    #[serde(default)]
    pub assume_confirmed: bool,
}

impl Default for RestructureOptions {
    fn default() -> Self {
        Self {
            reorder_chapters: true,
            assume_confirmed: false,
        }
    }
}

/// Outcome of a restructure run.
///
/// `new_blocks` is a freshly built sequence that shares nothing with the
/// source document; the caller decides whether and where to persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestructureResult {
    pub success: bool,

    /// Human-readable outcome description.
    pub message: String,

    /// The rebuilt block sequence. Empty when the run was rejected.
    pub new_blocks: Vec<Block>,

    /// Chapter titles in source order.
    pub original_order: Vec<String>,

    /// Chapter titles in canonical order.
    pub corrected_order: Vec<String>,

    /// One entry per change applied during the rebuild.
    pub changes_applied: Vec<String>,
}
