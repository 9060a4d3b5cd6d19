//! Chapter heading extraction.

use unicode_normalization::UnicodeNormalization;

use crate::config::CompiledGrammar;
use crate::numeral::roman_to_int;
use crate::types::{
    Block, ChapterRecord, ContentRange, Severity, StructuralViolation, SubsectionRecord,
    ViolationKind,
};

/// Scan the block sequence for chapter headings.
///
/// A block is a chapter heading when its NFC-normalized, trimmed text
/// matches the heading grammar and the numeral token converts. Matching is
/// case-insensitive, so titles are captured in their original casing rather
/// than from an upper-cased copy.
///
/// A failed numeral conversion makes the block ordinary content. Only when
/// the grammar sets `require_keyword` does a keyword-prefixed block that
/// fails to parse produce a `MalformedChapterHeader` warning.
///
/// Returns records ordered by position (the scan order guarantees this).
pub fn extract_chapters(
    blocks: &[Block],
    grammar: &CompiledGrammar,
) -> (Vec<ChapterRecord>, Vec<StructuralViolation>) {
    let mut chapters = Vec::new();
    let mut violations = Vec::new();

    for (position, block) in blocks.iter().enumerate() {
        let trimmed = block.trimmed_text();
        let normalized: String = trimmed.nfc().collect();

        let Some(caps) = grammar.heading.captures(&normalized) else {
            if grammar.require_keyword && grammar.keyword_prefix.is_match(&normalized) {
                violations.push(
                    StructuralViolation::new(
                        ViolationKind::MalformedChapterHeader,
                        Severity::Warning,
                        format!(
                            "Block {position} starts with '{}' but does not match the chapter heading grammar",
                            grammar.keyword
                        ),
                    )
                    .at_chapter(position),
                );
            }
            continue;
        };

        // Group 1 is the numeral token, group 2 the remainder-as-title
        let token = caps[1].to_uppercase();
        let title = caps[2].trim().to_string();

        match roman_to_int(&token) {
            Ok(chapter_number) => {
                tracing::debug!(position, numeral = %token, %title, "chapter heading found");
                chapters.push(ChapterRecord {
                    position,
                    roman_numeral: token,
                    chapter_number,
                    title,
                    subsections: Vec::new(),
                });
            }
            Err(_) if grammar.require_keyword => {
                violations.push(
                    StructuralViolation::new(
                        ViolationKind::MalformedChapterHeader,
                        Severity::Warning,
                        format!(
                            "Block {position} starts with '{}' but '{}' is not a valid Roman numeral",
                            grammar.keyword, &caps[1]
                        ),
                    )
                    .at_chapter(position),
                );
            }
            Err(_) => {} // ordinary content
        }
    }

    (chapters, violations)
}

/// Attribute subsection headings to the chapter whose content range
/// contains them.
pub(crate) fn attach_subsections(
    chapters: &mut [ChapterRecord],
    boundaries: &[ContentRange],
    blocks: &[Block],
    grammar: &CompiledGrammar,
) {
    for (chapter, range) in chapters.iter_mut().zip(boundaries) {
        for position in range.start..range.end {
            let trimmed = blocks[position].trimmed_text();
            if let Some(caps) = grammar.subsection.captures(&trimmed) {
                chapter.subsections.push(SubsectionRecord {
                    position,
                    label: format!("{}.{}", &caps[1], &caps[2]),
                    title: caps[3].to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GrammarConfig;
    use pretty_assertions::assert_eq;

    fn compiled(require_keyword: bool) -> CompiledGrammar {
        GrammarConfig {
            require_keyword,
            ..GrammarConfig::default()
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn test_extracts_chapters_in_scan_order() {
        let blocks = vec![
            Block::paragraph("BAB III METODE PENELITIAN"),
            Block::paragraph("isi bab tiga"),
            Block::paragraph("BAB I PENDAHULUAN"),
        ];

        let (chapters, violations) = extract_chapters(&blocks, &compiled(false));

        assert!(violations.is_empty());
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].position, 0);
        assert_eq!(chapters[0].chapter_number, 3);
        assert_eq!(chapters[0].roman_numeral, "III");
        assert_eq!(chapters[1].position, 2);
        assert_eq!(chapters[1].chapter_number, 1);
    }

    #[test]
    fn test_title_keeps_original_casing() {
        let blocks = vec![Block::paragraph("Bab ii Tinjauan Pustaka")];
        let (chapters, _) = extract_chapters(&blocks, &compiled(false));

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].title, "Tinjauan Pustaka");
        // The numeral token is normalized regardless of input casing
        assert_eq!(chapters[0].roman_numeral, "II");
    }

    #[test]
    fn test_invalid_numeral_is_ordinary_content() {
        let blocks = vec![Block::paragraph("BAB Z UNKNOWN")];
        let (chapters, violations) = extract_chapters(&blocks, &compiled(false));

        assert!(chapters.is_empty());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_invalid_numeral_warns_when_keyword_is_mandatory() {
        let blocks = vec![Block::paragraph("BAB Z UNKNOWN")];
        let (chapters, violations) = extract_chapters(&blocks, &compiled(true));

        assert!(chapters.is_empty());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MalformedChapterHeader);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].chapter_position, Some(0));
        assert!(violations[0].message.contains("'Z'"));
    }

    #[test]
    fn test_keyword_prefix_without_grammar_match_warns_when_mandatory() {
        // "BAB II" alone has no title, so the full grammar never matches
        let blocks = vec![Block::paragraph("BAB II")];

        let (_, silent) = extract_chapters(&blocks, &compiled(false));
        assert!(silent.is_empty());

        let (_, warned) = extract_chapters(&blocks, &compiled(true));
        assert_eq!(warned.len(), 1);
        assert_eq!(warned[0].kind, ViolationKind::MalformedChapterHeader);
    }

    #[test]
    fn test_heading_match_ignores_surrounding_whitespace() {
        let blocks = vec![Block::paragraph("   BAB IV HASIL DAN PEMBAHASAN   ")];
        let (chapters, _) = extract_chapters(&blocks, &compiled(false));

        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].chapter_number, 4);
        assert_eq!(chapters[0].title, "HASIL DAN PEMBAHASAN");
    }

    #[test]
    fn test_attach_subsections_scoped_by_range() {
        let blocks = vec![
            Block::paragraph("BAB I PENDAHULUAN"),
            Block::paragraph("1.1 Latar Belakang"),
            Block::paragraph("isi"),
            Block::paragraph("1.2 Rumusan Masalah"),
            Block::paragraph("BAB II TINJAUAN PUSTAKA"),
            Block::paragraph("2.1 Landasan Teori"),
        ];
        let grammar = compiled(false);
        let (mut chapters, _) = extract_chapters(&blocks, &grammar);
        let boundaries = crate::structure::resolve_boundaries(&chapters, blocks.len());

        attach_subsections(&mut chapters, &boundaries, &blocks, &grammar);

        assert_eq!(chapters[0].subsections.len(), 2);
        assert_eq!(chapters[0].subsections[0].label, "1.1");
        assert_eq!(chapters[0].subsections[0].title, "Latar Belakang");
        assert_eq!(chapters[0].subsections[1].position, 3);
        assert_eq!(chapters[1].subsections.len(), 1);
        assert_eq!(chapters[1].subsections[0].label, "2.1");
    }

    #[test]
    fn test_deep_numbering_is_not_a_subsection() {
        let blocks = vec![
            Block::paragraph("BAB I PENDAHULUAN"),
            Block::paragraph("1.1.1 Too Deep"),
        ];
        let grammar = compiled(false);
        let (mut chapters, _) = extract_chapters(&blocks, &grammar);
        let boundaries = crate::structure::resolve_boundaries(&chapters, blocks.len());

        attach_subsections(&mut chapters, &boundaries, &blocks, &grammar);

        assert!(chapters[0].subsections.is_empty());
    }
}
