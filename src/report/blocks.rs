//! Parser for the markdown subset the report builder emits.
//!
//! Layout and rendering consume tagged blocks instead of re-scanning raw
//! markdown, so pagination decisions never depend on string prefixes
//! scattered through the renderer.

/// One logical unit of report content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`, `##`, or `###` heading. Bold markers are already stripped.
    Heading { level: u8, text: String },
    /// `- item` line; `indent` is the count of leading spaces.
    Bullet { indent: usize, text: String },
    /// Any other non-empty line, numbered list items included.
    Paragraph(String),
    /// `---` horizontal rule.
    Rule,
}

/// Parse builder output into blocks. Blank lines separate blocks and are
/// not represented.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    for line in markdown.lines() {
        let trimmed_end = line.trim_end();
        if trimmed_end.trim().is_empty() {
            continue;
        }
        if trimmed_end.trim() == "---" {
            blocks.push(Block::Rule);
            continue;
        }
        if let Some(heading) = parse_heading(trimmed_end) {
            blocks.push(heading);
            continue;
        }
        if let Some(bullet) = parse_bullet(trimmed_end) {
            blocks.push(bullet);
            continue;
        }
        blocks.push(Block::Paragraph(trimmed_end.trim_start().to_string()));
    }
    blocks
}

fn parse_heading(line: &str) -> Option<Block> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some(Block::Heading {
        level: hashes as u8,
        text: strip_bold(rest.trim()),
    })
}

fn parse_bullet(line: &str) -> Option<Block> {
    let indent = line.len() - line.trim_start().len();
    let content = line.trim_start();
    let text = content.strip_prefix("- ")?;
    Some(Block::Bullet {
        indent,
        text: text.to_string(),
    })
}

/// Remove `**` emphasis markers, keeping the text between them.
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn headings_parse_with_level_and_stripped_bold() {
        let blocks = parse_blocks("# Title\n## Section\n### **Fancy**");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::Heading {
                    level: 2,
                    text: "Section".to_string()
                },
                Block::Heading {
                    level: 3,
                    text: "Fancy".to_string()
                },
            ]
        );
    }

    #[test]
    fn bullets_keep_their_indent() {
        let blocks = parse_blocks("- top\n  - nested\n     - deep");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet {
                    indent: 0,
                    text: "top".to_string()
                },
                Block::Bullet {
                    indent: 2,
                    text: "nested".to_string()
                },
                Block::Bullet {
                    indent: 5,
                    text: "deep".to_string()
                },
            ]
        );
    }

    #[test]
    fn rules_and_blanks_and_paragraphs() {
        let blocks = parse_blocks("intro text\n\n---\n1. first point");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("intro text".to_string()),
                Block::Rule,
                Block::Paragraph("1. first point".to_string()),
            ]
        );
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        let blocks = parse_blocks("#hashtag");
        assert_eq!(blocks, vec![Block::Paragraph("#hashtag".to_string())]);
    }

    #[test]
    fn full_builder_output_round_trips_through_parser() {
        let mut dossier = crate::core::Dossier::new("Acme");
        dossier.executive_summary = Some("Summary line.".to_string());
        dossier.sources_referenced = vec!["OSHA inspection record 2023".to_string()];
        let report = crate::report::builder::build_report(&dossier);
        let blocks = parse_blocks(&report);
        assert!(matches!(
            blocks.first(),
            Some(Block::Heading { level: 1, .. })
        ));
        assert!(blocks.contains(&Block::Rule));
    }
}
