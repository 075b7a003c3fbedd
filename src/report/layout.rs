//! Pure page layout for PDF export.
//!
//! Turns a block sequence into positioned text spans on fixed-size pages.
//! No PDF types here; the renderer just draws what this module decides.
//! The same wrapping routine produces both the measurement used for page
//! break decisions and the lines actually emitted, so a block can never
//! measure as fitting and then overflow when drawn.

use crate::report::blocks::{strip_bold, Block};

/// US Letter geometry and type metrics, in points.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    /// Average glyph advance as a fraction of the font size. Helvetica
    /// body text averages close to half an em.
    pub glyph_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin: 48.0,
            glyph_width: 0.5,
        }
    }
}

impl LayoutConfig {
    fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    fn max_chars(&self, size: f32, x_offset: f32) -> usize {
        let usable = self.content_width() - x_offset;
        ((usable / (size * self.glyph_width)).floor() as usize).max(1)
    }
}

/// A positioned run of text. `y` is measured down from the page top.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub spans: Vec<TextSpan>,
    /// Horizontal rule positions, measured down from the page top.
    pub rules: Vec<f32>,
}

const RULE_HEIGHT: f32 = 12.0;
const LINE_SPACING: f32 = 1.35;

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 18.0,
        2 => 14.0,
        _ => 12.0,
    }
}

const BODY_SIZE: f32 = 10.0;

struct Paginator<'a> {
    cfg: &'a LayoutConfig,
    pages: Vec<Page>,
    cursor: f32,
}

impl<'a> Paginator<'a> {
    fn new(cfg: &'a LayoutConfig) -> Self {
        Self {
            cfg,
            pages: vec![Page::default()],
            cursor: cfg.margin,
        }
    }

    fn remaining(&self) -> f32 {
        self.cfg.page_height - self.cfg.margin - self.cursor
    }

    fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = self.cfg.margin;
    }

    fn ensure_room(&mut self, height: f32) {
        if height > self.remaining() && self.cursor > self.cfg.margin {
            self.break_page();
        }
    }

    fn emit_lines(&mut self, lines: &[String], x: f32, size: f32, bold: bool) {
        let line_height = size * LINE_SPACING;
        for line in lines {
            if line_height > self.remaining() {
                self.break_page();
            }
            let page = self.pages.last_mut().unwrap();
            page.spans.push(TextSpan {
                x: self.cfg.margin + x,
                y: self.cursor,
                size,
                bold,
                text: line.clone(),
            });
            self.cursor += line_height;
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, text } => {
                let size = heading_size(*level);
                let lines = wrap_text(text, self.cfg.max_chars(size, 0.0));
                self.ensure_room(lines.len() as f32 * size * LINE_SPACING + 4.0);
                self.emit_lines(&lines, 0.0, size, true);
                self.cursor += 4.0;
            }
            Block::Bullet { indent, text } => {
                let x = *indent as f32 * 3.0;
                let hang = 10.0;
                let lines =
                    wrap_text(text, self.cfg.max_chars(BODY_SIZE, x + hang));
                self.ensure_room(lines.len() as f32 * BODY_SIZE * LINE_SPACING);
                for (i, line) in lines.iter().enumerate() {
                    let rendered = if i == 0 {
                        format!("\u{2022} {line}")
                    } else {
                        line.clone()
                    };
                    let x_line = if i == 0 { x } else { x + hang };
                    self.emit_lines(
                        std::slice::from_ref(&rendered),
                        x_line,
                        BODY_SIZE,
                        false,
                    );
                }
            }
            Block::Paragraph(text) => {
                let lines = wrap_text(text, self.cfg.max_chars(BODY_SIZE, 0.0));
                self.ensure_room(lines.len() as f32 * BODY_SIZE * LINE_SPACING);
                self.emit_lines(&lines, 0.0, BODY_SIZE, false);
                self.cursor += 2.0;
            }
            Block::Rule => {
                self.ensure_room(RULE_HEIGHT);
                let y = self.cursor + RULE_HEIGHT / 2.0;
                self.pages.last_mut().unwrap().rules.push(y);
                self.cursor += RULE_HEIGHT;
            }
        }
    }
}

/// Lay blocks out onto pages. An optional stamp line (for example a
/// generation date) is appended after the content in small type.
pub fn paginate(
    blocks: &[Block],
    cfg: &LayoutConfig,
    stamp: Option<&str>,
) -> Vec<Page> {
    let mut paginator = Paginator::new(cfg);
    for block in blocks {
        paginator.block(block);
    }
    if let Some(stamp) = stamp {
        paginator.cursor += 6.0;
        let lines = wrap_text(stamp, cfg.max_chars(8.0, 0.0));
        paginator.ensure_room(lines.len() as f32 * 8.0 * LINE_SPACING);
        paginator.emit_lines(&lines, 0.0, 8.0, false);
    }
    paginator.pages
}

/// Greedy word wrap. Words longer than the limit are hard-split rather
/// than overflowing the measure.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let text = strip_bold(text);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn body_block(words: usize) -> Block {
        Block::Paragraph(vec!["word"; words].join(" "))
    }

    #[test]
    fn wrap_respects_the_character_limit() {
        let lines = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        for line in &lines {
            assert!(line.chars().count() <= 11);
        }
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        let lines = wrap_text("supercalifragilistic", 8);
        assert_eq!(lines, vec!["supercal", "ifragili", "stic"]);
    }

    #[test]
    fn wrap_of_empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 20), vec![String::new()]);
    }

    #[test]
    fn single_page_when_content_fits() {
        let blocks = vec![
            Block::Heading {
                level: 1,
                text: "Title".to_string(),
            },
            body_block(10),
        ];
        let pages = paginate(&blocks, &LayoutConfig::default(), None);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn long_content_breaks_onto_more_pages() {
        let blocks: Vec<Block> = (0..200).map(|_| body_block(12)).collect();
        let pages = paginate(&blocks, &LayoutConfig::default(), None);
        assert!(pages.len() > 1);
        for page in &pages {
            assert!(!page.spans.is_empty());
        }
    }

    #[test]
    fn spans_never_run_past_the_bottom_margin() {
        let cfg = LayoutConfig::default();
        let blocks: Vec<Block> = (0..150)
            .map(|i| {
                if i % 10 == 0 {
                    Block::Heading {
                        level: 2,
                        text: "Section heading".to_string(),
                    }
                } else {
                    body_block(20)
                }
            })
            .collect();
        for page in paginate(&blocks, &cfg, None) {
            for span in &page.spans {
                assert!(span.y + span.size <= cfg.page_height - cfg.margin + 0.01);
                assert!(span.y >= cfg.margin);
            }
        }
    }

    #[test]
    fn oversized_block_spills_line_by_line_instead_of_vanishing() {
        let blocks = vec![body_block(2000)];
        let cfg = LayoutConfig::default();
        let pages = paginate(&blocks, &cfg, None);
        assert!(pages.len() > 1);
        let total_words: usize = pages
            .iter()
            .flat_map(|p| &p.spans)
            .map(|s| s.text.split_whitespace().count())
            .sum();
        assert_eq!(total_words, 2000);
    }

    #[test]
    fn stamp_is_appended_after_content() {
        let blocks = vec![body_block(5)];
        let pages = paginate(
            &blocks,
            &LayoutConfig::default(),
            Some("Generated on 2025-01-15"),
        );
        let last = pages.last().unwrap().spans.last().unwrap();
        assert_eq!(last.text, "Generated on 2025-01-15");
        assert!(last.size < BODY_SIZE);
    }

    #[test]
    fn bullets_indent_and_hang_wrap() {
        let cfg = LayoutConfig {
            page_width: 200.0,
            ..LayoutConfig::default()
        };
        let blocks = vec![Block::Bullet {
            indent: 2,
            text: "a fairly long bullet line that must wrap onto another line"
                .to_string(),
        }];
        let pages = paginate(&blocks, &cfg, None);
        let spans = &pages[0].spans;
        assert!(spans.len() >= 2);
        assert!(spans[0].text.starts_with("\u{2022} "));
        assert!(spans[1].x > spans[0].x);
    }
}
