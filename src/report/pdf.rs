//! PDF rendering over the pure layout.
//!
//! Everything interesting happens before this file: the builder produces
//! markdown, the block parser tags it, and the paginator positions it.
//! This module only prepares display text (sanitization, link-aware
//! sources) and draws spans with lopdf.

use crate::core::{Dossier, SafetyPaysCalculation};
use crate::errors::{DossierError, Result};
use crate::report::blocks::{parse_blocks, Block};
use crate::report::builder::{build_report, format_number, group_thousands};
use crate::report::layout::{paginate, LayoutConfig, Page};
use crate::report::sanitize::sanitize_text;
use crate::report::sources::SourceRef;
use chrono::NaiveDate;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use std::fs;
use std::path::Path;

/// Render a dossier's full report to PDF bytes. `generated_on` feeds the
/// footer stamp and nothing else; report content stays deterministic.
pub fn render_dossier_pdf(dossier: &Dossier, generated_on: NaiveDate) -> Result<Vec<u8>> {
    let markdown = match &dossier.full_report_text {
        Some(text) if !text.trim().is_empty() => text.clone(),
        _ => build_report(dossier),
    };
    let blocks = prepare_display_blocks(&parse_blocks(&markdown));
    let stamp = format!("Generated on {generated_on}");
    let pages = paginate(&blocks, &LayoutConfig::default(), Some(&stamp));
    render_pages(&pages)
}

pub fn write_dossier_pdf(
    dossier: &Dossier,
    generated_on: NaiveDate,
    path: &Path,
) -> Result<()> {
    let bytes = render_dossier_pdf(dossier, generated_on)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Render a Safety Pays breakdown to PDF bytes.
pub fn render_safety_pays_pdf(
    company_name: &str,
    calc: &SafetyPaysCalculation,
) -> Result<Vec<u8>> {
    let blocks = safety_pays_blocks(company_name, calc);
    let pages = paginate(&blocks, &LayoutConfig::default(), None);
    render_pages(&pages)
}

pub fn write_safety_pays_pdf(
    company_name: &str,
    calc: &SafetyPaysCalculation,
    path: &Path,
) -> Result<()> {
    let bytes = render_safety_pays_pdf(company_name, calc)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Blocks for the Safety Pays export document.
pub fn safety_pays_blocks(company_name: &str, calc: &SafetyPaysCalculation) -> Vec<Block> {
    let mut blocks = vec![
        Block::Heading {
            level: 1,
            text: "Safety Pays Cost Calculator Report".to_string(),
        },
        Block::Paragraph(format!("Company: {company_name}")),
        Block::Paragraph(format!("Calculation date: {}", calc.calculation_date)),
        Block::Rule,
        Block::Heading {
            level: 2,
            text: "Selected Injuries".to_string(),
        },
    ];
    for injury in &calc.selected_injuries_breakdown {
        blocks.push(Block::Bullet {
            indent: 0,
            text: format!(
                "{} x{}: direct ${}, indirect ${}, total ${}",
                injury.label,
                injury.count,
                group_thousands(injury.direct_cost),
                group_thousands(injury.indirect_cost),
                group_thousands(injury.total_cost)
            ),
        });
    }
    blocks.push(Block::Rule);
    blocks.push(Block::Heading {
        level: 2,
        text: "Totals".to_string(),
    });
    blocks.push(Block::Bullet {
        indent: 0,
        text: format!(
            "Total direct costs: ${}",
            group_thousands(calc.total_direct_costs)
        ),
    });
    blocks.push(Block::Bullet {
        indent: 0,
        text: format!(
            "Total indirect costs: ${}",
            group_thousands(calc.total_indirect_costs)
        ),
    });
    blocks.push(Block::Bullet {
        indent: 0,
        text: format!(
            "Combined total cost: ${}",
            group_thousands(calc.combined_total_cost)
        ),
    });
    blocks.push(Block::Bullet {
        indent: 0,
        text: format!(
            "Profit margin used: {}%",
            format_number(calc.profit_margin_used)
        ),
    });
    blocks.push(Block::Bullet {
        indent: 0,
        text: format!(
            "Sales needed to cover costs: ${}",
            format_number((calc.sales_needed_to_cover * 100.0).round() / 100.0)
        ),
    });
    blocks
}

/// Sanitize body text for display, except in the Sources section where
/// entries get link-aware rendering instead of URL stripping.
pub fn prepare_display_blocks(blocks: &[Block]) -> Vec<Block> {
    let mut prepared = Vec::with_capacity(blocks.len());
    let mut in_sources = false;
    for block in blocks {
        match block {
            Block::Heading { level, text } => {
                in_sources = text.contains("Sources & References");
                prepared.push(Block::Heading {
                    level: *level,
                    text: sanitize_text(text),
                });
            }
            Block::Bullet { indent, text } => {
                let text = if in_sources {
                    source_display_line(text)
                } else {
                    sanitize_text(text)
                };
                prepared.push(Block::Bullet {
                    indent: *indent,
                    text,
                });
            }
            Block::Paragraph(text) => {
                prepared.push(Block::Paragraph(sanitize_text(text)));
            }
            Block::Rule => prepared.push(Block::Rule),
        }
    }
    prepared
}

fn source_display_line(source: &str) -> String {
    let source_ref = SourceRef::classify(source);
    match source_ref.href() {
        Some(href) if matches!(source_ref, SourceRef::Bare(_)) => href,
        Some(href) => format!("{} ({href})", source_ref.label()),
        None => sanitize_text(source),
    }
}

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";

/// Draw positioned pages into a PDF document.
pub fn render_pages(pages: &[Page]) -> Result<Vec<u8>> {
    let cfg = LayoutConfig::default();
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular_id,
            FONT_BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, &cfg);
        let encoded = content
            .encode()
            .map_err(|e| DossierError::Store(format!("pdf content encoding: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                cfg.page_width.into(),
                cfg.page_height.into(),
            ],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| DossierError::Store(format!("pdf serialization: {e}")))?;
    Ok(bytes)
}

fn page_content(page: &Page, cfg: &LayoutConfig) -> Content {
    let mut operations = Vec::new();
    for span in &page.spans {
        let font = if span.bold { FONT_BOLD } else { FONT_REGULAR };
        // Layout measures y down from the top; PDF user space grows up.
        let baseline = cfg.page_height - span.y - span.size;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![font.into(), span.size.into()],
        ));
        operations.push(Operation::new(
            "Td",
            vec![span.x.into(), baseline.into()],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&span.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    for &rule_y in &page.rules {
        let y = cfg.page_height - rule_y;
        operations.push(Operation::new("w", vec![0.5.into()]));
        operations.push(Operation::new(
            "m",
            vec![cfg.margin.into(), y.into()],
        ));
        operations.push(Operation::new(
            "l",
            vec![(cfg.page_width - cfg.margin).into(), y.into()],
        ));
        operations.push(Operation::new("S", vec![]));
    }
    Content { operations }
}

/// Map text to WinAnsi bytes. Characters outside the encoding (emoji in
/// section titles) are dropped rather than rendered as garbage.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2022}' => bytes.push(0x95),
            '\u{2018}' => bytes.push(0x91),
            '\u{2019}' => bytes.push(0x92),
            '\u{201c}' => bytes.push(0x93),
            '\u{201d}' => bytes.push(0x94),
            '\u{2013}' => bytes.push(0x96),
            '\u{2014}' => bytes.push(0x97),
            c if (c as u32) < 0x100 => bytes.push(c as u8),
            _ => {}
        }
    }
    bytes
}
