//! Token substitution over paragraphs and nested tables.
//!
//! A token is replaced only where its literal text sits inside one
//! contiguous run. A token split across adjacent runs by mid-token styling
//! is not matched; templates are authored with each token typed in a single
//! run, and merging runs would reassign formatting between them.

use log::trace;

use crate::document::{Block, Document, Paragraph};
use crate::tokens::TokenMap;

/// Applies a token map to a document in place.
///
/// Walks the body paragraphs, then every table row and cell, recursing into
/// tables nested inside cells at any depth. Returns the number of runs that
/// received a replacement; zero is not an error, the document is simply left
/// unchanged.
pub fn substitute(document: &mut Document, tokens: &TokenMap) -> usize {
    substitute_blocks(&mut document.body, tokens)
}

fn substitute_blocks(blocks: &mut [Block], tokens: &TokenMap) -> usize {
    let mut replaced = 0;
    for block in blocks {
        match block {
            Block::Paragraph(paragraph) => {
                replaced += substitute_paragraph(paragraph, tokens);
            }
            Block::Table(table) => {
                for row in &mut table.rows {
                    for cell in &mut row.cells {
                        replaced += substitute_blocks(&mut cell.blocks, tokens);
                    }
                }
            }
        }
    }
    replaced
}

fn substitute_paragraph(paragraph: &mut Paragraph, tokens: &TokenMap) -> usize {
    let mut replaced = 0;
    for (token, replacement) in tokens {
        // Cheap paragraph-level check before touching individual runs.
        if !paragraph.text().contains(token.as_str()) {
            continue;
        }
        for run in &mut paragraph.runs {
            if run.text.contains(token.as_str()) {
                run.text = run.text.replace(token.as_str(), &replacement.text);
                if let Some(points) = replacement.font_size {
                    run.size = Some(points);
                }
                trace!("replaced {} in run", token);
                replaced += 1;
            }
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Run, Table, TableCell, TableRow};
    use crate::tokens::Replacement;
    use indexmap::IndexMap;

    fn map(entries: &[(&str, &str, Option<f32>)]) -> TokenMap {
        entries
            .iter()
            .map(|(token, text, font_size)| {
                (
                    token.to_string(),
                    Replacement { text: text.to_string(), font_size: *font_size },
                )
            })
            .collect::<IndexMap<_, _>>()
    }

    fn paragraph(texts: &[&str]) -> Block {
        Block::Paragraph(Paragraph::from_runs(
            texts.iter().map(|t| Run::text(*t)).collect(),
        ))
    }

    #[test]
    fn replaces_tokens_in_body_paragraphs() {
        let mut doc = Document {
            body: vec![paragraph(&["Otorgado a {{NOMBRE}} {{APELLIDOS}}"])],
        };
        let n = substitute(
            &mut doc,
            &map(&[("{{NOMBRE}}", "Ana", None), ("{{APELLIDOS}}", "García", None)]),
        );
        assert_eq!(n, 2);
        let Block::Paragraph(p) = &doc.body[0] else { panic!() };
        assert_eq!(p.text(), "Otorgado a Ana García");
    }

    #[test]
    fn reaches_tokens_in_tables_nested_two_levels_deep() {
        let inner = Table {
            rows: vec![TableRow {
                cells: vec![TableCell {
                    blocks: vec![paragraph(&["Nº {{NºTITULO}}"])],
                }],
            }],
        };
        let outer = Table {
            rows: vec![TableRow {
                cells: vec![TableCell { blocks: vec![Block::Table(inner)] }],
            }],
        };
        let mut doc = Document { body: vec![Block::Table(outer)] };
        let n = substitute(&mut doc, &map(&[("{{NºTITULO}}", "2024-117", None)]));
        assert_eq!(n, 1);
        let Block::Table(outer) = &doc.body[0] else { panic!() };
        let Block::Table(inner) = &outer.rows[0].cells[0].blocks[0] else {
            panic!()
        };
        let Block::Paragraph(p) = &inner.rows[0].cells[0].blocks[0] else {
            panic!()
        };
        assert_eq!(p.text(), "Nº 2024-117");
    }

    #[test]
    fn font_size_override_only_touches_the_run_that_matched() {
        let mut doc = Document {
            body: vec![paragraph(&["{{NOMBRE}}", " — ", "{{DNI}}"])],
        };
        substitute(
            &mut doc,
            &map(&[("{{NOMBRE}}", "Ana", Some(37.0)), ("{{DNI}}", "123", None)]),
        );
        let Block::Paragraph(p) = &doc.body[0] else { panic!() };
        assert_eq!(p.runs[0].size, Some(37.0));
        assert_eq!(p.runs[1].size, None);
        assert_eq!(p.runs[2].size, None);
    }

    #[test]
    fn token_split_across_runs_is_not_matched() {
        // Known limitation, preserved: the paragraph text contains the token
        // but no single run does, so nothing is replaced.
        let mut doc = Document { body: vec![paragraph(&["{{NOM", "BRE}}"])] };
        let n = substitute(&mut doc, &map(&[("{{NOMBRE}}", "Ana", None)]));
        assert_eq!(n, 0);
        let Block::Paragraph(p) = &doc.body[0] else { panic!() };
        assert_eq!(p.text(), "{{NOMBRE}}");
    }

    #[test]
    fn zero_matches_leaves_the_document_unchanged() {
        let mut doc = Document {
            body: vec![paragraph(&["Texto fijo sin marcadores"])],
        };
        let before = doc.clone();
        let n = substitute(&mut doc, &map(&[("{{NOMBRE}}", "Ana", Some(37.0))]));
        assert_eq!(n, 0);
        assert_eq!(doc, before);
    }

    #[test]
    fn substitution_is_idempotent_across_fresh_copies() {
        let template = Document {
            body: vec![paragraph(&["{{NOMBRE}} — {{FECHA}}"])],
        };
        let tokens =
            map(&[("{{NOMBRE}}", "Ana", Some(37.0)), ("{{FECHA}}", "05/03/2024", None)]);
        let mut first = template.clone();
        let mut second = template.clone();
        substitute(&mut first, &tokens);
        substitute(&mut second, &tokens);
        assert_eq!(first, second);
    }

    #[test]
    fn repeated_occurrences_in_one_run_are_all_replaced() {
        let mut doc = Document { body: vec![paragraph(&["{{DNI}} / {{DNI}}"])] };
        substitute(&mut doc, &map(&[("{{DNI}}", "123", None)]));
        let Block::Paragraph(p) = &doc.body[0] else { panic!() };
        assert_eq!(p.text(), "123 / 123");
    }
}
