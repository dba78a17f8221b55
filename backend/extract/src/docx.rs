//! DOCX text extraction.
//!
//! Body paragraphs come first in document order, then every table row as a
//! space-joined line of cell texts.

use std::panic::{self, AssertUnwindSafe};

use docx_rs::{
    read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};
use tracing::{debug, warn};

use crate::sentinel::{DOCX_NO_TEXT, DOCX_UNREADABLE};

pub fn extract_docx(bytes: &[u8]) -> String {
    let docx = match panic::catch_unwind(AssertUnwindSafe(|| read_docx(bytes))) {
        Ok(Ok(docx)) => docx,
        Ok(Err(e)) => {
            warn!(error = %e, size = bytes.len(), "Failed to parse DOCX");
            return DOCX_UNREADABLE.to_string();
        }
        Err(_) => {
            warn!(size = bytes.len(), "DOCX parser panicked on malformed input");
            return DOCX_UNREADABLE.to_string();
        }
    };

    let mut text = String::new();
    let mut tables: Vec<&Table> = Vec::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                let line = paragraph_text(paragraph);
                if !line.trim().is_empty() {
                    text.push_str(&line);
                    text.push('\n');
                }
            }
            DocumentChild::Table(table) => tables.push(table),
            _ => {}
        }
    }

    debug!(tables = tables.len(), "Parsed DOCX");
    for table in tables {
        push_table(&mut text, table);
    }

    if text.trim().is_empty() {
        return DOCX_NO_TEXT.to_string();
    }
    text
}

// Row and cell wrappers are single-variant enums today.
#[allow(irrefutable_let_patterns)]
fn push_table(out: &mut String, table: &Table) {
    for row in &table.rows {
        if let TableChild::TableRow(row) = row {
            let cells: Vec<String> = row
                .cells
                .iter()
                .filter_map(|cell| {
                    if let TableRowChild::TableCell(cell) = cell {
                        Some(cell_text(&cell.children))
                    } else {
                        None
                    }
                })
                .collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
    }
}

fn cell_text(contents: &[TableCellContent]) -> String {
    contents
        .iter()
        .filter_map(|content| match content {
            TableCellContent::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&mut text, &paragraph.children);
    text
}

fn push_paragraph_children(out: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(out, &link.children),
            _ => {}
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use docx_rs::Docx;

    #[test]
    fn test_paragraph_text_is_newline_terminated() {
        let bytes = docx_with_paragraphs(&["Hello World"]);
        assert!(extract_docx(&bytes).contains("Hello World\n"));
    }

    #[test]
    fn test_empty_paragraphs_are_skipped() {
        let bytes = docx_with_paragraphs(&["Jane Doe", "", "   ", "Engineer"]);
        assert_eq!(extract_docx(&bytes), "Jane Doe\nEngineer\n");
    }

    #[test]
    fn test_table_cells_are_space_joined_per_row() {
        let bytes = pack(Docx::new().add_table(table(&[&["A", "B"]])));
        assert!(extract_docx(&bytes).contains("A B\n"));
    }

    #[test]
    fn test_tables_follow_paragraphs() {
        let docx = Docx::new()
            .add_table(table(&[&["Skill", "Years"], &["Rust", "5"]]))
            .add_paragraph(paragraph("Summary"));
        let text = extract_docx(&pack(docx));
        assert_eq!(text, "Summary\nSkill Years\nRust 5\n");
    }

    #[test]
    fn test_empty_document_has_no_text() {
        assert_eq!(extract_docx(&pack(Docx::new())), DOCX_NO_TEXT);
    }

    #[test]
    fn test_garbage_is_unreadable() {
        assert_eq!(extract_docx(b"PK\x03\x04 definitely not a zip"), DOCX_UNREADABLE);
        assert_eq!(extract_docx(b""), DOCX_UNREADABLE);
    }
}
