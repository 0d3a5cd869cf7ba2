use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::ExtractionError;

/// Extracts body paragraphs from a `.docx`, one paragraph per line.
/// Table cells, headers and footers are not part of the output.
pub fn extract_docx_text(docx_bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx =
        docx_rs::read_docx(docx_bytes).map_err(|e| ExtractionError::DocxParsing(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            // Mail addresses are commonly wrapped in hyperlinks.
            ParagraphChild::Hyperlink(link) => text.push_str(&paragraph_text(&link.children)),
            _ => {}
        }
    }
    text
}
