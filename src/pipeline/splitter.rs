use anyhow::Result;

use crate::cli::DocumentType;
use crate::model::Section;
use crate::pipeline::patterns::HeaderPatterns;

/// Splits raw document text into header-delimited sections. Total over
/// any input: malformed text degrades to a single header-less section,
/// never an error.
#[derive(Debug)]
pub struct SectionSplitter {
    patterns: HeaderPatterns,
}

struct OpenSection {
    header: Option<String>,
    start: usize,
    body_start: usize,
}

impl SectionSplitter {
    pub fn new(document_type: Option<DocumentType>) -> Result<Self> {
        Ok(Self {
            patterns: HeaderPatterns::new(document_type)?,
        })
    }

    /// Empty input returns exactly one empty section; the chunker follows
    /// the same single-element convention.
    pub fn split(&self, text: &str) -> Vec<Section> {
        if text.is_empty() {
            return vec![Section {
                header: None,
                body: String::new(),
                start_offset: 0,
                end_offset: 0,
            }];
        }

        // Byte position of every char boundary, so char offsets can be
        // sliced back out of the input.
        let boundaries = char_boundaries(text);
        let total_chars = boundaries.len() - 1;

        let mut sections = Vec::new();
        let mut open = OpenSection {
            header: None,
            start: 0,
            body_start: 0,
        };

        let mut line_start = 0usize;
        for line in text.split('\n') {
            let line_chars = line.chars().count();
            let line_end = (line_start + line_chars + 1).min(total_chars);

            if self.patterns.is_header_line(line) {
                // The implicit leading section is only emitted when there
                // is text in front of the first header.
                if open.header.is_some() || line_start > open.start {
                    sections.push(close_section(text, &boundaries, &open, line_start));
                }
                open = OpenSection {
                    header: Some(line.trim().to_string()),
                    start: line_start,
                    body_start: line_end,
                };
            }

            line_start = line_end;
        }

        sections.push(close_section(text, &boundaries, &open, total_chars));
        sections
    }
}

fn close_section(text: &str, boundaries: &[usize], open: &OpenSection, end: usize) -> Section {
    let body_start = open.body_start.min(end);

    Section {
        header: open.header.clone(),
        body: text[boundaries[body_start]..boundaries[end]].to_string(),
        start_offset: open.start,
        end_offset: end,
    }
}

pub fn char_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    boundaries.push(text.len());
    boundaries
}
