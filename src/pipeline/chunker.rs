use crate::model::Chunk;
use crate::pipeline::splitter::char_boundaries;

#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Character budget per chunk, measured over the chunk's own span.
    pub target_chunk_size: usize,
    /// Prefix each chunk after the first with a word-aligned tail of the
    /// previous chunk, at most a tenth of the budget.
    pub preserve_context: bool,
}

/// Fraction of `target_chunk_size` the context overlap may occupy.
const OVERLAP_DIVISOR: usize = 10;

/// Splits filtered text into paragraph-aligned chunks. Chunks are
/// contiguous character spans of the input (the separator after a chunk's
/// last paragraph belongs to that chunk), so concatenating span texts
/// reproduces the input exactly. A paragraph is only ever alone in a
/// chunk when it exceeds the budget by itself; it is never cut mid-way.
pub fn chunk(text: &str, options: &ChunkOptions) -> Vec<Chunk> {
    let boundaries = char_boundaries(text);
    let total_chars = boundaries.len() - 1;

    if total_chars <= options.target_chunk_size {
        return vec![Chunk {
            text: text.to_string(),
            index: 0,
            start_offset: 0,
            end_offset: total_chars,
            has_overlap: false,
        }];
    }

    let paragraphs = paragraph_spans(text);
    if paragraphs.is_empty() {
        return vec![Chunk {
            text: text.to_string(),
            index: 0,
            start_offset: 0,
            end_offset: total_chars,
            has_overlap: false,
        }];
    }

    // Greedy accumulation: a group's size runs from its first paragraph's
    // start to the candidate paragraph's end.
    let mut groups: Vec<(usize, usize)> = Vec::new();
    let mut group_start: Option<usize> = None;
    let mut group_end = 0usize;

    for &(para_start, para_end) in &paragraphs {
        match group_start {
            None => {
                group_start = Some(para_start);
                group_end = para_end;
            }
            Some(start) => {
                if para_end - start <= options.target_chunk_size {
                    group_end = para_end;
                } else {
                    groups.push((start, group_end));
                    group_start = Some(para_start);
                    group_end = para_end;
                }
            }
        }
    }
    if let Some(start) = group_start {
        groups.push((start, group_end));
    }

    // Contiguous spans: each chunk ends where the next group's content
    // starts; the last runs to end of text.
    let mut chunks = Vec::with_capacity(groups.len());
    let mut span_start = 0usize;

    for index in 0..groups.len() {
        let span_end = match groups.get(index + 1) {
            Some(&(next_start, _)) => next_start,
            None => total_chars,
        };

        let slice = &text[boundaries[span_start]..boundaries[span_end]];
        let overlap = if options.preserve_context && index > 0 {
            let previous: &Chunk = &chunks[index - 1];
            let previous_slice =
                &text[boundaries[previous.start_offset]..boundaries[previous.end_offset]];
            overlap_tail(previous_slice, options.target_chunk_size / OVERLAP_DIVISOR)
        } else {
            String::new()
        };

        chunks.push(Chunk {
            has_overlap: !overlap.is_empty(),
            text: format!("{overlap}{slice}"),
            index,
            start_offset: span_start,
            end_offset: span_end,
        });

        span_start = span_end;
    }

    chunks
}

/// (start, end) char spans of blank-line-separated paragraphs; the span
/// excludes the trailing line break.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    let mut line_start = 0usize;
    for line in text.split('\n') {
        let line_chars = line.chars().count();
        let line_end = line_start + line_chars;

        if line.trim().is_empty() {
            if let Some(span) = current.take() {
                spans.push(span);
            }
        } else {
            current = match current {
                None => Some((line_start, line_end)),
                Some((start, _)) => Some((start, line_end)),
            };
        }

        line_start = line_end + 1;
    }
    if let Some(span) = current {
        spans.push(span);
    }

    spans
}

/// Word-aligned tail of `previous`, at most `budget` characters. Starts
/// after the first whitespace inside the raw tail so a word is never cut
/// in half.
fn overlap_tail(previous: &str, budget: usize) -> String {
    if budget == 0 {
        return String::new();
    }

    let chars: Vec<char> = previous.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let mut start = chars.len().saturating_sub(budget);
    if start > 0 && !chars[start - 1].is_whitespace() {
        while start < chars.len() && !chars[start].is_whitespace() {
            start += 1;
        }
    }
    while start < chars.len() && chars[start].is_whitespace() {
        start += 1;
    }

    chars[start..].iter().collect()
}
