use anyhow::Result;
use tracing::info;

use crate::cli::ChunkArgs;
use crate::model::ChunkListing;
use crate::pipeline::{ChunkOptions, FilterOptions, RelevanceFilter, SectionSplitter, chunk};
use crate::util::{emit_json, read_text_file};

pub fn run(args: ChunkArgs) -> Result<()> {
    let text = read_text_file(&args.input)?;

    let splitter = SectionSplitter::new(args.document_type)?;
    let filter = RelevanceFilter::new()?;
    let filter_options = FilterOptions {
        preserve_headers: args.preserve_headers,
        document_type: args.document_type,
    };
    let chunk_options = ChunkOptions {
        target_chunk_size: args.target_chunk_size,
        preserve_context: args.preserve_context,
    };

    let sections = splitter.split(&text);
    let filtered = filter.filter(&sections, &filter_options);
    let chunks = chunk(&filtered.filtered_text, &chunk_options);

    info!(
        input = %args.input.display(),
        filtered_length = filtered.filtered_length,
        chunk_count = chunks.len(),
        target_chunk_size = args.target_chunk_size,
        "chunked document"
    );

    let listing = ChunkListing {
        chunk_count: chunks.len(),
        chunks,
    };
    emit_json(args.output.as_deref(), &listing)
}
