use anyhow::Result;
use tracing::info;

use crate::cli::PrepareArgs;
use crate::model::{PrepareManifest, PrepareOptions, PrepareStats};
use crate::pipeline::{
    ChunkOptions, FilterOptions, MetadataExtractor, MetadataOptions, RelevanceFilter,
    SectionSplitter, chunk,
};
use crate::util::{emit_json, now_utc_string, read_text_file, sha256_file};

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: PrepareArgs) -> Result<()> {
    let text = read_text_file(&args.input)?;
    let input_sha256 = sha256_file(&args.input)?;

    let splitter = SectionSplitter::new(args.document_type)?;
    let filter = RelevanceFilter::new()?;
    let extractor = MetadataExtractor::new()?;

    let filter_options = FilterOptions {
        preserve_headers: args.preserve_headers,
        document_type: args.document_type,
    };
    let chunk_options = ChunkOptions {
        target_chunk_size: args.target_chunk_size,
        preserve_context: args.preserve_context,
    };
    let metadata_options = MetadataOptions {
        window_chars: args.metadata_window,
    };

    let sections = splitter.split(&text);
    let filtered = filter.filter(&sections, &filter_options);
    let chunks = chunk(&filtered.filtered_text, &chunk_options);
    let metadata = extractor.extract(&text, &metadata_options);

    info!(
        input = %args.input.display(),
        section_count = sections.len(),
        removed_sections = filtered.removed_sections.len(),
        reduction_percentage = format!("{:.1}", filtered.reduction_percentage),
        chunk_count = chunks.len(),
        "prepared document"
    );

    let manifest = PrepareManifest {
        manifest_version: MANIFEST_VERSION,
        generated_at: now_utc_string(),
        input_path: args.input.display().to_string(),
        input_sha256,
        options: PrepareOptions {
            document_type: args.document_type.map(|value| value.as_str().to_string()),
            preserve_headers: args.preserve_headers,
            target_chunk_size: args.target_chunk_size,
            preserve_context: args.preserve_context,
            metadata_window: args.metadata_window,
        },
        stats: PrepareStats {
            section_count: sections.len(),
            removed_section_count: filtered.removed_sections.len(),
            original_length: filtered.original_length,
            filtered_length: filtered.filtered_length,
            reduction_percentage: filtered.reduction_percentage,
            chunk_count: chunks.len(),
        },
        removed_sections: filtered.removed_sections,
        metadata,
        chunks,
    };

    emit_json(args.output.as_deref(), &manifest)
}
