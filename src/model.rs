use serde::{Deserialize, Serialize};

/// One span of the input document. Spans are ordered, cover the whole
/// input, and never overlap; offsets count characters, not bytes. The
/// span includes its header line; `body` is the text after it. Text
/// before the first recognized header carries `header: None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub header: Option<String>,
    pub body: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterResult {
    pub filtered_text: String,
    pub original_length: usize,
    pub filtered_length: usize,
    pub reduction_percentage: f64,
    pub removed_sections: Vec<String>,
}

/// A bounded slice of the filtered text. `start_offset`/`end_offset`
/// describe the chunk's own span in the filtered text (characters);
/// when `has_overlap` is set, `text` additionally carries a tail of the
/// previous chunk as a prefix, outside the span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub index: usize,
    pub start_offset: usize,
    pub end_offset: usize,
    pub has_overlap: bool,
}

/// Fields pulled from the head of a permit document. Absent fields are
/// omitted from serialized output, never emitted as null or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_issued: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_company: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionListing {
    pub section_count: usize,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChunkListing {
    pub chunk_count: usize,
    pub chunks: Vec<Chunk>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrepareOptions {
    pub document_type: Option<String>,
    pub preserve_headers: bool,
    pub target_chunk_size: usize,
    pub preserve_context: bool,
    pub metadata_window: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrepareStats {
    pub section_count: usize,
    pub removed_section_count: usize,
    pub original_length: usize,
    pub filtered_length: usize,
    pub reduction_percentage: f64,
    pub chunk_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrepareManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub input_path: String,
    pub input_sha256: String,
    pub options: PrepareOptions,
    pub stats: PrepareStats,
    pub removed_sections: Vec<String>,
    pub metadata: DocumentMetadata,
    pub chunks: Vec<Chunk>,
}
