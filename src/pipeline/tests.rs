use super::*;

use crate::cli::DocumentType;
use crate::model::Section;

fn split(text: &str) -> Vec<Section> {
    SectionSplitter::new(None)
        .expect("splitter builds")
        .split(text)
}

fn filter_default(text: &str) -> crate::model::FilterResult {
    let filter = RelevanceFilter::new().expect("filter builds");
    filter.filter(&split(text), &FilterOptions::default())
}

#[test]
fn empty_input_yields_single_empty_section() {
    let sections = split("");

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].header, None);
    assert_eq!(sections[0].body, "");
    assert_eq!(sections[0].start_offset, 0);
    assert_eq!(sections[0].end_offset, 0);
}

#[test]
fn text_before_first_header_forms_leading_section() {
    let text = "Issued under the Environmental Permitting Regulations.\nCONDITION 1: Keep records.\nRecords shall be retained for six years.";
    let sections = split(text);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].header, None);
    assert!(sections[0].body.contains("Permitting Regulations"));
    assert_eq!(
        sections[1].header.as_deref(),
        Some("CONDITION 1: Keep records.")
    );
    assert!(sections[1].body.contains("six years"));
}

#[test]
fn uppercase_line_of_two_words_is_a_header_but_single_word_is_not() {
    let text = "MONITORING REQUIREMENTS\nSample weekly.\nIMPORTANT\nThis is body text.";
    let sections = split(text);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].header.as_deref(), Some("MONITORING REQUIREMENTS"));
    assert!(sections[0].body.contains("IMPORTANT"));
}

#[test]
fn sections_cover_input_without_gaps_or_overlaps() {
    let text = "preamble text\nSCHEDULE 1\nbody one\nAPPENDIX 2\nbody two";
    let sections = split(text);

    assert_eq!(sections[0].start_offset, 0);
    for pair in sections.windows(2) {
        assert_eq!(pair[0].end_offset, pair[1].start_offset);
    }
    assert_eq!(
        sections.last().map(|s| s.end_offset),
        Some(text.chars().count())
    );
}

#[test]
fn document_type_hint_enables_type_specific_headers() {
    let text = "OUTLET 1\nDischarge to the River Trent.";

    let hinted = SectionSplitter::new(Some(DocumentType::DischargeConsent))
        .expect("splitter builds")
        .split(text);
    assert_eq!(hinted[0].header.as_deref(), Some("OUTLET 1"));

    let unhinted = split(text);
    assert_eq!(unhinted.len(), 1);
    assert_eq!(unhinted[0].header, None);
}

#[test]
fn malformed_text_degrades_to_single_section() {
    let text = "just some prose\nwith no structure at all\n\t\u{fffd}garbage bytes";
    let sections = split(text);

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].header, None);
    assert_eq!(sections[0].end_offset, text.chars().count());
}

#[test]
fn table_of_contents_section_is_removed() {
    let text = "TABLE OF CONTENTS\n1 Introduction .. 2\n2 Conditions .. 5\nSCHEDULE 1\nThe operator shall maintain the site.";
    let result = filter_default(text);

    assert!(!result.filtered_text.contains("Introduction .. 2"));
    assert!(result.filtered_text.contains("maintain the site"));
    assert_eq!(result.removed_sections, vec!["TABLE OF CONTENTS".to_string()]);
}

#[test]
fn appendix_containing_condition_marker_is_retained() {
    let text =
        "APPENDIX 1\nThe obligations in CONDITION 14 continue to apply during decommissioning.";
    let result = filter_default(text);

    assert!(result
        .filtered_text
        .contains("CONDITION 14 continue to apply"));
    assert!(result.removed_sections.is_empty());
}

#[test]
fn appendix_without_obligations_is_removed() {
    let text = "SCHEDULE 2\nEmissions shall not exceed the limits in table S2.\nAPPENDIX 3\nSite plan drawings and historic correspondence.";
    let result = filter_default(text);

    assert!(result.filtered_text.contains("shall not exceed"));
    assert!(!result.filtered_text.contains("historic correspondence"));
    assert_eq!(result.removed_sections, vec!["APPENDIX 3".to_string()]);
}

#[test]
fn page_number_and_copyright_lines_are_stripped_from_retained_sections() {
    let text = "SCHEDULE 1\nThe operator shall record all discharges.\nPage 3 of 12\n© Environment Agency 2024";
    let result = filter_default(text);

    assert!(result.filtered_text.contains("record all discharges"));
    assert!(!result.filtered_text.contains("Page 3 of 12"));
    assert!(!result.filtered_text.contains('©'));
}

#[test]
fn substantive_header_line_survives_without_preserve_headers() {
    let text = "CONDITION 1: Monitor stack emissions quarterly.\nResults shall be reported within 28 days.";
    let result = filter_default(text);

    assert!(result
        .filtered_text
        .contains("CONDITION 1: Monitor stack emissions quarterly."));
    assert!(result.filtered_text.contains("within 28 days"));
}

#[test]
fn plain_headers_are_dropped_unless_preserved() {
    let text = "MONITORING REQUIREMENTS\nSamples shall be taken weekly at outlet W1.";
    let sections = split(text);
    let filter = RelevanceFilter::new().expect("filter builds");

    let dropped = filter.filter(&sections, &FilterOptions::default());
    assert!(!dropped.filtered_text.contains("MONITORING REQUIREMENTS"));
    assert!(dropped.filtered_text.contains("weekly at outlet W1"));

    let preserved = filter.filter(
        &sections,
        &FilterOptions {
            preserve_headers: true,
            document_type: None,
        },
    );
    assert!(preserved.filtered_text.contains("MONITORING REQUIREMENTS"));
}

#[test]
fn filter_lengths_and_percentage_stay_in_range() {
    let cases = [
        "",
        "plain text only",
        "TABLE OF CONTENTS\n1 Intro .. 1",
        "CONDITION 1: x\nCONDITION 2: y",
        "DEFINITIONS\n\"operator\" means the permit holder.",
    ];

    for text in cases {
        let result = filter_default(text);
        assert!(result.filtered_length <= result.original_length, "{text:?}");
        assert!(result.reduction_percentage >= 0.0, "{text:?}");
        assert!(result.reduction_percentage <= 100.0, "{text:?}");
    }

    assert_eq!(filter_default("").reduction_percentage, 0.0);
}

#[test]
fn filtering_already_filtered_text_removes_nothing_further() {
    let text = "TABLE OF CONTENTS\n1 Intro .. 1\nGLOSSARY\n\"BAT\" best available techniques\nCONDITION 1: Monitor stack emissions quarterly.\nSCHEDULE 1\nThe operator shall notify the regulator of any breach.\nPage 1 of 9";
    let first = filter_default(text);
    let second = filter_default(&first.filtered_text);

    // Re-splitting can merge sections and collapse a blank separator, so
    // compare content rather than exact whitespace.
    let normalize = |value: &str| value.split_whitespace().collect::<Vec<&str>>().join(" ");
    assert_eq!(normalize(&second.filtered_text), normalize(&first.filtered_text));
    assert!(second.removed_sections.is_empty());
}

#[test]
fn toc_copyright_and_page_lines_removed_while_condition_kept() {
    let text = "TABLE OF CONTENTS\n1. Intro .. 1\n\nCONDITION 1: Monitor stack emissions quarterly.\n\n© Environment Agency 2024\nPage 1 of 10";
    let result = filter_default(text);

    assert!(result
        .filtered_text
        .contains("CONDITION 1: Monitor stack emissions quarterly."));
    assert!(!result.filtered_text.contains('©'));
    assert!(!result.filtered_text.contains("Page 1 of 10"));
    assert!(result.reduction_percentage > 0.0);
}

#[test]
fn empty_input_filters_to_empty_result() {
    let result = filter_default("");

    assert_eq!(result.filtered_text, "");
    assert_eq!(result.original_length, 0);
    assert_eq!(result.filtered_length, 0);
    assert_eq!(result.reduction_percentage, 0.0);
    assert!(result.removed_sections.is_empty());
}

#[test]
fn text_within_budget_yields_exactly_one_chunk() {
    let text = "first paragraph\n\nsecond paragraph";
    let chunks = chunk(
        text,
        &ChunkOptions {
            target_chunk_size: text.chars().count() + 1,
            preserve_context: false,
        },
    );

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, text);
    assert_eq!(chunks[0].index, 0);
    assert!(!chunks[0].has_overlap);
}

#[test]
fn empty_input_yields_single_empty_chunk() {
    let chunks = chunk(
        "",
        &ChunkOptions {
            target_chunk_size: 100,
            preserve_context: false,
        },
    );

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "");
    assert_eq!(chunks[0].start_offset, 0);
    assert_eq!(chunks[0].end_offset, 0);
}

#[test]
fn chunks_break_at_paragraph_boundaries() {
    let text = "alpha alpha alpha\n\nbravo bravo bravo\n\ncharlie charlie charlie";
    let chunks = chunk(
        text,
        &ChunkOptions {
            target_chunk_size: 20,
            preserve_context: false,
        },
    );

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text.trim_end(), "alpha alpha alpha");
    assert_eq!(chunks[1].text.trim_end(), "bravo bravo bravo");
    assert_eq!(chunks[2].text.trim_end(), "charlie charlie charlie");
    for (expected_index, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, expected_index);
    }
}

#[test]
fn concatenated_chunk_spans_reconstruct_the_input() {
    let text = "one one one\n\ntwo two two\n\nthree three three\n\nfour four four";
    for target in [5usize, 15, 30, 200] {
        for preserve_context in [false, true] {
            let chunks = chunk(
                text,
                &ChunkOptions {
                    target_chunk_size: target,
                    preserve_context,
                },
            );

            let boundaries = super::splitter::char_boundaries(text);
            let rebuilt: String = chunks
                .iter()
                .map(|chunk| &text[boundaries[chunk.start_offset]..boundaries[chunk.end_offset]])
                .collect();
            assert_eq!(rebuilt, text, "target {target}");
        }
    }
}

#[test]
fn oversized_paragraph_is_emitted_unbroken() {
    let long_paragraph = "word ".repeat(50);
    let text = format!("short lead\n\n{}\n\nshort tail", long_paragraph.trim_end());
    let chunks = chunk(
        &text,
        &ChunkOptions {
            target_chunk_size: 30,
            preserve_context: false,
        },
    );

    assert_eq!(chunks.len(), 3);
    assert!(chunks[1].text.trim_end().chars().count() > 30);
    assert_eq!(chunks[1].text.trim_end(), long_paragraph.trim_end());
}

#[test]
fn overlap_prefix_is_word_aligned_and_bounded() {
    let first = "alpha ".repeat(20);
    let second = "bravo ".repeat(20);
    let text = format!("{}\n\n{}", first.trim_end(), second.trim_end());
    let target = 125usize;
    let chunks = chunk(
        &text,
        &ChunkOptions {
            target_chunk_size: target,
            preserve_context: true,
        },
    );

    assert_eq!(chunks.len(), 2);
    assert!(!chunks[0].has_overlap);
    assert!(chunks[1].has_overlap);

    let span_chars = chunks[1].end_offset - chunks[1].start_offset;
    let prefix_chars = chunks[1].text.chars().count() - span_chars;
    assert!(prefix_chars > 0);
    assert!(prefix_chars <= target / 10);
    assert!(chunks[1].text.starts_with("alpha"));
}

#[test]
fn filtered_text_round_trips_through_the_chunker() {
    let text = "SCHEDULE 1\nThe operator shall monitor emissions to air.\n\nCONDITION 2: Report exceedances within 24 hours.\n\nTABLE OF CONTENTS\n1 Intro .. 1";
    let filtered = filter_default(text);
    let chunks = chunk(
        &filtered.filtered_text,
        &ChunkOptions {
            target_chunk_size: 40,
            preserve_context: false,
        },
    );

    let rebuilt: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
    assert_eq!(rebuilt, filtered.filtered_text);
}

#[test]
fn permit_reference_from_labeled_line() {
    let extractor = MetadataExtractor::new().expect("extractor builds");
    let metadata = extractor.extract(
        "Permit number: EPR/AB1234CD/V002\nEnvironmental permit for installation.",
        &MetadataOptions::default(),
    );

    assert_eq!(metadata.permit_reference.as_deref(), Some("EPR/AB1234CD/V002"));
}

#[test]
fn bare_epr_reference_is_detected() {
    let extractor = MetadataExtractor::new().expect("extractor builds");
    let metadata = extractor.extract(
        "This variation applies to EPR/ZP3456XY issued previously.",
        &MetadataOptions::default(),
    );

    assert_eq!(metadata.permit_reference.as_deref(), Some("EPR/ZP3456XY"));
}

#[test]
fn regulator_abbreviations_are_canonicalized() {
    let extractor = MetadataExtractor::new().expect("extractor builds");

    let sepa = extractor.extract("Issued by SEPA under CAR.", &MetadataOptions::default());
    assert_eq!(
        sepa.regulator.as_deref(),
        Some("Scottish Environment Protection Agency")
    );

    let ea = extractor.extract("Contact the EA on 03708 506 506.", &MetadataOptions::default());
    assert_eq!(ea.regulator.as_deref(), Some("Environment Agency"));

    let nrw = extractor.extract(
        "Natural Resources Wales permitting service",
        &MetadataOptions::default(),
    );
    assert_eq!(nrw.regulator.as_deref(), Some("Natural Resources Wales"));
}

#[test]
fn date_and_water_company_are_extracted() {
    let extractor = MetadataExtractor::new().expect("extractor builds");
    let metadata = extractor.extract(
        "Date of issue: 12 March 2024\nDischarge consent held by Severn Trent Water Limited.",
        &MetadataOptions::default(),
    );

    assert_eq!(metadata.date_issued.as_deref(), Some("12 March 2024"));
    assert_eq!(metadata.water_company.as_deref(), Some("Severn Trent Water"));
}

#[test]
fn reference_beyond_the_window_is_ignored() {
    let extractor = MetadataExtractor::new().expect("extractor builds");
    let padding = "x".repeat(3100);
    let text = format!("{padding}\nPermit number: EPR/FF9999ZZ");

    let outside = extractor.extract(&text, &MetadataOptions::default());
    assert_eq!(outside.permit_reference, None);

    let widened = extractor.extract(
        &text,
        &MetadataOptions {
            window_chars: text.chars().count(),
        },
    );
    assert_eq!(widened.permit_reference.as_deref(), Some("EPR/FF9999ZZ"));
}

#[test]
fn absent_metadata_fields_are_omitted_from_json() {
    let extractor = MetadataExtractor::new().expect("extractor builds");
    let metadata = extractor.extract("nothing recognizable here", &MetadataOptions::default());

    assert_eq!(metadata, crate::model::DocumentMetadata::default());
    let rendered = serde_json::to_string(&metadata).expect("serializes");
    assert_eq!(rendered, "{}");
}
