//! Artifact serialization
//!
//! Renders the transcript document (plain text, one paragraph per segment)
//! and the keyword report (CSV). The report keeps the same column schema
//! even when there are no matches; downstream consumers depend on the file
//! always being present and well-formed.

use crate::keywords::KeywordOccurrence;
use crate::transcribe::Segment;

const REPORT_HEADER: &str = "keyword,sentence,date_time,count,video_timestamp";

/// Full transcript as a plain-text document.
pub fn render_transcript(segments: &[Segment]) -> String {
    let mut doc = String::new();
    for segment in segments {
        doc.push_str(&segment.text);
        doc.push('\n');
    }
    doc
}

/// Keyword report as CSV, one row per occurrence, transcript order.
pub fn render_keyword_report(occurrences: &[KeywordOccurrence]) -> String {
    let mut csv = String::from(REPORT_HEADER);
    csv.push('\n');

    for occ in occurrences {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_field(&occ.keyword),
            csv_field(&occ.sentence),
            occ.absolute_time.format("%Y-%m-%d %H:%M:%S"),
            occ.count,
            occ.video_offset_secs,
        ));
    }

    csv
}

/// Quote a field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
