//! Keyword extraction from time-aligned transcripts
//!
//! Matching is exact token equality after trimming and lowercasing; no
//! substring or stemming matches. Occurrences come out in transcript order,
//! and each row carries the keyword's total count for the whole session,
//! back-filled after the full scan.

use crate::transcribe::Segment;
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// One keyword hit in a session transcript
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordOccurrence {
    /// Matched keyword (lowercase)
    pub keyword: String,
    /// The sentence the word appeared in
    pub sentence: String,
    /// Wall-clock time of the word (session start + word offset)
    pub absolute_time: DateTime<Local>,
    /// Total occurrences of this keyword across the session
    pub count: usize,
    /// Offset of the word from the start of the recording
    pub video_offset_secs: f64,
}

/// Scan a transcript for keyword matches.
///
/// `keywords` is expected lowercase (normalized at config load). An empty
/// result is valid; the report artifact is still produced downstream.
pub fn extract(
    segments: &[Segment],
    keywords: &[String],
    session_start: DateTime<Local>,
) -> Vec<KeywordOccurrence> {
    let mut occurrences = Vec::new();
    let mut totals: HashMap<String, usize> = HashMap::new();

    for segment in segments {
        for word in &segment.words {
            let token = word.text.trim().to_lowercase();
            if !keywords.iter().any(|k| *k == token) {
                continue;
            }

            *totals.entry(token.clone()).or_insert(0) += 1;

            let offset_ms = (word.start_secs * 1000.0).round() as i64;
            occurrences.push(KeywordOccurrence {
                keyword: token,
                sentence: segment.text.clone(),
                absolute_time: session_start + chrono::Duration::milliseconds(offset_ms),
                count: 0, // back-filled below once session totals are known
                video_offset_secs: word.start_secs,
            });
        }
    }

    for occ in &mut occurrences {
        occ.count = totals[&occ.keyword];
    }

    occurrences
}
