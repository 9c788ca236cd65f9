// Artifact naming: deterministic, idempotent, partitioned by session date.

use chrono::{Local, TimeZone};
use livescribe::ArtifactSet;

#[test]
fn test_names_embed_sequence_account_and_timestamp() {
    let start = Local.with_ymd_and_hms(2026, 1, 5, 14, 30, 45).unwrap();
    let set = ArtifactSet::new(7, "Official_Allmoney_04", start);

    assert_eq!(set.date_partition, "2026-01-05");
    assert_eq!(
        set.video_name,
        "7-Official_Allmoney_04-2026-01-05-143045-video.mp4"
    );
    assert_eq!(
        set.transcript_name,
        "7-Official_Allmoney_04-2026-01-05-143045-transcription.txt"
    );
    assert_eq!(
        set.report_name,
        "7-Official_Allmoney_04-2026-01-05-143045-keywords.csv"
    );
}

#[test]
fn test_same_inputs_give_identical_names() {
    let start = Local.with_ymd_and_hms(2026, 1, 5, 14, 30, 45).unwrap();

    let a = ArtifactSet::new(7, "acct", start);
    let b = ArtifactSet::new(7, "acct", start);

    assert_eq!(a, b);
}

#[test]
fn test_different_sequences_never_collide() {
    let start = Local.with_ymd_and_hms(2026, 1, 5, 14, 30, 45).unwrap();

    let a = ArtifactSet::new(7, "acct", start);
    let b = ArtifactSet::new(8, "acct", start);

    assert_ne!(a.video_name, b.video_name);
    assert_ne!(a.transcript_name, b.transcript_name);
    assert_ne!(a.report_name, b.report_name);
}
