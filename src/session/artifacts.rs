use chrono::{DateTime, Local};

/// The three named outputs of one session.
///
/// Names are fully determined by (sequence, account, start time), so a
/// retried session with the same sequence number reproduces the same names
/// instead of colliding with another session's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub sequence: u64,
    /// Calendar date the session started, used as the remote folder name
    pub date_partition: String,
    pub video_name: String,
    pub transcript_name: String,
    pub report_name: String,
}

impl ArtifactSet {
    pub fn new(sequence: u64, account: &str, start: DateTime<Local>) -> Self {
        let date = start.format("%Y-%m-%d");
        let time = start.format("%H%M%S");
        let stem = format!("{}-{}-{}-{}", sequence, account, date, time);

        Self {
            sequence,
            date_partition: date.to_string(),
            video_name: format!("{}-video.mp4", stem),
            transcript_name: format!("{}-transcription.txt", stem),
            report_name: format!("{}-keywords.csv", stem),
        }
    }
}
