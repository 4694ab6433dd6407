//! SubRip (.srt) parsing.
//!
//! Blocks are separated by blank lines. The second line of a block holds the
//! time range, the remaining lines are the text. Malformed blocks are skipped
//! rather than failing the whole file.

use std::sync::OnceLock;

use regex::Regex;

use crate::session::SubtitleCue;

fn time_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{2}):(\d{2}):(\d{2})[,.](\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2})[,.](\d{3})")
            .expect("static regex is valid")
    })
}

/// Convert SRT timestamp components to seconds.
fn to_seconds(h: &str, m: &str, s: &str, ms: &str) -> Option<f64> {
    let h: u64 = h.parse().ok()?;
    let m: u64 = m.parse().ok()?;
    let s: u64 = s.parse().ok()?;
    let ms: u64 = ms.parse().ok()?;
    Some((h * 3600 + m * 60 + s) as f64 + ms as f64 / 1000.0)
}

/// Parse a time range line such as `00:00:01,500 --> 00:00:03,000`.
pub fn parse_time_range(line: &str) -> Option<(f64, f64)> {
    let caps = time_line_regex().captures(line.trim())?;
    let start = to_seconds(&caps[1], &caps[2], &caps[3], &caps[4])?;
    let end = to_seconds(&caps[5], &caps[6], &caps[7], &caps[8])?;
    Some((start, end))
}

/// Parse SRT content into cues, numbered by their position in the output.
pub fn parse_srt(content: &str) -> Vec<SubtitleCue> {
    // Normalize CRLF so block splitting works for Windows-authored files
    let content = content.replace("\r\n", "\n");
    let mut cues = Vec::new();

    for block in content.trim().split("\n\n") {
        let lines: Vec<&str> = block.trim().lines().collect();
        if lines.len() < 3 {
            continue;
        }
        let Some((start, end)) = parse_time_range(lines[1]) else {
            tracing::debug!(block = lines[0], "skipping srt block with bad time line");
            continue;
        };
        cues.push(SubtitleCue::new(
            cues.len() as u64,
            start,
            end,
            lines[2..].join("\n"),
        ));
    }

    cues
}
