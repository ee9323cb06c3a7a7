//! Clock formatting for timer displays

/// Format seconds as `mm:ss`, growing past 99 minutes
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
