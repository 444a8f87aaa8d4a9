/// Render a duration in whole seconds as `M:SS`.
///
/// Minutes are not wrapped into hours, so an hour-long game shows as `60:00`.
pub fn format_playing_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
