/// Formats a keyword's share of its dataset total as a percentage.
pub fn format_share(frequency: f64, total: f64) -> String {
    if total > 0.0 {
        format!("{:.1}%", frequency / total * 100.0)
    } else {
        "n/a".to_owned()
    }
}
