/// Wraps an identifier in double quotes and doubles any embedded quote, so a
/// value can never collide with the batch delimiter or a row boundary.
///
/// Examples:
///   LCD TV      -> "LCD TV"
///   LCD TV,50"  -> "LCD TV,50"""
pub fn enquote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}
