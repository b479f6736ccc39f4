/// Strip driver prefixes and error codes from a database error message.
///
/// `"Database error: error returned from database: 1146 (42S02): Table 'x.donations' doesn't exist"`
/// becomes `"Table 'x.donations' doesn't exist"`.
pub fn extract_clean_error(error_msg: &str) -> String {
    const MARKER: &str = "error returned from database:";

    match error_msg.find(MARKER) {
        Some(pos) => {
            let detail = &error_msg[pos + MARKER.len()..];
            match detail.rfind(": ") {
                Some(last_colon) => detail[last_colon + 2..].trim().to_string(),
                None => detail.trim().to_string(),
            }
        }
        None => error_msg.trim().to_string(),
    }
}
