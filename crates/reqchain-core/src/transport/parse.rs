//! Parse raw response header lines collected by curl into name/value pairs.

/// Returns the headers of the final response block.
///
/// curl reports every header block it sees (redirect hops, `100 Continue`,
/// proxy CONNECT replies); each block starts with an `HTTP/` status line, so
/// a new status line discards what was collected before it.
pub(crate) fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    headers
}
