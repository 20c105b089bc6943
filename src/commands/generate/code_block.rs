pub const SQL_FENCE_OPEN: &str = "```sql";
pub const FENCE_CLOSE: &str = "```";

/// Returns the body of the first ```` ```sql ```` fenced block, or nothing when
/// the block is missing or never closed. Later blocks are ignored.
pub fn extract_sql_block(lines: &[String]) -> Vec<String> {
    let Some(open) = lines.iter().position(|line| line == SQL_FENCE_OPEN) else {
        return Vec::new();
    };

    let body = &lines[open + 1..];
    match body.iter().position(|line| line == FENCE_CLOSE) {
        Some(close) => body[..close].to_vec(),
        None => Vec::new(),
    }
}
