pub const INSERT_PREFIX: &str = "INSERT INTO help_topic";
const INSERT_COLUMNS: &str = "(help_topic_id, help_category_id, name, description, example, url)";

/// Escapes text for a single-quoted SQL literal. Backslashes go first so the
/// backslashes introduced for newlines are not doubled again.
pub fn escape_sql_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "''")
        .replace('\n', "\\n")
}

/// Formats one INSERT line. Inputs must already be escaped.
pub fn format_insert(
    name: &str,
    description: &str,
    example: &str,
    topic_id: u32,
    url: &str,
    category_id: u32,
) -> String {
    format!(
        "{INSERT_PREFIX} {INSERT_COLUMNS} VALUES ({topic_id}, {category_id}, '{name}', '{description}', '{example}', '{url}');"
    )
}
