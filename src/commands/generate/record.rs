use super::*;

/// One row of the `help_topic` table, before escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpTopic {
    pub name: String,
    pub description: String,
    pub example: String,
    pub url: String,
    pub category_id: u32,
}

pub fn build_help_topic(
    title: String,
    description: &str,
    example_lines: &[String],
    path: &str,
    base_url: &str,
) -> HelpTopic {
    let url_path = path.strip_suffix(".md").unwrap_or(path);

    HelpTopic {
        name: title,
        description: format!("Syntax:\n{description}"),
        example: example_lines.join("\n"),
        url: format!("{base_url}{url_path}"),
        category_id: category_id_for_path(path),
    }
}

impl HelpTopic {
    pub fn to_insert_statement(&self, topic_id: u32) -> String {
        format_insert(
            &escape_sql_literal(&self.name),
            &escape_sql_literal(&self.description),
            &escape_sql_literal(&self.example),
            topic_id,
            &escape_sql_literal(&self.url),
            self.category_id,
        )
    }
}
