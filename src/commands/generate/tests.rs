use std::path::PathBuf;

use anyhow::anyhow;

use super::*;
use crate::util::split_lines;

const BASE_URL: &str = "https://mariadb.com/docs/";

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|line| line.to_string()).collect()
}

fn parser() -> DocumentParser {
    DocumentParser::new().expect("parser regexes compile")
}

fn alter_procedure_doc() -> Vec<String> {
    lines(&[
        "# ALTER PROCEDURE",
        "## Syntax",
        "```sql",
        "ALTER PROCEDURE name",
        "```",
        "## Description",
        "Changes procedure.",
        "## Examples",
        "```sql",
        "CALL p();",
        "```",
        "## See Also",
        "...",
    ])
}

#[test]
fn category_id_for_path_uses_first_matching_rule() {
    assert_eq!(category_id_for_path("stored-procedures/alter-procedure.md"), 33);
    assert_eq!(
        category_id_for_path("server/reference/sql-functions/string-functions/concat.md"),
        37
    );
    assert_eq!(category_id_for_path("spatial/geometry-constructors/point.md"), 34);
    assert_eq!(category_id_for_path("operators/comparison-operators/equal.md"), 38);
}

#[test]
fn category_id_for_path_defaults_when_nothing_matches() {
    assert_eq!(category_id_for_path("release-notes/11.4.md"), DEFAULT_CATEGORY_ID);
    assert_eq!(category_id_for_path(""), 35);
}

#[test]
fn locate_returns_none_without_level_one_heading() {
    let doc = lines(&["## Syntax", "#NoSpace", "plain text"]);
    assert!(parser().locate(&doc).is_none());
}

#[test]
fn locate_strips_all_leading_hash_and_space_characters() {
    let doc = lines(&["intro", "#  # Weird Title", "body"]);
    let bounded = parser().locate(&doc).expect("title heading");
    assert_eq!(bounded.title, "Weird Title");
    assert_eq!(bounded.lines.len(), 2);
    assert_eq!(bounded.lines[0], "#  # Weird Title");
}

#[test]
fn locate_stops_at_first_end_marker() {
    let doc = lines(&["# Title", "body", "### SEE  ALSO", "link"]);
    let bounded = parser().locate(&doc).expect("title heading");
    assert_eq!(bounded.lines, &doc[..2]);

    let doc = lines(&["# Title", "body", "{% @Marketo/form formId=\"4316\" %}", "tail"]);
    assert_eq!(parser().locate(&doc).expect("title").lines.len(), 2);

    let doc = lines(&["# Title", "body", "<SUB>Content reproduced</SUB>"]);
    assert_eq!(parser().locate(&doc).expect("title").lines.len(), 2);
}

#[test]
fn locate_ignores_level_one_see_also_and_runs_to_end() {
    let doc = lines(&["# Title", "# See Also", "text"]);
    let bounded = parser().locate(&doc).expect("title heading");
    assert_eq!(bounded.lines.len(), 3);
}

#[test]
fn find_spans_keeps_first_heading_of_each_kind() {
    let doc = lines(&[
        "# T",
        "## Overview",
        "### Syntax",
        "## Description",
        "## Example",
        "## Examples",
    ]);
    let spans = parser().find_spans(&doc);
    assert_eq!(
        spans,
        SubsectionSpans {
            syntax: Some(2),
            description: Some(1),
            examples: Some(4),
        }
    );
}

#[test]
fn layout_covers_every_presence_combination() {
    let both = SubsectionSpans {
        syntax: Some(1),
        description: Some(4),
        examples: None,
    };
    assert_eq!(
        both.layout(),
        SectionLayout::SyntaxAndDescription {
            syntax: 1,
            description: 4
        }
    );

    let description_only = SubsectionSpans {
        description: Some(2),
        ..SubsectionSpans::default()
    };
    assert_eq!(
        description_only.layout(),
        SectionLayout::DescriptionOnly { description: 2 }
    );

    let syntax_only = SubsectionSpans {
        syntax: Some(1),
        ..SubsectionSpans::default()
    };
    assert_eq!(syntax_only.layout(), SectionLayout::Fallback);
    assert_eq!(SubsectionSpans::default().layout(), SectionLayout::Fallback);
}

#[test]
fn split_combines_syntax_code_with_description_prose() {
    let doc = alter_procedure_doc();
    let bounded = parser().locate(&doc).expect("title heading");
    let sections = parser().split(bounded.lines);

    assert_eq!(sections.description, "ALTER PROCEDURE name\n\nChanges procedure.");
    assert_eq!(sections.example_lines, vec!["CALL p();".to_string()]);
}

#[test]
fn split_uses_prose_alone_when_syntax_has_no_sql_block() {
    let doc = lines(&[
        "# T",
        "## Syntax",
        "no code here",
        "## Description",
        "Prose.",
    ]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "Prose.");
    assert!(sections.example_lines.is_empty());
}

#[test]
fn split_description_only_runs_to_examples_heading() {
    let doc = lines(&[
        "# T",
        "Intro",
        "## Overview",
        "First.",
        "Second.",
        "## Examples",
        "```sql",
        "SELECT 1;",
        "```",
    ]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "First.\nSecond.");
    assert_eq!(sections.example_lines, vec!["SELECT 1;".to_string()]);
}

#[test]
fn split_falls_back_to_everything_after_title() {
    let doc = lines(&["# T", "Line one", "", "Line two"]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "Line one\n\nLine two");
    assert!(sections.example_lines.is_empty());
}

#[test]
fn split_falls_back_when_only_syntax_heading_exists() {
    let doc = lines(&["# T", "## Syntax", "```sql", "T()", "```", "## Examples", "x"]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "## Syntax\n```sql\nT()\n```");
    assert!(sections.example_lines.is_empty());
}

#[test]
fn split_treats_repeated_description_heading_as_content() {
    let doc = lines(&["# T", "## Description", "a", "## Description", "b"]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "a\n## Description\nb");
}

#[test]
fn split_description_after_examples_runs_to_end() {
    let doc = lines(&[
        "# T",
        "## Examples",
        "```sql",
        "SELECT 1;",
        "```",
        "## Description",
        "Prose.",
        "More prose.",
    ]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "Prose.\nMore prose.");
    assert_eq!(sections.example_lines, vec!["SELECT 1;".to_string()]);
}

#[test]
fn split_handles_description_before_syntax() {
    let doc = lines(&[
        "# T",
        "## Description",
        "Prose.",
        "## Syntax",
        "```sql",
        "T(x)",
        "```",
    ]);
    let sections = parser().split(&doc);
    assert_eq!(sections.description, "T(x)\n\nProse.\n## Syntax\n```sql\nT(x)\n```");
}

#[test]
fn extract_sql_block_returns_lines_between_fences() {
    let block = lines(&["text", "```sql", "SELECT 1;", "", "SELECT 2;", "```", "```sql", "x", "```"]);
    assert_eq!(
        extract_sql_block(&block),
        lines(&["SELECT 1;", "", "SELECT 2;"])
    );
}

#[test]
fn extract_sql_block_requires_exact_markers() {
    assert!(extract_sql_block(&lines(&["```SQL", "x", "```"])).is_empty());
    assert!(extract_sql_block(&lines(&["```", "x", "```"])).is_empty());
    assert!(extract_sql_block(&lines(&["```sql", "never closed"])).is_empty());
    assert!(extract_sql_block(&lines(&["```sql", "```"])).is_empty());
    assert!(extract_sql_block(&[]).is_empty());
}

#[test]
fn build_help_topic_prefixes_description_and_strips_md_suffix() {
    let topic = build_help_topic(
        "ABS".to_string(),
        "ABS(X)",
        &lines(&["SELECT ABS(-1);", "SELECT ABS(2);"]),
        "numeric-functions/abs.md",
        BASE_URL,
    );
    assert_eq!(topic.name, "ABS");
    assert_eq!(topic.description, "Syntax:\nABS(X)");
    assert_eq!(topic.example, "SELECT ABS(-1);\nSELECT ABS(2);");
    assert_eq!(topic.url, "https://mariadb.com/docs/numeric-functions/abs");
    assert_eq!(topic.category_id, 4);

    let untouched = build_help_topic("X".to_string(), "", &[], "notes/readme.txt", BASE_URL);
    assert_eq!(untouched.url, "https://mariadb.com/docs/notes/readme.txt");
    assert_eq!(untouched.example, "");
}

#[test]
fn escape_sql_literal_escapes_backslash_before_newline() {
    assert_eq!(escape_sql_literal("it's"), "it''s");
    assert_eq!(escape_sql_literal("a\nb"), "a\\nb");
    assert_eq!(escape_sql_literal("C:\\dir"), "C:\\\\dir");
    assert_eq!(escape_sql_literal("\\\n'"), "\\\\\\n''");
}

#[test]
fn escape_sql_literal_output_has_no_raw_quotes_or_newlines_and_reverses() {
    let inputs = ["plain", "it's\na \\ test", "''\n\n\\\\'", "\\n literal"];
    for input in inputs {
        let escaped = escape_sql_literal(input);
        assert!(!escaped.contains('\n'));
        assert_eq!(escaped.replace("''", "").matches('\'').count(), 0);
        assert_eq!(escaped, escape_sql_literal(input));

        let mut restored = String::new();
        let mut chars = escaped.chars().peekable();
        while let Some(ch) = chars.next() {
            match (ch, chars.peek().copied()) {
                ('\\', Some('n')) => {
                    chars.next();
                    restored.push('\n');
                }
                ('\\', Some('\\')) => {
                    chars.next();
                    restored.push('\\');
                }
                ('\'', Some('\'')) => {
                    chars.next();
                    restored.push('\'');
                }
                (other, _) => restored.push(other),
            }
        }
        assert_eq!(restored, input);
    }
}

#[test]
fn format_insert_produces_single_terminated_line() {
    let statement = format_insert("N", "D", "", 1000, "U", 35);
    assert_eq!(
        statement,
        "INSERT INTO help_topic (help_topic_id, help_category_id, name, description, example, url) VALUES (1000, 35, 'N', 'D', '', 'U');"
    );
}

#[test]
fn parse_document_matches_alter_procedure_scenario() {
    let doc = alter_procedure_doc();
    let topic = parser()
        .parse_document(&doc, "stored-procedures/alter-procedure.md", BASE_URL)
        .expect("help topic");

    assert_eq!(topic.name, "ALTER PROCEDURE");
    assert_eq!(
        topic.description,
        "Syntax:\nALTER PROCEDURE name\n\nChanges procedure."
    );
    assert_eq!(topic.example, "CALL p();");
    assert_eq!(topic.category_id, 33);
    assert!(topic.url.ends_with("/stored-procedures/alter-procedure"));

    let statement = topic.to_insert_statement(1000);
    assert!(statement.contains("'Syntax:\\nALTER PROCEDURE name\\n\\nChanges procedure.'"));
    assert!(statement.ends_with("'https://mariadb.com/docs/stored-procedures/alter-procedure');"));
    assert!(!statement.contains('\n'));
}

#[test]
fn parse_document_without_subheadings_uses_body_text() {
    let doc = lines(&["# SHOW THINGS", "Shows things.", "More detail."]);
    let topic = parser()
        .parse_document(&doc, "misc/show-things.md", BASE_URL)
        .expect("help topic");

    assert_eq!(topic.description, "Syntax:\nShows things.\nMore detail.");
    assert_eq!(topic.example, "");
    assert_eq!(topic.category_id, 35);
}

#[test]
fn generate_batch_assigns_dense_ids_over_successes_only() {
    let documents = vec![
        ("a.md".to_string(), Ok(lines(&["# A", "body"]))),
        ("broken.md".to_string(), Ok(lines(&["no heading"]))),
        ("unreadable.md".to_string(), Err(anyhow!("invalid UTF-8"))),
        ("c.md".to_string(), Ok(lines(&["# C's", "body"]))),
    ];

    let outcome = generate_batch(&parser(), documents, BASE_URL, 1000);

    assert_eq!(outcome.statements.len(), 2);
    assert!(outcome.statements[0].contains("VALUES (1000, 35, 'A'"));
    assert!(outcome.statements[1].contains("VALUES (1001, 35, 'C''s'"));
    assert_eq!(outcome.next_topic_id(), Some(1002));
    assert_eq!(outcome.first_topic_id(), Some(1000));
    assert_eq!(outcome.last_topic_id(), Some(1001));
    assert_eq!(outcome.category_counts.get(&35), Some(&2));
    assert_eq!(
        outcome.failures,
        vec![
            DocumentFailure {
                path: "broken.md".to_string(),
                reason: NO_TITLE_REASON.to_string(),
            },
            DocumentFailure {
                path: "unreadable.md".to_string(),
                reason: "invalid UTF-8".to_string(),
            },
        ]
    );
}

#[test]
fn generate_batch_without_successes_has_no_id_range() {
    let documents = vec![("x.md".to_string(), Ok(lines(&["text only"])))];
    let outcome = generate_batch(&parser(), documents, BASE_URL, 1000);

    assert!(outcome.statements.is_empty());
    assert_eq!(outcome.first_topic_id(), None);
    assert_eq!(outcome.last_topic_id(), None);
    assert_eq!(outcome.next_topic_id(), Some(1000));
}

#[test]
fn generate_batch_fails_documents_once_topic_ids_run_out() {
    let documents = vec![
        ("a.md".to_string(), Ok(lines(&["# A"]))),
        ("b.md".to_string(), Ok(lines(&["# B"]))),
    ];

    let outcome = generate_batch(&parser(), documents, BASE_URL, u32::MAX);

    assert_eq!(outcome.statements.len(), 1);
    assert!(outcome.statements[0].contains("VALUES (4294967295, 35, 'A'"));
    assert_eq!(outcome.first_topic_id(), Some(u32::MAX));
    assert_eq!(outcome.last_topic_id(), Some(u32::MAX));
    assert_eq!(outcome.next_topic_id(), None);
    assert_eq!(
        outcome.failures,
        vec![DocumentFailure {
            path: "b.md".to_string(),
            reason: IDS_EXHAUSTED_REASON.to_string(),
        }]
    );
}

#[test]
fn generate_batch_splits_carriage_return_only_documents() {
    let documents = vec![("cr.md".to_string(), Ok(split_lines("# T\rbody\rmore\n")))];

    let outcome = generate_batch(&parser(), documents, BASE_URL, 1000);

    assert_eq!(outcome.statements.len(), 1);
    assert!(outcome.statements[0].contains("VALUES (1000, 35, 'T', 'Syntax:\\nbody\\nmore'"));
    assert!(!outcome.statements[0].contains('\r'));
}

#[test]
fn render_generate_command_includes_optional_paths() {
    let args = GenerateArgs {
        docs_root: PathBuf::from("docs"),
        output: PathBuf::from("out.sql"),
        failures_path: Some(PathBuf::from("failed.txt")),
        manifest_path: None,
        base_url: BASE_URL.to_string(),
        start_id: 2000,
    };

    let command = run::render_generate_command(&args);
    assert!(command.starts_with("helptopics generate --docs-root docs --output out.sql"));
    assert!(command.contains("--start-id 2000"));
    assert!(command.contains("--failures-path failed.txt"));
    assert!(!command.contains("--manifest-path"));
}
