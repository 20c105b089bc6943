use super::*;

/// Line prefix of the embedded signup form that closes most topic pages.
pub const EMBEDDED_FORM_MARKER: &str = "{% @marketo/form";
pub const FOOTER_MARKER: &str = "<sub>";

/// The slice of a document between its title heading and the first end marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedContent<'a> {
    pub title: String,
    /// Starts with the title line itself.
    pub lines: &'a [String],
}

/// First-seen line index of each recognised sub-heading.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubsectionSpans {
    pub syntax: Option<usize>,
    pub description: Option<usize>,
    pub examples: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLayout {
    SyntaxAndDescription { syntax: usize, description: usize },
    DescriptionOnly { description: usize },
    Fallback,
}

impl SubsectionSpans {
    pub fn layout(&self) -> SectionLayout {
        match (self.syntax, self.description) {
            (Some(syntax), Some(description)) => {
                SectionLayout::SyntaxAndDescription { syntax, description }
            }
            (None, Some(description)) => SectionLayout::DescriptionOnly { description },
            (_, None) => SectionLayout::Fallback,
        }
    }

    /// End of a region starting at `from`: the Examples heading when it comes
    /// later, otherwise the end of the content.
    fn region_end(&self, from: usize, len: usize) -> usize {
        self.examples
            .filter(|examples| *examples > from)
            .unwrap_or(len)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSections {
    pub description: String,
    pub example_lines: Vec<String>,
}

pub struct DocumentParser {
    see_also_heading: Regex,
    syntax_heading: Regex,
    description_heading: Regex,
    examples_heading: Regex,
}

impl DocumentParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            see_also_heading: Regex::new(r"(?i)^#{2,}\s*see\s+also")
                .context("failed to compile see-also heading regex")?,
            syntax_heading: Regex::new(r"(?i)^#{2,}\s*syntax")
                .context("failed to compile syntax heading regex")?,
            description_heading: Regex::new(r"(?i)^#{2,}\s*(?:description|overview)")
                .context("failed to compile description heading regex")?,
            examples_heading: Regex::new(r"(?i)^#{2,}\s*examples?")
                .context("failed to compile examples heading regex")?,
        })
    }

    /// Finds the first `# ` heading and cuts the document at the first end
    /// marker after it. `None` means the document has no title heading.
    pub fn locate<'a>(&self, lines: &'a [String]) -> Option<BoundedContent<'a>> {
        let start = lines.iter().position(|line| line.starts_with("# "))?;
        let title = lines[start].trim_start_matches(['#', ' ']).to_string();

        let end = lines[start..]
            .iter()
            .position(|line| self.is_end_marker(line))
            .map(|offset| start + offset)
            .unwrap_or(lines.len());

        Some(BoundedContent {
            title,
            lines: &lines[start..end],
        })
    }

    fn is_end_marker(&self, line: &str) -> bool {
        self.see_also_heading.is_match(line)
            || starts_with_ignore_ascii_case(line, EMBEDDED_FORM_MARKER)
            || starts_with_ignore_ascii_case(line, FOOTER_MARKER)
    }

    pub fn find_spans(&self, content: &[String]) -> SubsectionSpans {
        let mut spans = SubsectionSpans::default();

        for (index, line) in content.iter().enumerate() {
            if spans.syntax.is_none() && self.syntax_heading.is_match(line) {
                spans.syntax = Some(index);
            } else if spans.description.is_none() && self.description_heading.is_match(line) {
                spans.description = Some(index);
            } else if spans.examples.is_none() && self.examples_heading.is_match(line) {
                spans.examples = Some(index);
            }
        }

        spans
    }

    /// Slices bounded content into the description text and the example code.
    pub fn split(&self, content: &[String]) -> SplitSections {
        let spans = self.find_spans(content);
        let len = content.len();

        let description = match spans.layout() {
            SectionLayout::SyntaxAndDescription {
                syntax,
                description,
            } => {
                let syntax_end = if description > syntax {
                    description
                } else {
                    spans.region_end(syntax, len)
                };
                let syntax_code = extract_sql_block(&content[syntax..syntax_end]);
                let prose = join_region(content, description + 1, spans.region_end(description, len));

                if syntax_code.is_empty() {
                    prose
                } else {
                    format!("{}\n\n{}", syntax_code.join("\n"), prose)
                }
            }
            SectionLayout::DescriptionOnly { description } => {
                join_region(content, description + 1, spans.region_end(description, len))
            }
            SectionLayout::Fallback => join_region(content, 1, spans.region_end(0, len)),
        };

        let example_lines = spans
            .examples
            .map(|examples| extract_sql_block(&content[examples + 1..]))
            .unwrap_or_default();

        SplitSections {
            description,
            example_lines,
        }
    }

    /// Runs the whole extraction for one document. `None` when the document
    /// has no level-1 heading.
    pub fn parse_document(&self, lines: &[String], path: &str, base_url: &str) -> Option<HelpTopic> {
        let bounded = self.locate(lines)?;
        let sections = self.split(bounded.lines);

        Some(build_help_topic(
            bounded.title,
            &sections.description,
            &sections.example_lines,
            path,
            base_url,
        ))
    }
}

fn join_region(content: &[String], start: usize, end: usize) -> String {
    if start >= end {
        return String::new();
    }
    content[start..end].join("\n")
}

fn starts_with_ignore_ascii_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}
