use super::*;

pub const NO_TITLE_REASON: &str = "no level-1 heading found";
pub const IDS_EXHAUSTED_REASON: &str = "help_topic_id range exhausted";

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub statements: Vec<String>,
    pub failures: Vec<DocumentFailure>,
    pub category_counts: BTreeMap<u32, usize>,
    pub start_topic_id: u32,
    pub last_assigned_id: Option<u32>,
}

impl BatchOutcome {
    pub fn first_topic_id(&self) -> Option<u32> {
        self.last_assigned_id.map(|_| self.start_topic_id)
    }

    pub fn last_topic_id(&self) -> Option<u32> {
        self.last_assigned_id
    }

    /// Id the next successful document would receive; `None` once `u32` is used up.
    pub fn next_topic_id(&self) -> Option<u32> {
        match self.last_assigned_id {
            Some(last) => last.checked_add(1),
            None => Some(self.start_topic_id),
        }
    }
}

/// Converts documents in order. Ids are handed out only to documents that
/// produce a help topic, so they stay dense over successes. A read error, a
/// missing title or an exhausted id range records a failure and processing
/// continues.
pub fn generate_batch<I>(
    parser: &DocumentParser,
    documents: I,
    base_url: &str,
    start_topic_id: u32,
) -> BatchOutcome
where
    I: IntoIterator<Item = (String, Result<Vec<String>>)>,
{
    let mut outcome = BatchOutcome {
        start_topic_id,
        ..BatchOutcome::default()
    };

    for (path, lines) in documents {
        let lines = match lines {
            Ok(lines) => lines,
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(path = %path, reason = %reason, "failed to read document");
                outcome.failures.push(DocumentFailure { path, reason });
                continue;
            }
        };

        let Some(topic) = parser.parse_document(&lines, &path, base_url) else {
            warn!(path = %path, reason = NO_TITLE_REASON, "failed to parse document");
            outcome.failures.push(DocumentFailure {
                path,
                reason: NO_TITLE_REASON.to_string(),
            });
            continue;
        };

        let Some(topic_id) = outcome.next_topic_id() else {
            warn!(path = %path, reason = IDS_EXHAUSTED_REASON, "failed to assign topic id");
            outcome.failures.push(DocumentFailure {
                path,
                reason: IDS_EXHAUSTED_REASON.to_string(),
            });
            continue;
        };

        debug!(path = %path, topic_id, name = %topic.name, "generated help topic");

        outcome.statements.push(topic.to_insert_statement(topic_id));
        *outcome.category_counts.entry(topic.category_id).or_insert(0) += 1;
        outcome.last_assigned_id = Some(topic_id);
    }

    outcome
}
