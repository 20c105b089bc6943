/// Category used when no rule matches the document path.
pub const DEFAULT_CATEGORY_ID: u32 = 35;

/// Ordered path-substring rules; the first rule whose key occurs anywhere in
/// the path wins. Declaration order is the precedence, so `geometry` shadows
/// `geometry-constructors` and `operators` shadows `comparison-operators`.
pub const CATEGORY_RULES: &[(&str, u32)] = &[
    ("string-functions", 37),
    ("aggregate-functions", 16),
    ("numeric-functions", 4),
    ("date-time-functions", 31),
    ("control-flow-functions", 7),
    ("encryption-functions", 12),
    ("information-functions", 17),
    ("bit-functions", 19),
    ("miscellaneous-functions", 14),
    ("data-types", 22),
    ("plugins", 5),
    ("stored-procedures", 33),
    ("stored-functions", 33),
    ("stored-routines", 33),
    ("transactions", 8),
    ("data-definition", 39),
    ("data-manipulation", 27),
    ("account-management", 10),
    ("geometry", 34),
    ("geometry-constructors", 24),
    ("geometry-properties", 36),
    ("geometry-relations", 30),
    ("sql-language-structure", 29),
    ("operators", 38),
    ("comparison-operators", 18),
    ("logical-operators", 15),
    ("user-defined-functions", 21),
    ("table-maintenance", 20),
    ("administrative", 26),
];

pub fn category_id_for_path(path: &str) -> u32 {
    CATEGORY_RULES
        .iter()
        .find(|(key, _)| path.contains(*key))
        .map(|(_, category_id)| *category_id)
        .unwrap_or(DEFAULT_CATEGORY_ID)
}
