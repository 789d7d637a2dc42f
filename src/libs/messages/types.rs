/// Every user-facing message the CLI prints.
///
/// Text lives in the `Display` implementation in `display.rs`; callers only
/// pick a variant and its parameters.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleEngine,
    ConfigReadFailed(String),

    // === PROMPTS ===
    PromptDefaultShift,
    PromptDefaultRange,
    PromptExtrapolateOpenShifts,
    PromptTopReasons,

    // === SNAPSHOT MESSAGES ===
    SnapshotLoadFailed(String),
    SnapshotLoaded(String, usize), // line, row count
    InvalidDate(String),

    // === METRICS MESSAGES ===
    MetricsHeader(String, String, String), // line, date, shift
    StagesHeader,
    NoStagesConfigured,
    NoActivityForDate(String),

    // === TREND MESSAGES ===
    TrendHeader(String, String, String), // line, range, shift
    TopReasonsHeader(usize),
    NoDowntimeReasons,

    // === COVERAGE MESSAGES ===
    CoverageHeader(String, String), // line, date
    RunsHeader,
    DowntimeHeader,
    NoRowsForDate(String),
}
