//! Configuration and constants for the CLI.

/// Column that identifies a benchmarked method in every report row
pub const METHOD_COLUMN: &str = "Method";

/// File name suffix that marks a benchmark report
pub const REPORT_FILE_SUFFIX: &str = "-report.csv";

/// Extension of threshold definition files
pub const THRESHOLD_FILE_EXTENSION: &str = "json";

/// Name of the generated diff file
pub const DIFF_REPORT_FILE_NAME: &str = "DiffReport.csv";

/// Columns compared when none are given on the command line
pub const DEFAULT_COLUMNS: &str = "Method,Mean,Median,Max,Gen 0,Gen 1,Gen 2,Allocated";

/// Separator between cells of the diff file
pub const OUTPUT_DELIMITER: &str = ", ";

// Header label suffixes for the diff file
pub const DIFF_LABEL_SUFFIX: &str = " Diff";
pub const THRESHOLD_LABEL_SUFFIX: &str = " W/I ThresH";

/// Unit multipliers to the canonical base unit.
///
/// Time is normalized to nanoseconds, memory to bytes. The symbols are
/// distinct across both domains so a single table is enough.
pub const UNIT_MULTIPLIERS: &[(&str, u32)] = &[
    ("s", 1_000_000_000),
    ("ms", 1_000_000),
    ("us", 1_000),
    ("ns", 1),
    ("GB", 1_000_000_000),
    ("MB", 1_000_000),
    ("KB", 1_000),
    ("B", 1),
];
