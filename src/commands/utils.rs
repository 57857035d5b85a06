use crate::utils::config::{
    DEFAULT_COLUMNS, DIFF_REPORT_FILE_NAME, REPORT_FILE_SUFFIX, UNIT_MULTIPLIERS,
};

/// Display the recognized units and their base-unit multipliers
pub fn display_units() {
    println!("Recognized units (values are converted to ns or bytes)");
    println!();

    for (symbol, multiplier) in UNIT_MULTIPLIERS {
        println!("  {:<4} x {}", symbol, multiplier);
    }

    println!();
    println!("Any other unit is treated as already being in the base unit.");
}

/// Display version information
pub fn display_version() {
    println!("Bench Report Diff v{}", env!("CARGO_PKG_VERSION"));
    println!("Report files: *{}", REPORT_FILE_SUFFIX);
    println!("Output file:  {}", DIFF_REPORT_FILE_NAME);
    println!("Default columns: {}", DEFAULT_COLUMNS);
    println!();
    println!("Column-by-column diffing of benchmark CSV reports.");
}
