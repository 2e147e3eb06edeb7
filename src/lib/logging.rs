//! Formatted logging of splitter summaries.

use crate::metrics::UmiSplitMetrics;

/// Formats an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use dupsets_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// # Examples
///
/// ```
/// use dupsets_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Logs a summary of UMI-aware duplicate-set splitting at info level.
#[allow(clippy::cast_precision_loss)]
pub fn log_umi_split_summary(metrics: &UmiSplitMetrics) {
    log::info!("UMI-aware Duplicate Set Summary:");
    log::info!("  Input duplicate sets: {}", format_count(metrics.input_sets));
    log::info!("  Output duplicate sets: {}", format_count(metrics.output_sets));
    log::info!("  Records: {}", format_count(metrics.input_records));

    if metrics.input_sets > 0 {
        log::info!("  Avg sets per input set: {:.2}", metrics.mean_sets_per_input());
        log::info!("  Max sets per input set: {}", format_count(metrics.max_sets_per_input));
    }

    if metrics.sets_missing_umi > 0 {
        let fraction = metrics.sets_missing_umi as f64 / metrics.input_sets as f64;
        log::info!(
            "  Sets passed through without a UMI: {} ({})",
            format_count(metrics.sets_missing_umi),
            format_percent(fraction, 2)
        );
    }

    if metrics.failed_sets > 0 {
        log::info!(
            "  Sets dropped on UMI length mismatch: {}",
            format_count(metrics.failed_sets)
        );
    }
}
