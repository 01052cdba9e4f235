//! Console formatting for CLI commands

use crate::{analysis::VaguenessReport, matrix::Matrix};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a strategy with a fixed number of decimals
pub fn print_matrix(title: &str, matrix: &Matrix) {
    print_subsection(title);
    for row in matrix.row_iter() {
        println!("  {}", format_row(row));
    }
}

/// Print every vagueness criterion
pub fn print_vagueness_report(report: &VaguenessReport) {
    print_subsection("Vagueness");
    print_kv("Prototypes", &format!("{:?}", report.prototypes));
    print_kv("Unique maxima", yes_no(report.unique_maxima));
    print_kv("Distinct prototypes", yes_no(report.distinct_prototypes));
    print_kv("Receiver monotone", yes_no(report.receiver_monotone));
    print_kv("Sender monotone", yes_no(report.sender_monotone));
    print_kv(
        "Receiver entropy",
        &format!("{:.4} nats", report.mean_receiver_entropy),
    );
}

/// Verdict line, marked provisional when the run stopped before converging
pub fn format_verdict(report: &VaguenessReport, converged: bool) -> String {
    if converged {
        report.verdict().to_string()
    } else {
        format!(
            "{} (iteration limit reached; the language did not converge)",
            report.verdict()
        )
    }
}

/// Entries rendered with three decimals, space separated
pub fn format_row(row: &[f64]) -> String {
    row.iter()
        .map(|value| format!("{value:.3}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
