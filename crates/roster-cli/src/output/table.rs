use roster_core::import::outcome::{truncated, ImportIssue, ImportOutcome};
use roster_core::matching::{LinkDecision, MatchSuggestion};
use roster_core::model::{ParsedCourseRecord, ParsedExamRecord};
use roster_core::parsing::ParseOutput;

pub fn print_parsed_courses(parsed: &ParseOutput<ParsedCourseRecord>, limit: usize) {
    println!("=== Courses ({} valid) ===\n", parsed.rows.len());

    let width = parsed.rows.iter().map(|r| r.code.len()).max().unwrap_or(4);
    for r in &parsed.rows {
        println!("  {:<width$}  {}", r.code, r.full_title, width = width);
    }
    println!();

    print_issues("Errors", &parsed.errors, limit);
    print_issues("Warnings", &parsed.warnings, limit);
}

pub fn print_parsed_exams(parsed: &ParseOutput<ParsedExamRecord>, limit: usize) {
    println!("=== Exams ({} valid) ===\n", parsed.rows.len());

    let width = parsed.rows.iter().map(|r| r.code.len()).max().unwrap_or(4);
    for r in &parsed.rows {
        let schedule = match (r.date, r.start_time, r.end_time) {
            (Some(d), Some(s), Some(e)) => format!("{d} {}-{}", s.format("%H:%M"), e.format("%H:%M")),
            (Some(d), Some(s), None) => format!("{d} {}", s.format("%H:%M")),
            (Some(d), _, _) => d.to_string(),
            _ => "unscheduled".to_string(),
        };
        println!("  {:<width$}  {}  [{}]", r.code, r.name, schedule, width = width);
        println!("  {:<width$}  {}", "", r.instructor_emails.join(", "), width = width);
    }
    println!();

    print_issues("Errors", &parsed.errors, limit);
    print_issues("Warnings", &parsed.warnings, limit);
}

pub fn print_outcome(outcome: &ImportOutcome, limit: usize) {
    println!("=== Import ===\n");
    println!("  Created: {}", outcome.created_count);
    println!("  Updated: {}", outcome.updated_count);

    let status = if outcome.is_clean() {
        "complete"
    } else if outcome.is_partial_success() {
        "partial success"
    } else if outcome.is_total_failure() {
        "nothing imported"
    } else {
        "complete with warnings"
    };
    println!("  Status:  {}", status);
    if outcome.stopped_early {
        println!("  Stopped before the last row");
    }
    println!();

    print_issues("Errors", &outcome.errors, limit);
    print_issues("Warnings", &outcome.warnings, limit);
}

pub fn print_suggestions(suggestions: &[MatchSuggestion], links: &[LinkDecision]) {
    println!("=== Link suggestions ===\n");

    let id_width = suggestions.iter().map(|s| s.entity_id.len()).max().unwrap_or(6);
    let raw_width = suggestions.iter().map(|s| s.raw_code.len()).max().unwrap_or(4);

    for s in suggestions {
        let target = s
            .candidate
            .as_ref()
            .map(|c| format!("{} ({})", c.target_code, c.target_id))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<id_width$}  {:<raw_width$}  {:<6}  {}",
            s.entity_id,
            s.raw_code,
            s.tier().to_string(),
            target,
            id_width = id_width,
            raw_width = raw_width
        );
    }
    println!();

    if !links.is_empty() {
        println!("  Auto-accepted links:");
        for l in links {
            println!("    {} -> {}", l.entity_id, l.target_id);
        }
        println!();
    }
}

fn print_issues(title: &str, issues: &[ImportIssue], limit: usize) {
    if issues.is_empty() {
        return;
    }
    println!("  {} ({}):", title, issues.len());
    let (shown, hidden) = truncated(issues, limit);
    for issue in shown {
        println!("    {}", issue);
    }
    if hidden > 0 {
        println!("    ... and {} more", hidden);
    }
    println!();
}
