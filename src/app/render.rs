use crate::core::comparison::{format_tuition, ComparisonView};
use crate::core::pagination::Pagination;
use crate::domain::model::{FilterOptions, University};
use std::fmt::Write;

pub fn university_card(u: &University, selected: bool) -> String {
    let mut out = String::new();
    let marker = if selected { "[x]" } else { "[ ]" };
    let _ = writeln!(out, "{} {} ({})", marker, u.name, u.id);
    let _ = writeln!(out, "    Country:    {}", u.country);
    let _ = writeln!(out, "    Location:   {}", u.location);
    let _ = writeln!(out, "    Tuition:    {}/year", format_tuition(u.tuition_fee));
    let _ = writeln!(out, "    World Rank: #{}", u.ranking);
    let _ = writeln!(out, "    Est.:       {}", u.established_year);
    if let Some(score) = u.min_ielts_score {
        let _ = writeln!(out, "    Min IELTS:  {}", score);
    }
    if u.scholarships_available.unwrap_or(false) {
        let _ = writeln!(out, "    Scholarships available");
    }
    out
}

/// Page numbers with the current one bracketed, e.g. `< 1 [2] 3 >`.
pub fn page_strip(pagination: &Pagination) -> Option<String> {
    let pages = pagination.page_numbers();
    if pages.is_empty() {
        return None;
    }

    let mut parts = Vec::with_capacity(pages.len() + 2);
    parts.push(if pagination.has_previous() { "<" } else { " " }.to_string());
    for page in pages {
        if page == pagination.current_page() {
            parts.push(format!("[{}]", page));
        } else {
            parts.push(page.to_string());
        }
    }
    parts.push(if pagination.has_next() { ">" } else { " " }.to_string());
    Some(parts.join(" ").trim().to_string())
}

pub fn comparison_table(view: &ComparisonView<'_>) -> String {
    let rows = view.rows();
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    let left_width = rows
        .iter()
        .map(|r| r.left.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Compare Universities\n");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<lw$} | {:<vw$} | {}",
            row.label,
            row.left,
            row.right,
            lw = label_width,
            vw = left_width
        );
    }
    out
}

pub fn filter_vocabulary(options: &FilterOptions) -> String {
    let scores: Vec<String> = options.ielts_scores.iter().map(|s| s.to_string()).collect();
    let mut out = String::new();
    let _ = writeln!(out, "Countries:    {}", options.countries.join(", "));
    let _ = writeln!(out, "Courses:      {}", options.courses.join(", "));
    let _ = writeln!(out, "IELTS scores: {}", scores.join(", "));
    out
}
