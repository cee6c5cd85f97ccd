use crate::domain::model::University;
use std::collections::VecDeque;

pub const MAX_COMPARED: usize = 2;

/// Signals that close an open comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissSignal {
    CloseButton,
    EscapeKey,
    BackdropClick,
}

/// Up to two university ids picked for side-by-side comparison, oldest
/// first. Closing the view keeps the pair.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSelector {
    selected: VecDeque<String>,
    open: bool,
}

impl ComparisonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, id: &str) -> &VecDeque<String> {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            if self.selected.len() >= MAX_COMPARED {
                if let Some(evicted) = self.selected.pop_front() {
                    tracing::debug!("Comparison full, dropping {}", evicted);
                }
            }
            self.selected.push_back(id.to_string());
        }
        &self.selected
    }

    pub fn selected(&self) -> Vec<&str> {
        self.selected.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Card hint: the selection is full and `id` is not part of it.
    pub fn is_locked_out(&self, id: &str) -> bool {
        self.selected.len() >= MAX_COMPARED && !self.is_selected(id)
    }

    pub fn can_open(&self) -> bool {
        self.selected.len() == MAX_COMPARED
    }

    /// Opens the view when exactly two ids are selected; returns whether it
    /// is open afterwards.
    pub fn open(&mut self) -> bool {
        if self.can_open() {
            self.open = true;
        }
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn dismiss(&mut self, signal: DismissSignal) {
        tracing::debug!("Comparison dismissed via {:?}", signal);
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Side-by-side view of the selected pair, looked up in `items` (the
    /// currently fetched results). Columns follow the order of `items`, not
    /// the order of selection. `None` unless the view is open and both ids
    /// resolve.
    pub fn view<'a>(&self, items: &'a [University]) -> Option<ComparisonView<'a>> {
        if !self.open || !self.can_open() {
            return None;
        }

        let mut matched = items.iter().filter(|u| self.is_selected(&u.id));
        let left = matched.next()?;
        let right = matched.next()?;
        Some(ComparisonView { left, right })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ComparisonView<'a> {
    pub left: &'a University,
    pub right: &'a University,
}

impl ComparisonView<'_> {
    pub fn rows(&self) -> Vec<ComparisonRow> {
        vec![
            comparison_row(self, "University Name", |u| u.name.clone()),
            comparison_row(self, "Country", |u| u.country.clone()),
            comparison_row(self, "Location", |u| u.location.clone()),
            comparison_row(self, "Tuition Fee", |u| format_tuition(u.tuition_fee)),
            comparison_row(self, "World Ranking", |u| format!("#{}", u.ranking)),
            comparison_row(self, "Established Year", |u| u.established_year.to_string()),
            comparison_row(self, "Min IELTS", |u| {
                u.min_ielts_score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "N/A".to_string())
            }),
            comparison_row(self, "Scholarships", |u| {
                if u.scholarships_available.unwrap_or(false) {
                    "Yes".to_string()
                } else {
                    "No".to_string()
                }
            }),
            comparison_row(self, "Popular Courses", |u| match u.courses.as_deref() {
                Some(courses) if !courses.is_empty() => courses
                    .iter()
                    .take(4)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
                _ => "N/A".to_string(),
            }),
        ]
    }
}

fn comparison_row(
    view: &ComparisonView<'_>,
    label: &'static str,
    value: fn(&University) -> String,
) -> ComparisonRow {
    ComparisonRow {
        label,
        left: value(view.left),
        right: value(view.right),
    }
}

/// Whole US dollars with thousands separators; zero reads as "Free".
pub fn format_tuition(amount: f64) -> String {
    if amount == 0.0 {
        return "Free".to_string();
    }

    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
