use crate::domain::model::{FilterCriteria, FilterKey};

/// Current search criteria of one finder session.
///
/// Values are stored trimmed; a blank value clears its key. No cross-field
/// validation happens here (a `tuitionMin` above `tuitionMax` is passed through
/// to the listing service as-is).
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    criteria: FilterCriteria,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, key: FilterKey, raw_value: &str) -> &FilterCriteria {
        self.criteria.set(key, raw_value);
        tracing::debug!(
            "Filter {} -> {:?}",
            key,
            self.criteria.get(key).unwrap_or("<unset>")
        );
        &self.criteria
    }

    pub fn reset(&mut self) {
        self.criteria.clear();
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.criteria.get(key)
    }

    pub fn active_filter_count(&self) -> usize {
        self.criteria.iter().filter(|(_, v)| !v.is_empty()).count()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn snapshot(&self) -> FilterCriteria {
        self.criteria.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_update_equals_clearing() {
        let mut typed = FilterState::new();
        typed.update(FilterKey::Country, "UK");
        typed.update(FilterKey::Name, "Oxford");
        typed.update(FilterKey::Name, "   \t ");

        let mut cleared = FilterState::new();
        cleared.update(FilterKey::Country, "UK");

        assert_eq!(typed.snapshot(), cleared.snapshot());
        assert_eq!(typed.get(FilterKey::Name), None);
    }

    #[test]
    fn test_update_trims_value() {
        let mut state = FilterState::new();
        state.update(FilterKey::Location, "  London  ");
        assert_eq!(state.get(FilterKey::Location), Some("London"));
    }

    #[test]
    fn test_active_filter_count_and_reset() {
        let mut state = FilterState::new();
        assert_eq!(state.active_filter_count(), 0);

        state.update(FilterKey::Country, "Canada");
        state.update(FilterKey::TuitionMin, "10000");
        state.update(FilterKey::Scholarships, "true");
        state.update(FilterKey::Course, "");
        assert_eq!(state.active_filter_count(), 3);

        state.reset();
        assert_eq!(state.active_filter_count(), 0);
        assert!(state.criteria().is_empty());
    }

    #[test]
    fn test_inverted_range_is_not_validated() {
        let mut state = FilterState::new();
        state.update(FilterKey::TuitionMin, "50000");
        state.update(FilterKey::TuitionMax, "100");
        assert_eq!(state.active_filter_count(), 2);
    }
}
