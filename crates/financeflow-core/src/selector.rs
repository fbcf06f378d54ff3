//! Searchable account selector
//!
//! Editable digit-only text plus a popup of candidate ids. The selector
//! never talks to the backend; candidates come from the account store.

use financeflow_utils::digits_only;

/// Candidates containing `term`, compared case-insensitively
pub fn filter_candidates<'a, S: AsRef<str>>(candidates: &'a [S], term: &str) -> Vec<&'a str> {
    let needle = term.to_lowercase();
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    text: String,
    search: String,
    open: bool,
}

impl Selector {
    pub fn new(value: &str) -> Self {
        Self {
            text: digits_only(value),
            ..Self::default()
        }
    }

    /// Committed value
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// What the input box shows: the search term while open
    pub fn display(&self) -> &str {
        if self.open {
            &self.search
        } else {
            &self.text
        }
    }

    pub fn focus(&mut self) {
        self.open = true;
        self.search = self.text.clone();
    }

    /// Typed input. Returns the filtered value to feed into the form.
    pub fn input(&mut self, raw: &str) -> &str {
        let value = digits_only(raw);
        self.search = value.clone();
        self.text = value;
        self.open = true;
        &self.text
    }

    pub fn select(&mut self, value: &str) {
        self.text = value.to_string();
        self.search.clear();
        self.open = false;
    }

    pub fn escape(&mut self) {
        self.open = false;
        self.search.clear();
    }

    pub fn click_outside(&mut self) {
        self.escape();
    }

    /// Select the only match, if there is exactly one
    pub fn enter<S: AsRef<str>>(&mut self, candidates: &[S]) -> Option<String> {
        let only = match self.matches(candidates).as_slice() {
            [only] => only.to_string(),
            _ => return None,
        };
        self.select(&only);
        Some(only)
    }

    pub fn arrow_down(&mut self) {
        self.open = true;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.search.clear();
    }

    pub fn matches<'a, S: AsRef<str>>(&self, candidates: &'a [S]) -> Vec<&'a str> {
        filter_candidates(candidates, &self.search)
    }
}
