// src/config/state.rs
use chrono::NaiveDate;

use crate::specs::rounds::{FIRST_ROUND, RUNOFF, Round, RoundSpec};
use crate::view::Filter;

/// Dashboard selections for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    /// Candidate names in the order the user sees them.
    pub selected: Vec<String>,
    /// None = all institutes.
    pub institute: Option<String>,
    /// None = the full date range of the data.
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl RoundState {
    pub fn for_spec(spec: &RoundSpec) -> Self {
        Self {
            selected: spec.default_selected.iter().map(|c| s!(*c)).collect(),
            institute: None,
            range: None,
        }
    }

    pub fn filter(&self) -> Filter {
        Filter { range: self.range, institute: self.institute.clone() }
    }

    pub fn selected_refs(&self) -> Vec<&str> {
        self.selected.iter().map(String::as_str).collect()
    }

    /// Flip one candidate, keeping the round's candidate order.
    pub fn toggle(&mut self, spec: &RoundSpec, candidate: &str) {
        if let Some(ix) = self.selected.iter().position(|c| c == candidate) {
            self.selected.remove(ix);
        } else {
            self.selected.push(s!(candidate));
            let order = |c: &String| spec.candidates.iter().position(|x| *x == c.as_str()).unwrap_or(usize::MAX);
            self.selected.sort_by_key(order);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuiState {
    pub round: Round,
    pub first: RoundState,
    pub runoff: RoundState,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            round: Round::First,
            first: RoundState::for_spec(&FIRST_ROUND),
            runoff: RoundState::for_spec(&RUNOFF),
        }
    }
}

impl GuiState {
    pub fn current(&self) -> &RoundState {
        match self.round { Round::First => &self.first, Round::Runoff => &self.runoff }
    }

    pub fn current_mut(&mut self) -> &mut RoundState {
        match self.round { Round::First => &mut self.first, Round::Runoff => &mut self.runoff }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_come_from_spec() {
        let s = GuiState::default();
        assert_eq!(s.first.selected, vec!["Lula", "Tarcísio", "Zema", "Branco / Nulo / Indeciso"]);
        assert_eq!(s.runoff.selected, vec!["Lula", "Tarcísio"]);
        assert_eq!(s.current().filter(), Filter::default());
    }

    #[test]
    fn toggle_keeps_spec_order() {
        let mut r = RoundState::for_spec(&FIRST_ROUND);
        r.toggle(&FIRST_ROUND, "Tarcísio");
        r.toggle(&FIRST_ROUND, "Ciro Gomes");
        r.toggle(&FIRST_ROUND, "Tarcísio");
        assert_eq!(r.selected, vec!["Lula", "Tarcísio", "Ciro Gomes", "Zema", "Branco / Nulo / Indeciso"]);
    }
}
