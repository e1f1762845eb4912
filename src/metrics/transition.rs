use crate::strategy::Signal;
use indexmap::IndexSet;
use prettytable::{Cell, Row, Table};
use serde::Serialize;

//empirical one-step transition probabilities between observed signals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionModel {
    //observed states in order of first appearance
    states: IndexSet<Signal>,

    //counts[i][j] = number of i -> j moves
    counts: Vec<Vec<u64>>,

    //row i is none when state i never moved to a defined next state
    probabilities: Vec<Option<Vec<f64>>>,
}

impl TransitionModel {
    //builds the model from a signal sequence; undefined signals break the chain
    pub fn from_signals(signals: &[Option<Signal>]) -> Self {
        let states: IndexSet<Signal> = signals.iter().flatten().copied().collect();
        let n = states.len();
        let mut counts = vec![vec![0u64; n]; n];

        for pair in signals.windows(2) {
            if let (Some(from), Some(to)) = (pair[0], pair[1]) {
                //both were inserted above
                if let (Some(i), Some(j)) = (states.get_index_of(&from), states.get_index_of(&to)) {
                    counts[i][j] += 1;
                }
            }
        }

        let probabilities = counts
            .iter()
            .map(|row| {
                let total: u64 = row.iter().sum();
                if total == 0 {
                    None
                } else {
                    Some(row.iter().map(|&c| c as f64 / total as f64).collect())
                }
            })
            .collect();

        tracing::debug!(states = n, "built transition model");

        TransitionModel {
            states,
            counts,
            probabilities,
        }
    }

    pub fn states(&self) -> Vec<Signal> {
        self.states.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    //number of observed from -> to moves (0 for unseen states)
    pub fn count(&self, from: Signal, to: Signal) -> u64 {
        match (self.states.get_index_of(&from), self.states.get_index_of(&to)) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    //probabilities out of `state`, ordered like states()
    pub fn row(&self, state: Signal) -> Option<&[f64]> {
        let i = self.states.get_index_of(&state)?;
        self.probabilities[i].as_deref()
    }

    pub fn probability(&self, from: Signal, to: Signal) -> Option<f64> {
        let j = self.states.get_index_of(&to)?;
        self.row(from).map(|row| row[j])
    }

    //builds the labeled matrix table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        let mut header = vec![Cell::new("From \\ To")];
        header.extend(self.states.iter().map(|s| Cell::new(&s.to_string())));
        table.add_row(Row::new(header));

        for (i, state) in self.states.iter().enumerate() {
            let mut cells = vec![Cell::new(&state.to_string())];
            match &self.probabilities[i] {
                Some(row) => cells.extend(row.iter().map(|p| Cell::new(&format!("{:.4}", p)))),
                None => cells.extend(self.states.iter().map(|_| Cell::new("undefined"))),
            }
            table.add_row(Row::new(cells));
        }

        table
    }

    //prints the transition matrix in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn states_are_observed_values_only() {
        let model = TransitionModel::from_signals(&[
            None,
            Some(Signal::Sell),
            Some(Signal::Buy),
            Some(Signal::Sell),
        ]);

        assert_eq!(model.states(), vec![Signal::Sell, Signal::Buy]);
        assert_eq!(model.probability(Signal::Hold, Signal::Sell), None);
    }

    #[test]
    fn rows_sum_to_one() {
        let signals: Vec<Option<Signal>> = [1, 1, -1, 0, 1, -1, -1, 0, 0, 1, 1]
            .iter()
            .map(|&v| Signal::from_value(v))
            .collect();
        let model = TransitionModel::from_signals(&signals);

        for state in model.states() {
            let row = model.row(state).unwrap();
            assert_abs_diff_eq!(row.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn counts_consecutive_pairs() {
        let model = TransitionModel::from_signals(&[
            Some(Signal::Buy),
            Some(Signal::Buy),
            Some(Signal::Sell),
            Some(Signal::Buy),
        ]);

        assert_eq!(model.count(Signal::Buy, Signal::Buy), 1);
        assert_eq!(model.count(Signal::Buy, Signal::Sell), 1);
        assert_eq!(model.count(Signal::Sell, Signal::Buy), 1);
        assert_eq!(model.count(Signal::Sell, Signal::Sell), 0);
        assert_eq!(model.probability(Signal::Buy, Signal::Buy), Some(0.5));
        assert_eq!(model.probability(Signal::Sell, Signal::Buy), Some(1.0));
    }

    #[test]
    fn single_self_transition_is_certain() {
        let model = TransitionModel::from_signals(&[Some(Signal::Hold), Some(Signal::Hold)]);

        assert_eq!(model.states(), vec![Signal::Hold]);
        assert_eq!(model.probability(Signal::Hold, Signal::Hold), Some(1.0));
    }

    #[test]
    fn terminal_only_state_has_undefined_row() {
        let model = TransitionModel::from_signals(&[
            Some(Signal::Buy),
            Some(Signal::Buy),
            Some(Signal::Sell),
        ]);

        assert_eq!(model.row(Signal::Sell), None);
        assert_eq!(model.probability(Signal::Sell, Signal::Buy), None);
        assert_eq!(model.row(Signal::Buy), Some(&[0.5, 0.5][..]));
    }

    #[test]
    fn gaps_break_the_chain() {
        let model = TransitionModel::from_signals(&[Some(Signal::Buy), None, Some(Signal::Sell)]);

        assert_eq!(model.count(Signal::Buy, Signal::Sell), 0);
        assert_eq!(model.row(Signal::Buy), None);
    }

    #[test]
    fn empty_sequence_has_no_states() {
        let model = TransitionModel::from_signals(&[None, None]);
        assert!(model.is_empty());
        assert_eq!(model.to_table().len(), 1);
    }
}
