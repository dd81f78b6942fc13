//! Sweeping one strategy parameter against itself.

use rustc_hash::FxHashMap;

use crate::core::{Error, Result};
use crate::registry::{encode, parameters_from_id, ProviderHandle};
use crate::runner::{MatchResult, MatchSpec};
use crate::strategy::{ParameterDescription, StrategyParameters};

use super::{Experiment, SpecMultiset};

/// Plays one strategy against itself under every ordered pair of values of
/// one parameter.
///
/// Values are stored in the canonical form strategy ids use, so `"1.50"`
/// and `"1.5"` name the same cell.
#[derive(Clone)]
pub struct ParameterChartExperiment {
    name: String,
    provider: ProviderHandle,
    base: StrategyParameters,
    varied: ParameterDescription,
    values_by_game: Vec<(String, Vec<String>)>,
    iterations_per_configuration: usize,
}

impl ParameterChartExperiment {
    /// Fails if the provider has no parameter named `varied`, or if a value
    /// does not parse for it.
    pub fn new(
        name: impl Into<String>,
        provider: ProviderHandle,
        base: StrategyParameters,
        varied: &str,
        values_by_game: Vec<(String, Vec<String>)>,
        iterations_per_configuration: usize,
    ) -> Result<Self> {
        let varied = *provider
            .parameters()
            .iter()
            .find(|d| d.name() == varied)
            .ok_or_else(|| Error::UnknownParameter {
                strategy: provider.name().to_string(),
                parameter: varied.to_string(),
            })?;
        let values_by_game = values_by_game
            .into_iter()
            .map(|(game, values)| {
                let values = values
                    .iter()
                    .map(|text| varied.parse(text).map(|value| value.to_string()))
                    .collect::<Result<Vec<_>>>()?;
                Ok((game, values))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: name.into(),
            provider,
            base,
            varied,
            values_by_game,
            iterations_per_configuration,
        })
    }

    fn strategy_id(&self, value: &str) -> Result<String> {
        let params = self.base.with_parsed(&self.varied, value)?;
        encode(self.provider.as_ref(), &params)
    }

    /// Mean first-role score for every (row value, column value) cell.
    ///
    /// Results from other experiments, other games, or with values no longer
    /// charted are ignored. Errored matches are counted but not scored.
    pub fn summarize(&self, results: &[MatchResult]) -> Result<Vec<ChartCell>> {
        let mut cells: FxHashMap<(&str, String, String), ChartCell> = FxHashMap::default();

        for result in results.iter().filter(|r| r.spec.experiment_name == self.name) {
            let Some((game, values)) = self
                .values_by_game
                .iter()
                .find(|(game, _)| *game == result.spec.game_id)
            else {
                continue;
            };
            let [first, second] = result.spec.strategy_ids.as_slice() else {
                continue;
            };
            let row = self.value_in(first)?;
            let column = self.value_in(second)?;
            let (Some(row), Some(column)) = (row, column) else {
                continue;
            };
            if !values.contains(&row) || !values.contains(&column) {
                continue;
            }

            let cell = cells
                .entry((game.as_str(), row.clone(), column.clone()))
                .or_insert_with(|| ChartCell::empty(game, row, column));
            match result.outcome(0) {
                Some(score) if !result.had_error => {
                    cell.first_role_total += score;
                    cell.matches += 1;
                    cell.total_milliseconds += result.milliseconds_elapsed;
                }
                _ => cell.errors += 1,
            }
        }

        let mut summary: Vec<ChartCell> = cells.into_values().collect();
        summary.sort_by(|a, b| {
            (&a.game_id, &a.row_value, &a.column_value).cmp(&(&b.game_id, &b.row_value, &b.column_value))
        });
        Ok(summary)
    }

    fn value_in(&self, id: &str) -> Result<Option<String>> {
        Ok(parameters_from_id(id)?.remove(self.varied.name()))
    }
}

impl std::fmt::Debug for ParameterChartExperiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterChartExperiment")
            .field("name", &self.name)
            .field("provider", &self.provider.name())
            .field("varied", &self.varied.name())
            .field("values_by_game", &self.values_by_game)
            .field("iterations_per_configuration", &self.iterations_per_configuration)
            .finish()
    }
}

/// Aggregated results of one cell of a parameter chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartCell {
    pub game_id: String,
    /// Value used by role 0.
    pub row_value: String,
    /// Value used by role 1.
    pub column_value: String,
    pub matches: usize,
    pub errors: usize,
    pub first_role_total: f64,
    pub total_milliseconds: u64,
}

impl ChartCell {
    fn empty(game_id: &str, row_value: String, column_value: String) -> Self {
        Self {
            game_id: game_id.to_string(),
            row_value,
            column_value,
            matches: 0,
            errors: 0,
            first_role_total: 0.0,
            total_milliseconds: 0,
        }
    }

    /// Mean score of role 0, if any match finished.
    #[must_use]
    pub fn first_role_mean(&self) -> Option<f64> {
        (self.matches > 0).then(|| self.first_role_total / self.matches as f64)
    }
}

impl Experiment for ParameterChartExperiment {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches_to_run(&self) -> Result<SpecMultiset> {
        let mut specs = SpecMultiset::new();
        for (game, values) in &self.values_by_game {
            for row in values {
                for column in values {
                    let ids = vec![self.strategy_id(row)?, self.strategy_id(column)?];
                    specs.set_count(
                        MatchSpec::new(&self.name, game, ids),
                        self.iterations_per_configuration,
                    );
                }
            }
        }
        Ok(specs)
    }
}
