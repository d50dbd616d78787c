//! Per-cell heat field.

use crate::range::MassRange;
use trek_core::CellId;
use trek_population::WalkerPopulation;
use trek_trail::{TrailError, TrailGraph};

/// Mass per trail cell, summed over all three directions.
///
/// Values are indexed by [`CellId`] in graph arena order. Cells with no
/// walker hold `0.0`. This is the value a heatmap renderer colours.
#[derive(Clone, Debug, PartialEq)]
pub struct CellMassField {
    values: Vec<f64>,
}

impl CellMassField {
    /// Flatten `population` onto the cells of `graph`.
    ///
    /// # Errors
    ///
    /// [`TrailError::CellNotFound`] if a walker sits on a cell that is
    /// not in `graph`.
    pub fn from_population(
        population: &WalkerPopulation,
        graph: &TrailGraph,
    ) -> Result<Self, TrailError> {
        let mut values = vec![0.0; graph.cell_count()];
        for walker in population.iter() {
            let slot = values
                .get_mut(walker.cell.index())
                .ok_or(TrailError::CellNotFound { cell: walker.cell })?;
            *slot += walker.mass;
        }
        Ok(Self { values })
    }

    /// Mass at `cell`; `None` if the cell is out of range.
    pub fn get(&self, cell: CellId) -> Option<f64> {
        self.values.get(cell.index()).copied()
    }

    /// All values in cell order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sum over all cells.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Min/max over every cell, empty cells included.
    pub fn range(&self) -> Option<MassRange> {
        MassRange::of(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trek_core::{Direction, Walker};
    use trek_population::merge;
    use trek_trail::TrailLayout;

    #[test]
    fn directions_sum_into_one_cell() {
        let g = TrailLayout::straight(3).build().unwrap();
        let pop = merge([
            Walker::new(CellId(1), Direction::Forward, 0.25),
            Walker::new(CellId(1), Direction::Backward, 0.25),
            Walker::new(CellId(2), Direction::Stay, 0.5),
        ]);
        let field = CellMassField::from_population(&pop, &g).unwrap();
        assert_eq!(field.values(), &[0.0, 0.5, 0.5]);
        assert_eq!(field.total(), 1.0);
        assert_eq!(field.range(), Some(MassRange { min: 0.0, max: 0.5 }));
        assert_eq!(field.get(CellId(3)), None);
    }

    #[test]
    fn walker_off_the_graph_is_an_error() {
        let g = TrailLayout::straight(2).build().unwrap();
        let pop = WalkerPopulation::single(Walker::new(CellId(5), Direction::Forward, 1.0));
        assert_eq!(
            CellMassField::from_population(&pop, &g),
            Err(TrailError::CellNotFound { cell: CellId(5) })
        );
    }
}
