//! Minimum/maximum mass over a population.

use trek_population::WalkerPopulation;

/// The smallest and largest walker mass in a population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassRange {
    /// Smallest mass.
    pub min: f64,
    /// Largest mass.
    pub max: f64,
}

impl MassRange {
    /// Range over `values`, or `None` if it is empty.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self { min: v, max: v }),
            Some(r) => Some(Self {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Map `mass` linearly onto `[0, 1]`, clamping outside values.
    ///
    /// A zero-width range maps everything to `0.0`.
    pub fn normalize(&self, mass: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            ((mass - self.min) / span).clamp(0.0, 1.0)
        }
    }
}

/// Min/max walker mass of `population`; `None` when it is empty.
///
/// Pure and read-only.
pub fn sample(population: &WalkerPopulation) -> Option<MassRange> {
    MassRange::of(population.iter().map(|w| w.mass))
}
