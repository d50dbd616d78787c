//! Procedural trail growth by a seeded self-avoiding random walk.
//!
//! Growth starts a single chain at the origin. Each chain steps into a
//! random legal cell in its forward cone (straight ahead or 45° either
//! side), falling back to a 90° turn when the cone is blocked. A
//! candidate is legal when it is inside the bounds and the coordinate
//! range, unoccupied, and has fewer than two occupied cells in its
//! 8-neighbourhood, the cell it grows from included.
//!
//! The middle cell of a fork touches its two siblings, so a middle
//! branch may stop at its first cell; it is then counted as truncated.
//!
//! At random, subject to [`GrowthConfig::fork_probability`], depth, and
//! spacing limits, a chain ends in a fork and its three branches are
//! queued as new chains. A chain with no legal successor stops early;
//! this is reported in [`GrowthReport`] and logged, never a panic.

use crate::bounds::GridBounds;
use crate::error::TrailError;
use crate::graph::{GraphBuilder, TrailGraph};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use trek_core::{CellId, GridPos, Heading, ProbabilityError};

/// Occupied neighbours at which a candidate is considered crowded.
const CROWDING_LIMIT: usize = 2;

/// Rotations tried first, then the fallback turns.
const CONE: [i32; 3] = [0, -1, 1];
const FALLBACK: [i32; 2] = [-2, 2];

/// Parameters for [`grow`].
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthConfig {
    /// Position of the origin cell.
    pub origin: GridPos,
    /// Heading the trunk starts out in.
    pub initial_heading: Heading,
    /// Cells in the trunk, excluding the origin.
    pub trunk_length: u32,
    /// Cells in each branch, including the branch cell. Must be >= 1.
    pub branch_length: u32,
    /// Maximum fork nesting. 0 disables forking.
    pub max_fork_depth: u32,
    /// Chance per step that a chain ends in a fork, in `[0, 1]`.
    pub fork_probability: f64,
    /// Minimum cells a chain grows before it may fork.
    pub min_fork_spacing: u32,
    /// Hard cap on the total cell count.
    pub max_cells: usize,
    /// Optional grid the trail must stay inside.
    pub bounds: Option<GridBounds>,
    /// RNG seed; equal seeds give equal trails.
    pub seed: u64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            origin: GridPos::new(0, 0),
            initial_heading: Heading::East,
            trunk_length: 16,
            branch_length: 12,
            max_fork_depth: 2,
            fork_probability: 0.15,
            min_fork_spacing: 4,
            max_cells: 4096,
            bounds: None,
            seed: 0,
        }
    }
}

impl GrowthConfig {
    /// Start a builder from [`GrowthConfig::default`].
    pub fn builder() -> GrowthConfigBuilder {
        GrowthConfigBuilder {
            config: GrowthConfig::default(),
        }
    }

    /// Check the parameters without growing anything.
    pub fn validate(&self) -> Result<(), TrailError> {
        ProbabilityError::check("fork_probability", self.fork_probability).map_err(|e| {
            TrailError::InvalidGrowth {
                reason: e.to_string(),
            }
        })?;
        if self.branch_length == 0 {
            return Err(TrailError::InvalidGrowth {
                reason: "branch_length must be at least 1".into(),
            });
        }
        if self.max_cells == 0 {
            return Err(TrailError::InvalidGrowth {
                reason: "max_cells must be at least 1".into(),
            });
        }
        if let Some(bounds) = self.bounds {
            bounds.check(self.origin)?;
        }
        Ok(())
    }
}

/// Builder for [`GrowthConfig`].
///
/// Unset fields keep their [`Default`] values.
#[derive(Clone, Debug)]
pub struct GrowthConfigBuilder {
    config: GrowthConfig,
}

impl GrowthConfigBuilder {
    /// Set the origin position.
    pub fn origin(mut self, origin: GridPos) -> Self {
        self.config.origin = origin;
        self
    }

    /// Set the trunk's starting heading.
    pub fn initial_heading(mut self, heading: Heading) -> Self {
        self.config.initial_heading = heading;
        self
    }

    /// Set the trunk length.
    pub fn trunk_length(mut self, cells: u32) -> Self {
        self.config.trunk_length = cells;
        self
    }

    /// Set the branch length.
    pub fn branch_length(mut self, cells: u32) -> Self {
        self.config.branch_length = cells;
        self
    }

    /// Set the maximum fork nesting.
    pub fn max_fork_depth(mut self, depth: u32) -> Self {
        self.config.max_fork_depth = depth;
        self
    }

    /// Set the per-step fork chance.
    pub fn fork_probability(mut self, p: f64) -> Self {
        self.config.fork_probability = p;
        self
    }

    /// Set the minimum spacing between forks.
    pub fn min_fork_spacing(mut self, cells: u32) -> Self {
        self.config.min_fork_spacing = cells;
        self
    }

    /// Set the total cell cap.
    pub fn max_cells(mut self, cells: usize) -> Self {
        self.config.max_cells = cells;
        self
    }

    /// Confine growth to `bounds`.
    pub fn bounds(mut self, bounds: GridBounds) -> Self {
        self.config.bounds = Some(bounds);
        self
    }

    /// Set the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Validate and return the config.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::InvalidGrowth`] for a bad fork probability,
    /// a zero branch length or cell cap, and [`TrailError::OutOfBounds`]
    /// if the origin lies outside the bounds.
    pub fn build(self) -> Result<GrowthConfig, TrailError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// What happened during growth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrowthReport {
    /// Cells in the finished graph.
    pub placed_cells: usize,
    /// Forks placed.
    pub forks: usize,
    /// Chains that stopped short for lack of a legal successor.
    pub truncated_chains: usize,
    /// Whether growth stopped at [`GrowthConfig::max_cells`].
    pub capped: bool,
}

impl GrowthReport {
    /// Whether any chain fell short of its requested length.
    pub fn is_truncated(&self) -> bool {
        self.truncated_chains > 0 || self.capped
    }
}

/// A grown trail and its report.
#[derive(Clone, Debug)]
pub struct Growth {
    /// The finished graph.
    pub graph: TrailGraph,
    /// Growth statistics.
    pub report: GrowthReport,
}

struct Chain {
    head: CellId,
    heading: Heading,
    remaining: u32,
    depth: u32,
    since_fork: u32,
}

/// Grow a trail from `config`.
///
/// Deterministic for a given config. Boxed-in chains are truncated and
/// reported rather than failing the whole build.
///
/// # Errors
///
/// Only configuration problems are errors; see
/// [`GrowthConfigBuilder::build`].
pub fn grow(config: &GrowthConfig) -> Result<Growth, TrailError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut builder = GraphBuilder::new(config.origin, config.bounds)?;
    let mut report = GrowthReport::default();

    let mut queue = VecDeque::new();
    queue.push_back(Chain {
        head: CellId(0),
        heading: config.initial_heading,
        remaining: config.trunk_length,
        depth: 0,
        since_fork: 0,
    });

    'chains: while let Some(mut chain) = queue.pop_front() {
        while chain.remaining > 0 {
            if builder.len() >= config.max_cells {
                report.capped = true;
                break 'chains;
            }

            let may_fork = chain.depth < config.max_fork_depth
                && chain.since_fork >= config.min_fork_spacing
                && builder.len() + 3 <= config.max_cells;
            if may_fork && rng.gen_bool(config.fork_probability) {
                if let Some(ids) = try_fork(&mut builder, &chain)? {
                    report.forks += 1;
                    for (id, turn) in ids.into_iter().zip([-1, 0, 1]) {
                        queue.push_back(Chain {
                            head: id,
                            heading: chain.heading.rotate(turn),
                            remaining: config.branch_length - 1,
                            depth: chain.depth + 1,
                            since_fork: 0,
                        });
                    }
                    continue 'chains;
                }
            }

            let at = builder.pos_of(chain.head)?;
            let Some((heading, next)) = pick_heading(&builder, at, chain.heading, &mut rng) else {
                report.truncated_chains += 1;
                tracing::warn!(
                    cell = %chain.head,
                    pos = %at,
                    remaining = chain.remaining,
                    "trail growth truncated: no legal successor"
                );
                continue 'chains;
            };
            chain.head = builder.extend(chain.head, next)?;
            chain.heading = heading;
            chain.remaining -= 1;
            chain.since_fork += 1;
        }
    }

    if report.capped {
        tracing::warn!(
            max_cells = config.max_cells,
            "trail growth truncated: cell cap reached"
        );
    }

    let graph = builder.finish()?;
    report.placed_cells = graph.cell_count();
    Ok(Growth { graph, report })
}

/// The position one step from `at` along `heading`, if a cell may grow there.
fn legal_step(builder: &GraphBuilder, at: GridPos, heading: Heading) -> Option<GridPos> {
    at.step(heading).filter(|pos| is_legal(builder, *pos))
}

fn is_legal(builder: &GraphBuilder, pos: GridPos) -> bool {
    builder.in_bounds(pos)
        && !builder.is_occupied(pos)
        && builder.occupied_neighbours(pos) < CROWDING_LIMIT
}

fn pick_heading(
    builder: &GraphBuilder,
    at: GridPos,
    heading: Heading,
    rng: &mut ChaCha8Rng,
) -> Option<(Heading, GridPos)> {
    for turns in [&CONE[..], &FALLBACK[..]] {
        let legal: Vec<(Heading, GridPos)> = turns
            .iter()
            .map(|t| heading.rotate(*t))
            .filter_map(|h| legal_step(builder, at, h).map(|pos| (h, pos)))
            .collect();
        if let Some(choice) = legal.choose(rng) {
            return Some(*choice);
        }
    }
    None
}

fn try_fork(builder: &mut GraphBuilder, chain: &Chain) -> Result<Option<[CellId; 3]>, TrailError> {
    let at = builder.pos_of(chain.head)?;
    let [left, middle, right] =
        [-1, 0, 1].map(|t| legal_step(builder, at, chain.heading.rotate(t)));
    let (Some(left), Some(middle), Some(right)) = (left, middle, right) else {
        return Ok(None);
    };
    builder.fork(chain.head, [left, middle, right]).map(Some)
}
