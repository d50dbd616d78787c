//! The immutable trail graph and its crate-internal builder.

use crate::bounds::GridBounds;
use crate::cell::{CellRole, TrailCell};
use crate::error::TrailError;
use indexmap::IndexMap;
use smallvec::{smallvec, SmallVec};
use trek_core::{CellId, GridPos};

/// A branching trail: an arena of [`TrailCell`]s plus lookup indices.
///
/// Cell `CellId(0)` is always the origin. Every other cell has exactly
/// one predecessor whose sequence position is one less than its own, so
/// sequence positions strictly increase along any forward path.
///
/// Graphs are produced by [`TrailLayout::build`](crate::TrailLayout::build)
/// or [`grow`](crate::grow) and are read-only afterwards.
///
/// # Examples
///
/// ```
/// use trek_trail::TrailLayout;
/// use trek_core::CellId;
///
/// let graph = TrailLayout::straight(5).build().unwrap();
/// assert_eq!(graph.cell_count(), 5);
/// assert!(graph.cell(graph.origin()).unwrap().is_start());
/// assert!(graph.cell(CellId(4)).unwrap().is_end());
/// ```
#[derive(Clone, Debug)]
pub struct TrailGraph {
    cells: Vec<TrailCell>,
    by_pos: IndexMap<GridPos, CellId>,
    by_sequence: Vec<SmallVec<[CellId; 3]>>,
    bounds: Option<GridBounds>,
}

impl TrailGraph {
    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The origin cell.
    pub fn origin(&self) -> CellId {
        CellId(0)
    }

    /// Grid bounds the trail was built inside, if any.
    pub fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// All cells in arena (canonical) order.
    pub fn cells(&self) -> &[TrailCell] {
        &self.cells
    }

    /// Look up a cell by arena id.
    pub fn cell(&self, id: CellId) -> Result<&TrailCell, TrailError> {
        self.cells
            .get(id.index())
            .ok_or(TrailError::CellNotFound { cell: id })
    }

    /// Look up the cell at a grid position.
    pub fn cell_at(&self, pos: GridPos) -> Result<&TrailCell, TrailError> {
        let id = self
            .by_pos
            .get(&pos)
            .copied()
            .ok_or(TrailError::PositionNotFound { pos })?;
        self.cell(id)
    }

    /// All cells at a sequence position. Branches put several cells at
    /// the same position.
    pub fn cells_at_sequence(&self, sequence: u32) -> Result<&[CellId], TrailError> {
        self.by_sequence
            .get(sequence as usize)
            .map(|ids| ids.as_slice())
            .ok_or(TrailError::SequenceNotFound { sequence })
    }

    /// Backward neighbour of `id`.
    pub fn predecessor(&self, id: CellId) -> Result<Option<CellId>, TrailError> {
        Ok(self.cell(id)?.predecessor())
    }

    /// Forward neighbours of `id`.
    pub fn successors(&self, id: CellId) -> Result<&[CellId], TrailError> {
        Ok(self.cell(id)?.successors())
    }

    /// Largest sequence position in the graph.
    pub fn max_sequence(&self) -> u32 {
        self.by_sequence.len().saturating_sub(1) as u32
    }

    /// Number of cells with no successors.
    pub fn end_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_end()).count()
    }

    /// Number of forks (cells whose successors are a branch triple).
    pub fn fork_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_fork()).count()
    }

    /// Check every structural invariant of the graph.
    ///
    /// The builders call this before handing a graph out, so a graph
    /// obtained from the public API always passes.
    pub fn validate(&self) -> Result<(), TrailError> {
        let broken = |reason: String| Err(TrailError::BrokenInvariant { reason });

        if self.by_pos.len() != self.cells.len() {
            return broken(format!(
                "{} cells but {} distinct positions",
                self.cells.len(),
                self.by_pos.len()
            ));
        }
        for (i, cell) in self.cells.iter().enumerate() {
            if cell.id.index() != i {
                return broken(format!("cell at slot {i} has id {}", cell.id));
            }
            if self.by_pos.get(&cell.pos) != Some(&cell.id) {
                return broken(format!("position index disagrees for cell {}", cell.id));
            }
            if let Some(bounds) = self.bounds {
                if !bounds.contains(cell.pos) {
                    return broken(format!("cell {} at {} outside {bounds}", cell.id, cell.pos));
                }
            }
            match cell.predecessor {
                None if i != 0 => {
                    return broken(format!("cell {} has no predecessor", cell.id));
                }
                None => {
                    if cell.sequence != 0 || cell.role != CellRole::Plain {
                        return broken("origin must be a plain cell at sequence 0".into());
                    }
                }
                Some(pred) => {
                    let p = self.cell(pred)?;
                    if p.sequence + 1 != cell.sequence {
                        return broken(format!(
                            "cell {} at sequence {} follows cell {} at sequence {}",
                            cell.id, cell.sequence, p.id, p.sequence
                        ));
                    }
                    if !p.successors.contains(&cell.id) {
                        return broken(format!(
                            "cell {} missing from successors of {}",
                            cell.id, p.id
                        ));
                    }
                }
            }
            match cell.successors.len() {
                0 | 1 => {
                    if let Some(&s) = cell.successors.first() {
                        if self.cell(s)?.role != CellRole::Plain {
                            return broken(format!("cell {} has a lone branch successor", cell.id));
                        }
                    }
                }
                3 => {
                    for (succ, role) in cell.successors.iter().zip(CellRole::BRANCHES) {
                        let s = self.cell(*succ)?;
                        if s.role != role || s.predecessor != Some(cell.id) {
                            return broken(format!(
                                "fork at cell {} is not a linked triple",
                                cell.id
                            ));
                        }
                    }
                }
                n => {
                    return broken(format!("cell {} has {n} successors", cell.id));
                }
            }
            let at_seq = self.cells_at_sequence(cell.sequence)?;
            if !at_seq.contains(&cell.id) {
                return broken(format!("sequence index missing cell {}", cell.id));
            }
        }
        Ok(())
    }
}

/// Incremental graph construction shared by the layout and growth builders.
///
/// Every mutation goes through [`extend`](Self::extend) or
/// [`fork`](Self::fork), which enforce unique positions, bounds, and the
/// one-successor-run-or-one-triple rule.
#[derive(Debug)]
pub(crate) struct GraphBuilder {
    graph: TrailGraph,
}

impl GraphBuilder {
    /// Start a graph with a plain origin cell at `origin`.
    pub(crate) fn new(origin: GridPos, bounds: Option<GridBounds>) -> Result<Self, TrailError> {
        if let Some(b) = bounds {
            b.check(origin)?;
        }
        let mut by_pos = IndexMap::new();
        by_pos.insert(origin, CellId(0));
        let graph = TrailGraph {
            cells: vec![TrailCell {
                id: CellId(0),
                pos: origin,
                sequence: 0,
                role: CellRole::Plain,
                predecessor: None,
                successors: SmallVec::new(),
            }],
            by_pos,
            by_sequence: vec![smallvec![CellId(0)]],
            bounds,
        };
        Ok(Self { graph })
    }

    pub(crate) fn len(&self) -> usize {
        self.graph.cells.len()
    }

    pub(crate) fn pos_of(&self, id: CellId) -> Result<GridPos, TrailError> {
        Ok(self.graph.cell(id)?.pos)
    }

    pub(crate) fn is_occupied(&self, pos: GridPos) -> bool {
        self.graph.by_pos.contains_key(&pos)
    }

    pub(crate) fn in_bounds(&self, pos: GridPos) -> bool {
        self.graph.bounds.map_or(true, |b| b.contains(pos))
    }

    /// Number of occupied cells in the 8-neighbourhood of `pos`.
    pub(crate) fn occupied_neighbours(&self, pos: GridPos) -> usize {
        pos.moore_neighbours()
            .filter(|p| self.is_occupied(*p))
            .count()
    }

    /// Append a plain cell at `pos` after `pred`.
    pub(crate) fn extend(&mut self, pred: CellId, pos: GridPos) -> Result<CellId, TrailError> {
        self.check_extendable(pred)?;
        self.check_free(pos)?;
        let id = self.push(pred, pos, CellRole::Plain)?;
        self.graph.cells[pred.index()].successors.push(id);
        Ok(id)
    }

    /// Append a left/middle/right branch triple after `pred`.
    pub(crate) fn fork(
        &mut self,
        pred: CellId,
        positions: [GridPos; 3],
    ) -> Result<[CellId; 3], TrailError> {
        self.check_extendable(pred)?;
        for (i, pos) in positions.iter().enumerate() {
            self.check_free(*pos)?;
            if positions[..i].contains(pos) {
                return Err(TrailError::CellCollision { pos: *pos });
            }
        }
        let mut ids = [CellId(0); 3];
        for ((slot, pos), role) in ids.iter_mut().zip(positions).zip(CellRole::BRANCHES) {
            *slot = self.push(pred, pos, role)?;
        }
        self.graph.cells[pred.index()]
            .successors
            .extend_from_slice(&ids);
        Ok(ids)
    }

    /// Validate and hand out the finished graph.
    pub(crate) fn finish(self) -> Result<TrailGraph, TrailError> {
        self.graph.validate()?;
        Ok(self.graph)
    }

    fn check_extendable(&self, pred: CellId) -> Result<(), TrailError> {
        if !self.graph.cell(pred)?.successors.is_empty() {
            return Err(TrailError::AlreadyExtended { cell: pred });
        }
        Ok(())
    }

    fn check_free(&self, pos: GridPos) -> Result<(), TrailError> {
        if let Some(b) = self.graph.bounds {
            b.check(pos)?;
        }
        if self.is_occupied(pos) {
            return Err(TrailError::CellCollision { pos });
        }
        Ok(())
    }

    fn push(&mut self, pred: CellId, pos: GridPos, role: CellRole) -> Result<CellId, TrailError> {
        let sequence = self.graph.cell(pred)?.sequence + 1;
        let raw = u32::try_from(self.graph.cells.len()).map_err(|_| TrailError::InvalidGrowth {
            reason: "cell count exceeds u32::MAX".into(),
        })?;
        let id = CellId(raw);
        self.graph.cells.push(TrailCell {
            id,
            pos,
            sequence,
            role,
            predecessor: Some(pred),
            successors: SmallVec::new(),
        });
        self.graph.by_pos.insert(pos, id);
        let seq = sequence as usize;
        if self.graph.by_sequence.len() <= seq {
            self.graph.by_sequence.resize_with(seq + 1, SmallVec::new);
        }
        self.graph.by_sequence[seq].push(id);
        Ok(id)
    }
}
