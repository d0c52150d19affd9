pub mod error;

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::coordinate::GridCoordinate;
use crate::grid::error::*;

pub const ENTROPY_GRID_CELLS: usize = 2048;
/// Number of words in a BIP39 word list
pub const DICTIONARY_SIZE: u16 = 2048;

/// 2048 dictionary indices, one per cell, row-major with 16 cells per row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u16>", into = "Vec<u16>")]
pub struct EntropyGrid {
    cells: Vec<u16>,
}

impl TryFrom<Vec<u16>> for EntropyGrid {
    type Error = GridError;

    fn try_from(cells: Vec<u16>) -> Result<Self, Self::Error> {
        if cells.len() != ENTROPY_GRID_CELLS {
            return Err(GridError::InvalidLength {
                expected: ENTROPY_GRID_CELLS,
                found: cells.len(),
            });
        }

        if let Some((cell, value)) = cells
            .iter()
            .enumerate()
            .find(|(_, value)| **value >= DICTIONARY_SIZE)
        {
            return Err(GridError::IndexOutOfRange {
                cell,
                value: *value,
            });
        }

        Ok(EntropyGrid { cells })
    }
}

impl From<EntropyGrid> for Vec<u16> {
    fn from(grid: EntropyGrid) -> Self {
        grid.cells
    }
}

impl EntropyGrid {
    /// Every dictionary index in ascending order
    pub fn ordered() -> Self {
        EntropyGrid {
            cells: (0..DICTIONARY_SIZE).collect(),
        }
    }

    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn word_at(&self, coordinate: &GridCoordinate) -> Result<u16, GridError> {
        let cell = coordinate.cell_index();

        self.cells
            .get(cell)
            .copied()
            .ok_or(GridError::CellOutOfRange(cell))
    }

    /// True when every dictionary index appears exactly once
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; ENTROPY_GRID_CELLS];

        for value in &self.cells {
            let slot = &mut seen[usize::from(*value)];
            if *slot {
                return false;
            }
            *slot = true;
        }

        true
    }

    fn position_of(&self, value: u16) -> Option<usize> {
        self.cells.iter().position(|cell| *cell == value)
    }

    /// Places `wanted[i]` at `coordinates[i]`, in ascending `i`.
    ///
    /// With [`EmbedStrategy::Swap`] each word is looked up in the grid as it is at that step,
    /// so a permutation stays a permutation.
    pub fn embed(
        mut self,
        coordinates: &[GridCoordinate],
        wanted: &[u16],
        strategy: EmbedStrategy,
    ) -> Result<Self, GridError> {
        if coordinates.len() != wanted.len() {
            return Err(GridError::CountMismatch {
                coordinates: coordinates.len(),
                words: wanted.len(),
            });
        }

        for (coordinate, word) in coordinates.iter().zip(wanted) {
            let target = coordinate.cell_index();

            if target >= ENTROPY_GRID_CELLS {
                return Err(GridError::CellOutOfRange(target));
            }

            if *word >= DICTIONARY_SIZE {
                return Err(GridError::IndexOutOfRange {
                    cell: target,
                    value: *word,
                });
            }

            match strategy {
                EmbedStrategy::Overwrite => self.cells[target] = *word,
                EmbedStrategy::Swap => {
                    let source = self
                        .position_of(*word)
                        .ok_or(GridError::WordNotInGrid(*word))?;

                    self.cells.swap(source, target);
                }
            }
        }

        Ok(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EmbedStrategy {
    /// Write the word into the cell, whatever was there is lost
    Overwrite,
    /// Swap the word's current cell with the target cell
    Swap,
}

impl EmbedStrategy {
    pub fn for_source_words(source_words: &[u16]) -> Self {
        if has_duplicates(source_words) {
            EmbedStrategy::Overwrite
        } else {
            EmbedStrategy::Swap
        }
    }
}

fn has_duplicates(words: &[u16]) -> bool {
    let mut seen = HashSet::with_capacity(words.len());
    !words.iter().all(|word| seen.insert(*word))
}

pub struct DecoyGrid;

impl DecoyGrid {
    /// A full permutation can't hold a seed phrase with repeated words, those get a
    /// random multiset instead.
    pub fn build<R: Rng>(source_words: &[u16], rng: &mut R) -> (EntropyGrid, EmbedStrategy) {
        let strategy = EmbedStrategy::for_source_words(source_words);

        let grid = match strategy {
            EmbedStrategy::Overwrite => Self::random_multiset(rng),
            EmbedStrategy::Swap => Self::random_permutation(rng),
        };

        log::debug!("Built decoy grid for {:?} strategy", strategy);

        (grid, strategy)
    }

    pub fn random_multiset<R: Rng>(rng: &mut R) -> EntropyGrid {
        EntropyGrid {
            cells: (0..ENTROPY_GRID_CELLS)
                .map(|_| rng.gen_range(0..DICTIONARY_SIZE))
                .collect(),
        }
    }

    /// Fisher-Yates from the last cell down to 1
    pub fn random_permutation<R: Rng>(rng: &mut R) -> EntropyGrid {
        let mut grid = EntropyGrid::ordered();

        for idx in (1..ENTROPY_GRID_CELLS).rev() {
            let swap_idx = rng.gen_range(0..=idx);
            grid.cells.swap(idx, swap_idx);
        }

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(x: u8, y: u8) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[test]
    fn permutation_for_distinct_words() {
        let mut rng = StdRng::seed_from_u64(1);

        let (grid, strategy) = DecoyGrid::build(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10], &mut rng);

        assert_eq!(strategy, EmbedStrategy::Swap);
        assert_eq!(grid.cells().len(), ENTROPY_GRID_CELLS);
        assert!(grid.is_permutation());
        assert_ne!(grid, EntropyGrid::ordered());
    }

    #[test]
    fn multiset_for_repeated_words() {
        let mut rng = StdRng::seed_from_u64(2);

        let (grid, strategy) = DecoyGrid::build(&[4, 4, 12], &mut rng);

        assert_eq!(strategy, EmbedStrategy::Overwrite);
        assert_eq!(grid.cells().len(), ENTROPY_GRID_CELLS);
        assert!(grid.cells().iter().all(|value| *value < DICTIONARY_SIZE));
        assert!(!grid.is_permutation());
    }

    #[test]
    fn swap_keeps_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = DecoyGrid::random_permutation(&mut rng);

        let coordinates = [at(0, 0), at(7, 127), at(3, 64), at(5, 1)];
        let wanted = [2047, 0, 1000, 42];

        let grid = grid
            .embed(&coordinates, &wanted, EmbedStrategy::Swap)
            .unwrap();

        assert!(grid.is_permutation());
        for (coordinate, word) in coordinates.iter().zip(wanted) {
            assert_eq!(grid.word_at(coordinate).unwrap(), word);
        }
    }

    #[test]
    fn swap_looks_up_current_grid() {
        // The first swap moves word 0 from cell 0 to cell 5, the second must find it there
        let grid = EntropyGrid::ordered()
            .embed(&[at(0, 0), at(1, 0)], &[5, 0], EmbedStrategy::Swap)
            .unwrap();

        assert_eq!(grid.cells()[0], 5);
        assert_eq!(grid.cells()[1], 0);
        assert_eq!(grid.cells()[5], 1);
        assert!(grid.is_permutation());
    }

    #[test]
    fn overwrite_places_repeated_words() {
        let grid = EntropyGrid::ordered()
            .embed(
                &[at(2, 0), at(0, 9), at(4, 4)],
                &[9, 9, 17],
                EmbedStrategy::Overwrite,
            )
            .unwrap();

        assert_eq!(grid.word_at(&at(2, 0)).unwrap(), 9);
        assert_eq!(grid.word_at(&at(0, 9)).unwrap(), 9);
        assert_eq!(grid.word_at(&at(4, 4)).unwrap(), 17);
        assert!(!grid.is_permutation());
    }

    #[test]
    fn embed_rejects_bad_input() {
        assert_eq!(
            EntropyGrid::ordered().embed(&[at(0, 0)], &[1, 2], EmbedStrategy::Swap),
            Err(GridError::CountMismatch {
                coordinates: 1,
                words: 2
            })
        );
        assert_eq!(
            EntropyGrid::ordered().embed(&[at(0, 0)], &[2048], EmbedStrategy::Overwrite),
            Err(GridError::IndexOutOfRange {
                cell: 0,
                value: 2048
            })
        );

        let multiset = EntropyGrid::try_from(vec![3u16; ENTROPY_GRID_CELLS]).unwrap();
        assert_eq!(
            multiset.embed(&[at(0, 0)], &[4], EmbedStrategy::Swap),
            Err(GridError::WordNotInGrid(4))
        );
    }

    #[test]
    fn grid_from_vec() {
        assert_eq!(
            EntropyGrid::try_from(vec![0u16; 12]),
            Err(GridError::InvalidLength {
                expected: ENTROPY_GRID_CELLS,
                found: 12
            })
        );

        let mut cells: Vec<u16> = (0..DICTIONARY_SIZE).collect();
        cells[100] = 4000;
        assert_eq!(
            EntropyGrid::try_from(cells),
            Err(GridError::IndexOutOfRange {
                cell: 100,
                value: 4000
            })
        );

        let ordered: Vec<u16> = EntropyGrid::ordered().into();
        assert!(EntropyGrid::try_from(ordered).unwrap().is_permutation());
    }

    #[test]
    fn strategy_selection() {
        assert_eq!(
            EmbedStrategy::for_source_words(&[1, 2, 3]),
            EmbedStrategy::Swap
        );
        assert_eq!(
            EmbedStrategy::for_source_words(&[1, 2, 1]),
            EmbedStrategy::Overwrite
        );
    }
}
