use super::*;
use crate::geometry::{OccupancyGrid, Rect};
use crate::solution::Container;

/// A feasible spot for an item: top-left corner plus whether the item must be
/// turned by 90 degrees to fit there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub position: Position,
    pub rotated: bool,
}

impl Problem {
    /// Finds the first feasible position for `item` in `container`.
    /// See [`find_valid_assignment`].
    pub fn find_valid_assignment(
        &self,
        container: &Container,
        item: &Item,
        overlap_allowance: f64,
    ) -> Option<Assignment> {
        find_valid_assignment(container, item, overlap_allowance)
    }
}

/// First-fit placement scan.
///
/// Candidate top-left corners are visited row by row: `y` ascending in the
/// outer loop, `x` ascending in the inner loop. The first candidate that
/// passes the feasibility test wins. With `overlap_allowance == 0` a candidate
/// is feasible when it touches no occupied cell; otherwise every existing item
/// may share at most `overlap_allowance` of the larger of the two areas with
/// it. If the item's own orientation has no feasible corner and the item is
/// not square, the whole scan is repeated with its sides swapped.
pub fn find_valid_assignment(
    container: &Container,
    item: &Item,
    overlap_allowance: f64,
) -> Option<Assignment> {
    let allowance = overlap_allowance.clamp(0.0, 1.0);
    let grid = OccupancyGrid::build(container.side(), container.items().iter());
    let scan = Scan {
        container,
        grid: &grid,
        allowance,
    };

    if let Some(position) = scan.first_fit(item.width, item.height) {
        return Some(Assignment {
            position,
            rotated: false,
        });
    }

    if item.is_square() {
        return None;
    }

    scan.first_fit(item.height, item.width)
        .map(|position| Assignment {
            position,
            rotated: true,
        })
}

struct Scan<'a> {
    container: &'a Container,
    grid: &'a OccupancyGrid,
    allowance: f64,
}

impl Scan<'_> {
    fn first_fit(&self, width: u32, height: u32) -> Option<Position> {
        let side = self.grid.side();
        if width > side || height > side {
            return None;
        }

        let area = f64::from(width) * f64::from(height);
        for y in 0..=side - height {
            for x in 0..=side - width {
                let candidate = Rect::new(x, y, width, height);
                if self.is_feasible(&candidate, area) {
                    return Some(Position { x, y });
                }
            }
        }
        None
    }

    fn is_feasible(&self, candidate: &Rect, area: f64) -> bool {
        let occupied = self.grid.occupied(candidate);
        if occupied == 0 {
            return true;
        }
        if self.allowance <= 0.0 {
            return false;
        }

        // No single item can share more than the occupied cells under the
        // candidate, and the ratio's denominator is at least the candidate's area.
        if f64::from(occupied) / area <= self.allowance {
            return true;
        }

        self.container
            .items()
            .iter()
            .all(|other| candidate.overlap_ratio(&Rect::of_item(other)) <= self.allowance)
    }
}
