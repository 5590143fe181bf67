//! Axis-aligned rectangle arithmetic and the occupancy grid used by the
//! placement scan.

use crate::types::{Item, Position};

/// Axis-aligned rectangle in container coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covered by a placed item. Unplaced items are treated as sitting at the origin.
    pub fn of_item(item: &Item) -> Self {
        let Position { x, y } = item.position.unwrap_or_default();
        Self::new(x, y, item.width, item.height)
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn intersection_area(&self, other: &Rect) -> u64 {
        let w = self.right().min(other.right()).saturating_sub(self.x.max(other.x));
        let h = self
            .bottom()
            .min(other.bottom())
            .saturating_sub(self.y.max(other.y));
        u64::from(w) * u64::from(h)
    }

    /// Shared area relative to the larger of the two rectangles.
    pub fn overlap_ratio(&self, other: &Rect) -> f64 {
        let shared = self.intersection_area(other);
        if shared == 0 {
            return 0.0;
        }
        shared as f64 / self.area().max(other.area()) as f64
    }

    pub fn fits_within(&self, side: u32) -> bool {
        self.right() <= side && self.bottom() <= side
    }
}

/// Prefix-sum grid over the cells of a square container.
///
/// `sums[(y + 1) * stride + (x + 1)]` holds the number of occupied cells in
/// `[0, x] x [0, y]`, so any region's occupied area is four lookups.
pub struct OccupancyGrid {
    side: usize,
    sums: Vec<u32>,
}

impl OccupancyGrid {
    pub fn build<'a>(side: u32, rects: impl Iterator<Item = &'a Item>) -> Self {
        let side = side as usize;
        let stride = side + 1;

        // Coverage counts via a 2D difference array, so stacked items cost O(1) each.
        let mut diff = vec![0i32; stride * stride];
        for item in rects {
            let r = Rect::of_item(item);
            let (x0, y0) = (r.x as usize, r.y as usize);
            let (x1, y1) = ((r.right() as usize).min(side), (r.bottom() as usize).min(side));
            if x0 >= x1 || y0 >= y1 {
                continue;
            }
            diff[y0 * stride + x0] += 1;
            diff[y0 * stride + x1] -= 1;
            diff[y1 * stride + x0] -= 1;
            diff[y1 * stride + x1] += 1;
        }

        let mut sums = vec![0u32; stride * stride];
        let mut coverage_row = vec![0i32; side];
        for y in 0..side {
            let mut running = 0i32;
            let mut row_occupied = 0u32;
            for x in 0..side {
                running += diff[y * stride + x];
                coverage_row[x] += running;
                if coverage_row[x] > 0 {
                    row_occupied += 1;
                }
                sums[(y + 1) * stride + (x + 1)] = sums[y * stride + (x + 1)] + row_occupied;
            }
        }

        Self { side, sums }
    }

    pub fn side(&self) -> u32 {
        self.side as u32
    }

    /// Number of occupied cells inside `rect`. `rect` must lie inside the grid.
    pub fn occupied(&self, rect: &Rect) -> u32 {
        let stride = self.side + 1;
        let (x0, y0) = (rect.x as usize, rect.y as usize);
        let (x1, y1) = (rect.right() as usize, rect.bottom() as usize);
        self.sums[y1 * stride + x1] + self.sums[y0 * stride + x0]
            - self.sums[y0 * stride + x1]
            - self.sums[y1 * stride + x0]
    }
}
