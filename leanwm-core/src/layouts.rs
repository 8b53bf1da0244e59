//! Tiling layouts. Pure geometry, no protocol access.
use crate::models::Xyhw;

/// How a workspace arranges its clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Side by side columns sized by weight.
    #[default]
    Horizontal,
    /// The first client takes half the area, each next one half of what is left,
    /// alternating between vertical and horizontal splits. Weights are ignored.
    Master,
    /// Stacked rows sized by weight.
    Vertical,
}

impl Layout {
    /// The layout `CycleLayout` switches to.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Horizontal => Self::Master,
            Self::Master => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// One slot per weight, in order.
    #[must_use]
    pub fn generate(self, area: Xyhw, weights: &[f32], gaps: Gaps) -> Vec<Xyhw> {
        match self {
            Self::Horizontal => weighted_horizontal(area, weights, gaps),
            Self::Master => master(area, weights.len(), gaps),
            Self::Vertical => weighted_vertical(area, weights, gaps),
        }
    }
}

/// Spacing applied by the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gaps {
    /// Between two neighbouring windows.
    pub inner: u32,
    /// Between the windows and the edges of the tiling area.
    pub outer: u32,
}

impl Gaps {
    #[must_use]
    pub const fn new(gap: u32, outer_gaps: bool) -> Self {
        Self {
            inner: gap,
            outer: if outer_gaps { gap } else { 0 },
        }
    }
}

/// Splits `area` into side by side columns whose widths are proportional to `weights`.
///
/// Widths plus every gap add up to `area.w` exactly: the rounding remainder is given to the
/// last column. Every column is at least one pixel wide as long as the width allows it, taken
/// from the widest column. When the gaps eat the whole width the columns collapse to zero width.
#[must_use]
pub fn weighted_horizontal(area: Xyhw, weights: &[f32], gaps: Gaps) -> Vec<Xyhw> {
    let count = weights.len();
    if count == 0 {
        return vec![];
    }
    let inner = gaps.inner as i64;
    let outer = gaps.outer as i64;
    let available = (i64::from(area.w) - (count as i64 - 1) * inner - 2 * outer).max(0);
    let height = (i64::from(area.h) - 2 * outer).max(0) as i32;

    let total: f64 = weights.iter().map(|w| f64::from(w.max(0.0))).sum();
    let mut widths: Vec<i64> = weights
        .iter()
        .map(|w| {
            if total > 0.0 {
                (available as f64 * f64::from(w.max(0.0)) / total).floor() as i64
            } else {
                available / count as i64
            }
        })
        .collect();
    let assigned: i64 = widths[..count - 1].iter().sum();
    widths[count - 1] = available - assigned;
    if available >= count as i64 {
        for i in 0..count {
            if widths[i] > 0 {
                continue;
            }
            // Some other column is at least two wide while this one is empty.
            if let Some(widest) = (0..count).max_by_key(|&j| widths[j]) {
                widths[widest] -= 1;
                widths[i] += 1;
            }
        }
    }

    let mut x = i64::from(area.x) + outer;
    let y = area.y + outer as i32;
    widths
        .into_iter()
        .map(|w| {
            let slot = Xyhw::new(x as i32, y, w as i32, height);
            x += w + inner;
            slot
        })
        .collect()
}

/// [`weighted_horizontal`] turned on its side.
#[must_use]
pub fn weighted_vertical(area: Xyhw, weights: &[f32], gaps: Gaps) -> Vec<Xyhw> {
    weighted_horizontal(transpose(area), weights, gaps)
        .into_iter()
        .map(transpose)
        .collect()
}

/// Halves the remaining area for every client but the last, which takes what is left.
/// Even clients split off the left part, odd ones the top part.
#[must_use]
pub fn master(area: Xyhw, count: usize, gaps: Gaps) -> Vec<Xyhw> {
    let inner = i32::try_from(gaps.inner).unwrap_or(i32::MAX);
    let outer = i32::try_from(gaps.outer).unwrap_or(i32::MAX);
    let mut rest = Xyhw::new(
        area.x.saturating_add(outer),
        area.y.saturating_add(outer),
        area.w.saturating_sub(outer.saturating_mul(2)).max(0),
        area.h.saturating_sub(outer.saturating_mul(2)).max(0),
    );

    let mut slots = Vec::with_capacity(count);
    for i in 0..count {
        if i + 1 == count {
            slots.push(rest);
            break;
        }
        if i % 2 == 0 {
            let half = (rest.w.saturating_sub(inner) / 2).max(0);
            slots.push(Xyhw::new(rest.x, rest.y, half, rest.h));
            let taken = half.saturating_add(inner).min(rest.w);
            rest = Xyhw::new(rest.x + taken, rest.y, rest.w - taken, rest.h);
        } else {
            let half = (rest.h.saturating_sub(inner) / 2).max(0);
            slots.push(Xyhw::new(rest.x, rest.y, rest.w, half));
            let taken = half.saturating_add(inner).min(rest.h);
            rest = Xyhw::new(rest.x, rest.y + taken, rest.w, rest.h - taken);
        }
    }
    slots
}

fn transpose(r: Xyhw) -> Xyhw {
    Xyhw::new(r.y, r.x, r.h, r.w)
}
