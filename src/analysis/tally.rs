//! Piece counts and monetary totals per price class

use crate::spatial::Placement;
use crate::spatial::shapes::PriceClass;
use std::fmt;

/// Brick counts bucketed by price class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceTally {
    counts: [u64; PriceClass::COUNT],
}

impl PieceTally {
    /// Count the bricks of a tiling
    ///
    /// A brick adds its price units to its class, so a 4x4 block counts as
    /// four 2x2 blocks.
    pub fn from_placements(placements: &[Placement]) -> Self {
        let mut tally = Self::default();
        for placement in placements {
            let spec = placement.shape.spec();
            if let Some(count) = tally.counts.get_mut(spec.price_class.ordinal()) {
                *count += u64::from(spec.price_units);
            }
        }
        tally
    }

    /// Units counted in `class`
    pub fn count(&self, class: PriceClass) -> u64 {
        self.counts.get(class.ordinal()).copied().unwrap_or(0)
    }

    /// Price of everything counted in `class`, in euro cents
    pub fn cost_cents(&self, class: PriceClass) -> u64 {
        self.count(class) * class.price_cents()
    }

    /// Price of every counted brick, in euro cents
    pub fn total_cents(&self) -> u64 {
        PriceClass::ALL
            .iter()
            .map(|&class| self.cost_cents(class))
            .sum()
    }

    /// Add another tally into this one
    pub fn merge(&mut self, other: &Self) {
        for (count, extra) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += extra;
        }
    }
}

/// Format euro cents as `€x.yy`
pub fn format_euros(cents: u64) -> String {
    format!("€{}.{:02}", cents / 100, cents % 100)
}

impl fmt::Display for PieceTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in PriceClass::ALL {
            writeln!(
                f,
                "{} #{} -> {}",
                class.label(),
                self.count(class),
                format_euros(self.cost_cents(class))
            )?;
        }
        Ok(())
    }
}
