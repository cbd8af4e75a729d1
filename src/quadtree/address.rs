//! Quadtree addresses of pixels
//!
//! An address lists, most significant first, the quadrant taken at each level
//! of the recursive split until a single cell remains. On a `2^k × 2^k`
//! raster every address has length `k` and names exactly one pixel.

use crate::automaton::alphabet::Quadrant;
use crate::io::error::{QuadfaError, invalid_parameter};
use crate::quadtree::partition::{is_atomic, split_into_fourths};
use crate::quadtree::raster::BitImage;
use ndarray::ArrayView2;
use num_traits::One;
use std::fmt;
use std::str::FromStr;

/// Path of quadrant symbols from the full raster down to one cell
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Vec<Quadrant>);

impl Address {
    /// Empty address, naming the whole region
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Symbols of the address, most significant first
    pub fn symbols(&self) -> &[Quadrant] {
        &self.0
    }

    /// Number of symbols
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the address has no symbols
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate symbols, most significant first
    pub fn iter(&self) -> impl Iterator<Item = Quadrant> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = QuadfaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|symbol| {
                Quadrant::from_char(symbol).ok_or_else(|| {
                    invalid_parameter("address", &s, &format!("'{symbol}' is not a quadrant"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Addresses of every "on" cell of a region, in quadrant order
///
/// A single cell yields the empty address when it is on and nothing
/// otherwise; larger regions prefix each quadrant's addresses with that
/// quadrant's symbol and concatenate the four results.
pub fn encode<T: One + PartialEq>(region: ArrayView2<'_, T>) -> Vec<Address> {
    let mut addresses = Vec::new();
    let mut prefix = Vec::new();
    collect_addresses(region, &mut prefix, &mut addresses);
    addresses
}

fn collect_addresses<T: One + PartialEq>(
    region: ArrayView2<'_, T>,
    prefix: &mut Vec<Quadrant>,
    addresses: &mut Vec<Address>,
) {
    match split_into_fourths(region) {
        None => {
            if region.iter().next().is_some_and(One::is_one) {
                addresses.push(Address(prefix.clone()));
            }
        }
        Some(parts) => {
            for (symbol, part) in Quadrant::ALL.into_iter().zip(parts) {
                prefix.push(symbol);
                collect_addresses(part, prefix, addresses);
                prefix.pop();
            }
        }
    }
}

/// Write the cells named by `addresses` into `output`
///
/// `index` is the coordinate matrix of the region the addresses are relative
/// to. Every cell of `index` is written: 1 when at least one address leads to
/// it, 0 otherwise.
pub fn decode(addresses: &[Address], index: ArrayView2<'_, (usize, usize)>, output: &mut BitImage) {
    let suffixes: Vec<&[Quadrant]> = addresses.iter().map(Address::symbols).collect();
    place_suffixes(&suffixes, index, output);
}

fn place_suffixes(
    suffixes: &[&[Quadrant]],
    index: ArrayView2<'_, (usize, usize)>,
    output: &mut BitImage,
) {
    if index.is_empty() {
        return;
    }

    if is_atomic(&index) {
        if let Some(cell) = index
            .iter()
            .next()
            .and_then(|&(row, col)| output.get_mut((row, col)))
        {
            *cell = u8::from(!suffixes.is_empty());
        }
        return;
    }

    let Some(parts) = split_into_fourths(index) else {
        return;
    };

    let mut buckets: [Vec<&[Quadrant]>; 4] = Default::default();
    for suffix in suffixes {
        if let Some((first, rest)) = suffix.split_first()
            && let Some(bucket) = buckets.get_mut(first.index())
        {
            bucket.push(rest);
        }
    }

    for (part, bucket) in parts.into_iter().zip(buckets) {
        place_suffixes(&bucket, part, output);
    }
}
