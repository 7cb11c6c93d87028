use super::{
    curve::PriceCurve,
    market::{AUCTIONS, CLIENTS, CURVE_POINTS, DAYS, FAMILIES, Family},
    ownership::Ownership,
    preferences::Preferences,
};
use thiserror::Error;

/// Everything the resolver needs for one solve.
///
/// The input is copied into the solver before the search starts, so the
/// caller is free to reuse or mutate its own tables while a solve runs.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveInput {
    /// The eight clients, in the caller's order
    pub preferences: [Preferences; CLIENTS],
    /// The goods already held, by family and day slot
    pub ownership: Ownership,
    /// The price curve of every auction, indexed by [`crate::models::AuctionId::index`]
    pub prices: [PriceCurve; AUCTIONS],
}

impl SolveInput {
    /// Builds an input from fixed-size tables
    pub fn new(
        preferences: [[i32; 6]; CLIENTS],
        ownership: [[i32; DAYS]; FAMILIES],
        prices: [[i32; CURVE_POINTS]; AUCTIONS],
    ) -> Self {
        Self {
            preferences: preferences.map(Preferences::from),
            ownership: Ownership::new(ownership),
            prices: prices.map(PriceCurve),
        }
    }

    /// The same clients and holdings, with nothing left to buy.
    ///
    /// Every curve is replaced by [`PriceCurve::held`] for the units already
    /// owned, so a solve can only hand out what the agent holds and every
    /// allocation scores its bare utility.
    pub fn owned_goods_only(&self) -> Self {
        let prices = std::array::from_fn(|auction| {
            let family = Family::ALL[auction / DAYS];
            PriceCurve::held(self.ownership.units(family, auction % DAYS).into())
        });
        Self {
            prices,
            ..self.clone()
        }
    }

    /// Builds an input from dynamically sized tables, checking their shape.
    ///
    /// Expects 8 rows of 6 preferences, 7 rows of 4 owned counts and 28
    /// price curves of 9 points.
    pub fn from_tables<P, O, C>(
        preferences: &[P],
        ownership: &[O],
        prices: &[C],
    ) -> Result<Self, ShapeError>
    where
        P: AsRef<[i32]>,
        O: AsRef<[i32]>,
        C: AsRef<[i32]>,
    {
        Ok(Self::new(
            table("preferences", preferences)?,
            table("ownership", ownership)?,
            table("prices", prices)?,
        ))
    }
}

fn table<T: AsRef<[i32]>, const ROWS: usize, const COLS: usize>(
    name: &'static str,
    rows: &[T],
) -> Result<[[i32; COLS]; ROWS], ShapeError> {
    if rows.len() != ROWS {
        return Err(ShapeError::Rows {
            table: name,
            expected: ROWS,
            found: rows.len(),
        });
    }
    let mut out = [[0; COLS]; ROWS];
    for (row, (dst, src)) in out.iter_mut().zip(rows).enumerate() {
        let src = src.as_ref();
        *dst = src.try_into().map_err(|_| ShapeError::Columns {
            table: name,
            row,
            expected: COLS,
            found: src.len(),
        })?;
    }
    Ok(out)
}

/// The ways a raw table can have the wrong shape
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// The table has the wrong number of rows
    #[error("{table}: expected {expected} rows, found {found}")]
    Rows {
        /// The offending table
        table: &'static str,
        /// The required number of rows
        expected: usize,
        /// The number of rows supplied
        found: usize,
    },
    /// A row has the wrong number of columns
    #[error("{table}: row {row} should have {expected} entries, found {found}")]
    Columns {
        /// The offending table
        table: &'static str,
        /// The offending row
        row: usize,
        /// The required number of entries
        expected: usize,
        /// The number of entries supplied
        found: usize,
    },
}
