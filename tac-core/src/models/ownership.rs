use super::market::{DAYS, FAMILIES, Family, MAX_OWNED};

/// The units of each good the agent already holds, by family and day slot.
///
/// Counts are clamped into `0..=15` on construction. Upstream data can be
/// briefly inconsistent (an agent may have sold more than it held), and the
/// resolver must tolerate that rather than fail a live game turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[[i32; 4]; 7]", into = "[[i32; 4]; 7]")
)]
pub struct Ownership([[u8; DAYS]; FAMILIES]);

impl Ownership {
    /// Builds an ownership table from raw counts, clamping each into range
    pub fn new(raw: [[i32; DAYS]; FAMILIES]) -> Self {
        Self(raw.map(|row| row.map(|units| units.clamp(0, MAX_OWNED) as u8)))
    }

    /// The units held of `family` on day slot `day`
    pub fn units(&self, family: Family, day: usize) -> u8 {
        self.0[family.index()][day]
    }

    /// The total units held across every auction
    pub fn total(&self) -> u32 {
        self.0.iter().flatten().map(|&units| units as u32).sum()
    }
}

impl From<[[i32; DAYS]; FAMILIES]> for Ownership {
    fn from(value: [[i32; DAYS]; FAMILIES]) -> Self {
        Self::new(value)
    }
}

impl From<Ownership> for [[i32; DAYS]; FAMILIES] {
    fn from(value: Ownership) -> Self {
        value.0.map(|row| row.map(i32::from))
    }
}
