mod allocation;
mod curve;
mod input;
mod market;
mod ownership;
mod preferences;

pub use allocation::{AllocationTable, ClientAllocation};
pub use curve::PriceCurve;
pub use input::{ShapeError, SolveInput};
pub use market::{
    ATTENDANCE_UTILITY, AUCTIONS, AuctionId, CLIENTS, CURVE_POINTS, DAYS, EventType, FAMILIES,
    Family, MAX_OWNED, MAX_UNITS, SUP, TRAVEL_PENALTY,
};
pub use ownership::Ownership;
pub use preferences::Preferences;
