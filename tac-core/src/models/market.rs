use std::fmt;

/// The number of clients an agent serves in one game
pub const CLIENTS: usize = 8;

/// The number of day slots per good (days 1-4, or 2-5 for return flights)
pub const DAYS: usize = 4;

/// The number of goods families (flights, hotels, entertainment)
pub const FAMILIES: usize = 7;

/// The number of auctions in a game, one per family and day
pub const AUCTIONS: usize = FAMILIES * DAYS;

/// The number of points on a cumulative price curve (0 to 8 units)
pub const CURVE_POINTS: usize = 9;

/// The largest quantity a price curve quotes
pub const MAX_UNITS: usize = CURVE_POINTS - 1;

/// The price sentinel meaning "cannot be acquired at this quantity"
pub const SUP: i32 = 1_000_000;

/// The utility a client earns simply by making the trip
pub const ATTENDANCE_UTILITY: i32 = 1000;

/// The utility lost per day of deviation from a preferred travel day
pub const TRAVEL_PENALTY: i32 = 100;

/// Owned unit counts are clamped to this value
pub const MAX_OWNED: i32 = 15;

/// A family of goods. Each family is traded on one auction per day.
///
/// The declaration order is significant: it fixes the auction numbering
/// `family * DAYS + day` used by the price-curve tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Family {
    /// Flights into town, days 1-4
    InFlight,
    /// Flights out of town, days 2-5
    OutFlight,
    /// Rooms in the good hotel, nights 1-4
    GoodHotel,
    /// Rooms in the cheap hotel, nights 1-4
    CheapHotel,
    /// Alligator wrestling tickets, days 1-4
    Wrestling,
    /// Amusement park tickets, days 1-4
    Amusement,
    /// Museum tickets, days 1-4
    Museum,
}

impl Family {
    /// Every family, in auction order
    pub const ALL: [Family; FAMILIES] = [
        Family::InFlight,
        Family::OutFlight,
        Family::GoodHotel,
        Family::CheapHotel,
        Family::Wrestling,
        Family::Amusement,
        Family::Museum,
    ];

    /// The row of this family in ownership tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The hotel family for the requested grade
    pub const fn hotel(good: bool) -> Self {
        if good {
            Family::GoodHotel
        } else {
            Family::CheapHotel
        }
    }

    /// The auction index of this family on the given day slot
    pub const fn auction(self, day: usize) -> usize {
        self.index() * DAYS + day
    }

    /// The calendar day of slot 0; return flights start on day 2
    pub const fn first_day(self) -> usize {
        match self {
            Family::OutFlight => 2,
            _ => 1,
        }
    }

    /// The name used by the game server for this family
    pub const fn name(self) -> &'static str {
        match self {
            Family::InFlight => "inflight",
            Family::OutFlight => "outflight",
            Family::GoodHotel => "goodhotel",
            Family::CheapHotel => "cheaphotel",
            Family::Wrestling => "wrestling",
            Family::Amusement => "amusement",
            Family::Museum => "museum",
        }
    }
}

impl From<EventType> for Family {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Wrestling => Family::Wrestling,
            EventType::Amusement => Family::Amusement,
            EventType::Museum => Family::Museum,
        }
    }
}

/// The three kinds of entertainment a client may enjoy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum EventType {
    /// Alligator wrestling (E1)
    Wrestling,
    /// Amusement park (E2)
    Amusement,
    /// Museum (E3)
    Museum,
}

impl EventType {
    /// Every event type, in preference-column order
    pub const ALL: [EventType; 3] = [EventType::Wrestling, EventType::Amusement, EventType::Museum];

    /// The position of this type among a client's event values
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Identifies one auction: a family of goods on a day slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionId {
    /// The goods family
    pub family: Family,
    /// The zero-based day slot
    pub day: usize,
}

impl AuctionId {
    /// Decodes an auction index in `0..AUCTIONS`
    pub const fn from_index(index: usize) -> Self {
        Self {
            family: Family::ALL[index / DAYS],
            day: index % DAYS,
        }
    }

    /// The auction index in `0..AUCTIONS`
    pub const fn index(self) -> usize {
        self.family.auction(self.day)
    }

    /// Iterates over every auction in index order
    pub fn all() -> impl Iterator<Item = AuctionId> {
        (0..AUCTIONS).map(Self::from_index)
    }

    /// The calendar day this auction trades for
    pub const fn calendar_day(self) -> usize {
        self.family.first_day() + self.day
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} day {}", self.family.name(), self.calendar_day())
    }
}
