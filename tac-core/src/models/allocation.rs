use super::market::{CLIENTS, EventType};
use std::fmt;

/// The goods assigned to one client.
///
/// Days are calendar days (1-5) and 0 means "not used": a client with
/// `in_day == 0` does not travel and holds nothing. On the wire this is the
/// row `[in_day, out_day, good_hotel, e1_day, e2_day, e3_day]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[i32; 6]", into = "[i32; 6]")
)]
pub struct ClientAllocation {
    /// Arrival day (1-4), or 0 if the client stays home
    pub in_day: u8,
    /// Departure day (2-5), or 0 if the client stays home
    pub out_day: u8,
    /// Whether the client sleeps in the good hotel
    pub good_hotel: bool,
    /// The day each event type is enjoyed, or 0 for no ticket
    pub event_days: [u8; 3],
}

impl ClientAllocation {
    /// The allocation of a client who does not travel
    pub const HOME: Self = Self {
        in_day: 0,
        out_day: 0,
        good_hotel: false,
        event_days: [0; 3],
    };

    /// Whether this client makes the trip
    pub fn is_travelling(&self) -> bool {
        self.in_day != 0
    }

    /// The ticket day for the given event type, if any
    pub fn event_day(&self, kind: EventType) -> Option<u8> {
        match self.event_days[kind.index()] {
            0 => None,
            day => Some(day),
        }
    }

    /// The allocation as a wire row
    pub fn row(&self) -> [i32; 6] {
        let [e1, e2, e3] = self.event_days.map(i32::from);
        [
            self.in_day.into(),
            self.out_day.into(),
            self.good_hotel.into(),
            e1,
            e2,
            e3,
        ]
    }
}

impl From<[i32; 6]> for ClientAllocation {
    fn from([in_day, out_day, hotel, e1, e2, e3]: [i32; 6]) -> Self {
        let day = |value: i32| u8::try_from(value).unwrap_or(0);
        Self {
            in_day: day(in_day),
            out_day: day(out_day),
            good_hotel: hotel != 0,
            event_days: [day(e1), day(e2), day(e3)],
        }
    }
}

impl From<ClientAllocation> for [i32; 6] {
    fn from(value: ClientAllocation) -> Self {
        value.row()
    }
}

/// The allocation of goods to every client, in the caller's client order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AllocationTable(pub [ClientAllocation; CLIENTS]);

impl AllocationTable {
    /// The table in which nobody travels
    pub const HOME: Self = Self([ClientAllocation::HOME; CLIENTS]);

    /// The table as `[client][in, out, hotel, e1, e2, e3]` rows
    pub fn rows(&self) -> [[i32; 6]; CLIENTS] {
        self.0.map(|client| client.row())
    }

    /// The number of clients who travel
    pub fn travellers(&self) -> usize {
        self.0.iter().filter(|client| client.is_travelling()).count()
    }

    /// Iterates over the clients' allocations
    pub fn iter(&self) -> impl Iterator<Item = &ClientAllocation> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for AllocationTable {
    type Output = ClientAllocation;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for AllocationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, client) in self.0.iter().enumerate() {
            if !client.is_travelling() {
                writeln!(f, "client {} does not go", i + 1)?;
                continue;
            }
            write!(
                f,
                "client {} stays {} - {} in the {} hotel",
                i + 1,
                client.in_day,
                client.out_day,
                if client.good_hotel { "good" } else { "cheap" }
            )?;
            for (kind, label) in EventType::ALL.into_iter().zip(["E1", "E2", "E3"]) {
                if let Some(day) = client.event_day(kind) {
                    write!(f, ", {label} day {day}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_table_has_no_travellers() {
        assert_eq!(AllocationTable::HOME.travellers(), 0);
        assert_eq!(AllocationTable::HOME.rows(), [[0; 6]; CLIENTS]);
    }

    #[test]
    fn rows_use_zero_for_unused_goods() {
        let client = ClientAllocation {
            in_day: 1,
            out_day: 3,
            good_hotel: true,
            event_days: [0, 2, 0],
        };
        assert_eq!(client.row(), [1, 3, 1, 0, 2, 0]);
        assert_eq!(ClientAllocation::from(client.row()), client);
        assert_eq!(client.event_day(EventType::Amusement), Some(2));
        assert_eq!(client.event_day(EventType::Museum), None);
    }
}
