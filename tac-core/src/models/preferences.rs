use super::market::{DAYS, EventType};

/// What one client wants out of the trip.
///
/// Days are kept in the game's calendar numbering: arrival on days 1-4 and
/// departure on days 2-5. The solver works on zero-based day slots, see
/// [`Preferences::arrival_slot`] and [`Preferences::departure_slot`].
///
/// On the wire a client is a row of six integers,
/// `[arrival, departure, hotel, e1, e2, e3]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[i32; 6]", into = "[i32; 6]")
)]
pub struct Preferences {
    /// The preferred arrival day (1-4)
    pub arrival: i32,
    /// The preferred departure day (2-5)
    pub departure: i32,
    /// The bonus for staying in the good hotel
    pub hotel_value: i32,
    /// The bonus for each event type, indexed by [`EventType::index`]
    pub event_values: [i32; 3],
}

impl Preferences {
    /// Creates a client from its calendar days and values
    pub const fn new(arrival: i32, departure: i32, hotel_value: i32, event_values: [i32; 3]) -> Self {
        Self {
            arrival,
            departure,
            hotel_value,
            event_values,
        }
    }

    /// The preferred arrival as a day slot, clamped into `0..DAYS`
    pub fn arrival_slot(&self) -> usize {
        clamp_slot(self.arrival - 1)
    }

    /// The preferred last night as a day slot, clamped into `0..DAYS`
    pub fn departure_slot(&self) -> usize {
        clamp_slot(self.departure - 2)
    }

    /// The value of the given entertainment type
    pub fn event_value(&self, kind: EventType) -> i32 {
        self.event_values[kind.index()]
    }

    /// The client as a wire row
    pub fn row(&self) -> [i32; 6] {
        let [e1, e2, e3] = self.event_values;
        [
            self.arrival,
            self.departure,
            self.hotel_value,
            e1,
            e2,
            e3,
        ]
    }
}

fn clamp_slot(value: i32) -> usize {
    value.clamp(0, DAYS as i32 - 1) as usize
}

impl From<[i32; 6]> for Preferences {
    fn from([arrival, departure, hotel_value, e1, e2, e3]: [i32; 6]) -> Self {
        Self::new(arrival, departure, hotel_value, [e1, e2, e3])
    }
}

impl From<Preferences> for [i32; 6] {
    fn from(value: Preferences) -> Self {
        value.row()
    }
}
