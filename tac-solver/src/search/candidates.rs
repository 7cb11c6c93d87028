use tac_core::models::DAYS;

/// A trip: the arrival slot, the slot of the last night and the hotel grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stay {
    pub arrival: usize,
    pub last_night: usize,
    pub good_hotel: bool,
}

impl Stay {
    /// Number of nights minus one
    pub fn length(&self) -> usize {
        self.last_night - self.arrival
    }

    /// The night slots of the stay
    pub fn nights(&self) -> std::ops::RangeInclusive<usize> {
        self.arrival..=self.last_night
    }
}

/// Number of possible stays: ten windows in two hotels
pub const STAY_COUNT: usize = 20;

/// Every stay, in generation order: by arrival, then by last night, the good
/// hotel before the cheap one. Ties between candidate costs are broken in
/// this order.
pub const STAYS: [Stay; STAY_COUNT] = {
    let mut stays = [Stay {
        arrival: 0,
        last_night: 0,
        good_hotel: true,
    }; STAY_COUNT];
    let mut k = 0;
    let mut arrival = 0;
    while arrival < DAYS {
        let mut last_night = arrival;
        while last_night < DAYS {
            stays[k] = Stay {
                arrival,
                last_night,
                good_hotel: true,
            };
            stays[k + 1] = Stay {
                arrival,
                last_night,
                good_hotel: false,
            };
            k += 2;
            last_night += 1;
        }
        arrival += 1;
    }
    stays
};

/// The ticket day slot for each event type, if any
pub type EventPlan = [Option<u8>; 3];

/// Entertainment plans for every stay window.
///
/// A plan gives each event type a distinct day inside the window, or no day.
/// Plans are listed as nested loops over the three types would visit them:
/// the first type varies slowest and "no ticket" comes after every day.
#[derive(Clone, Debug)]
pub struct EventPlans {
    windows: [Vec<EventPlan>; DAYS * DAYS],
}

impl EventPlans {
    pub fn new() -> Self {
        Self {
            windows: std::array::from_fn(|window| {
                let (arrival, last_night) = (window / DAYS, window % DAYS);
                if arrival <= last_night {
                    plans_for(arrival, last_night)
                } else {
                    Vec::new()
                }
            }),
        }
    }

    /// The plans that fit inside the given stay
    pub fn window(&self, stay: &Stay) -> &[EventPlan] {
        &self.windows[stay.arrival * DAYS + stay.last_night]
    }
}

impl Default for EventPlans {
    fn default() -> Self {
        Self::new()
    }
}

fn plans_for(arrival: usize, last_night: usize) -> Vec<EventPlan> {
    let choices: Vec<Option<u8>> = (arrival..=last_night)
        .map(|day| Some(day as u8))
        .chain(std::iter::once(None))
        .collect();
    let clash = |a: Option<u8>, b: Option<u8>| a.is_some() && a == b;

    let mut plans = Vec::new();
    for &e1 in &choices {
        for &e2 in choices.iter().filter(|&&e2| !clash(e1, e2)) {
            for &e3 in choices
                .iter()
                .filter(|&&e3| !clash(e1, e3) && !clash(e2, e3))
            {
                plans.push([e1, e2, e3]);
            }
        }
    }
    plans
}
