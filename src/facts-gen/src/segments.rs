use enum_iterator::Sequence;
use serde::Serialize;
use serde::Serializer;
use strum_macros::Display;

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Display, Sequence)]
pub enum Country {
    #[strum(serialize = "Canada")]
    Canada,
    #[strum(serialize = "United States")]
    UnitedStates,
    #[strum(serialize = "India")]
    India,
    #[strum(serialize = "United Kingdom")]
    UnitedKingdom,
    #[strum(serialize = "Australia")]
    Australia,
}

impl Country {
    /// Fraction of the daily audience located in the country.
    pub fn viewer_share(&self) -> f64 {
        match self {
            Country::Canada => 0.18,
            Country::UnitedStates => 0.30,
            Country::India => 0.25,
            Country::UnitedKingdom => 0.15,
            Country::Australia => 0.12,
        }
    }

    pub fn starting_subscribers(&self) -> i64 {
        match self {
            Country::Canada => 1_200_000,
            Country::UnitedStates => 6_500_000,
            Country::India => 5_200_000,
            Country::UnitedKingdom => 2_100_000,
            Country::Australia => 900_000,
        }
    }

    pub fn base_arpu(&self) -> f64 {
        match self {
            Country::Canada => 14.5,
            Country::UnitedStates => 15.5,
            Country::India => 6.0,
            Country::UnitedKingdom => 13.5,
            Country::Australia => 15.0,
        }
    }
}

#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Display, Sequence)]
pub enum Device {
    #[strum(serialize = "Mobile")]
    Mobile,
    #[strum(serialize = "TV")]
    TV,
    #[strum(serialize = "Laptop")]
    Laptop,
    #[strum(serialize = "Tablet")]
    Tablet,
}

/// How a device is typically used: sessions per viewer and minutes per session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageProfile {
    pub avg_sessions: f64,
    pub avg_minutes: f64,
}

impl Device {
    pub fn viewer_share(&self) -> f64 {
        match self {
            Device::Mobile => 0.35,
            Device::TV => 0.40,
            Device::Laptop => 0.18,
            Device::Tablet => 0.07,
        }
    }

    pub fn usage(&self) -> UsageProfile {
        let (avg_sessions, avg_minutes) = match self {
            Device::TV => (1.3, 55.),
            Device::Mobile => (1.6, 28.),
            Device::Laptop => (1.4, 40.),
            Device::Tablet => (1.3, 35.),
        };

        UsageProfile {
            avg_sessions,
            avg_minutes,
        }
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for Device {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
