use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skyfare_shared::Masked;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PassengerType {
    Adult,
    Child,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub passenger_type: PassengerType,
    /// Mobility or other special assistance required.
    pub special_assistance: bool,
    pub nationality: Option<String>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    /// Assigned at submission time from the held seat at the same index.
    pub seat_id: Option<String>,
}

impl Passenger {
    /// A blank adult slot, used when the party size grows.
    pub fn blank() -> Self {
        Passenger {
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: None,
            passenger_type: PassengerType::Adult,
            special_assistance: false,
            nationality: None,
            document_type: None,
            document_number: None,
            seat_id: None,
        }
    }
}

/// Booking contact. Email and phone are masked in Debug output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
}

/// Composition of the travelling party, derived from the passenger list.
/// Drives the exit-row/extra-legroom eligibility restriction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartyProfile {
    pub adults: usize,
    pub children: usize,
    pub assistance: usize,
}

impl PartyProfile {
    pub fn from_passengers(passengers: &[Passenger]) -> Self {
        let mut profile = PartyProfile::default();
        for p in passengers {
            match p.passenger_type {
                PassengerType::Adult => profile.adults += 1,
                PassengerType::Child => profile.children += 1,
            }
            if p.special_assistance {
                profile.assistance += 1;
            }
        }
        profile
    }

    /// True when exit-row/extra-legroom seats must be excluded.
    pub fn requires_protection(&self) -> bool {
        self.children > 0 || self.assistance > 0
    }
}
