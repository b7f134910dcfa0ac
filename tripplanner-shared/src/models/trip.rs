//! Trip parameters and their per-field validation.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Days between today and the default trip start.
pub const DEFAULT_LEAD_DAYS: i64 = 14;

/// Default trip length in days.
pub const DEFAULT_TRIP_DAYS: i64 = 5;

/// Kind of group travelling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum TripType {
    /// One traveller.
    #[serde(rename = "Solo")]
    Solo,
    /// A group of friends.
    #[serde(rename = "Friends Group")]
    FriendsGroup,
    /// A family, possibly with children.
    #[serde(rename = "Family Trip")]
    FamilyTrip,
    /// Two partners.
    #[default]
    #[serde(rename = "Couple Getaway")]
    CoupleGetaway,
}

impl TripType {
    /// All trip types, in the order the form lists them.
    pub const ALL: [Self; 4] = [
        Self::Solo,
        Self::FriendsGroup,
        Self::FamilyTrip,
        Self::CoupleGetaway,
    ];

    /// Wire value expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solo => "Solo",
            Self::FriendsGroup => "Friends Group",
            Self::FamilyTrip => "Family Trip",
            Self::CoupleGetaway => "Couple Getaway",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = TripFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|trip_type| trip_type.as_str() == value)
            .ok_or_else(|| TripFieldError::UnknownTripType(value.to_string()))
    }
}

/// Parameters submitted to `/generate-plan`.
///
/// Only per-field constraints are enforced (see [`TripRequest::set_field`]);
/// cross-field relations such as `max_budget >= min_budget` are left to the
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripRequest {
    /// Where the trip goes.
    pub destination: String,
    /// Where the travellers depart from.
    pub from_location: String,
    /// First day of the trip, sent as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Last day of the trip, sent as `YYYY-MM-DD`.
    pub end_date: NaiveDate,
    /// Number of travellers, at least one.
    pub people: u32,
    /// Kind of group travelling.
    pub trip_type: TripType,
    /// Free-text interests and requirements.
    pub group_details: String,
    /// Lower bound of the local budget in USD.
    pub min_budget: f64,
    /// Upper bound of the local budget in USD.
    pub max_budget: f64,
}

impl TripRequest {
    /// Builds the pre-filled form values relative to `today`.
    ///
    /// The trip starts two weeks out and lasts five days for two travellers.
    #[must_use]
    pub fn with_defaults(today: NaiveDate) -> Self {
        let start_date = today + Duration::days(DEFAULT_LEAD_DAYS);
        Self {
            destination: "Kyoto, Japan".to_string(),
            from_location: "New York, USA".to_string(),
            start_date,
            end_date: start_date + Duration::days(DEFAULT_TRIP_DAYS),
            people: 2,
            trip_type: TripType::CoupleGetaway,
            group_details:
                "We love history, quiet gardens, and traditional food, but dislike large crowds."
                    .to_string(),
            min_budget: 2000.0,
            max_budget: 4500.0,
        }
    }

    /// Applies a raw form value to a single field.
    ///
    /// # Errors
    /// Returns a [`TripFieldError`] and leaves the request untouched when the
    /// value does not satisfy the field's constraint.
    pub fn set_field(&mut self, field: TripField, raw: &str) -> Result<(), TripFieldError> {
        match field {
            TripField::Destination => self.destination = raw.to_string(),
            TripField::FromLocation => self.from_location = raw.to_string(),
            TripField::GroupDetails => self.group_details = raw.to_string(),
            TripField::StartDate => self.start_date = parse_date(field, raw)?,
            TripField::EndDate => self.end_date = parse_date(field, raw)?,
            TripField::People => {
                let people: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| TripFieldError::NotANumber(field))?;
                if people == 0 {
                    return Err(TripFieldError::OutOfRange(field));
                }
                self.people = people;
            }
            TripField::TripType => self.trip_type = raw.parse()?,
            TripField::MinBudget => self.min_budget = parse_budget(field, raw)?,
            TripField::MaxBudget => self.max_budget = parse_budget(field, raw)?,
        }
        Ok(())
    }
}

fn parse_date(field: TripField, raw: &str) -> Result<NaiveDate, TripFieldError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| TripFieldError::InvalidDate(field))
}

fn parse_budget(field: TripField, raw: &str) -> Result<f64, TripFieldError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| TripFieldError::NotANumber(field))?;
    if !value.is_finite() || value < 0.0 {
        return Err(TripFieldError::OutOfRange(field));
    }
    Ok(value)
}

/// Editable fields of a [`TripRequest`], keyed by their form input name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripField {
    /// `destination`
    Destination,
    /// `from_location`
    FromLocation,
    /// `start_date`
    StartDate,
    /// `end_date`
    EndDate,
    /// `people`
    People,
    /// `trip_type`
    TripType,
    /// `group_details`
    GroupDetails,
    /// `min_budget`
    MinBudget,
    /// `max_budget`
    MaxBudget,
}

impl TripField {
    /// Form input name, identical to the wire field name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::FromLocation => "from_location",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::People => "people",
            Self::TripType => "trip_type",
            Self::GroupDetails => "group_details",
            Self::MinBudget => "min_budget",
            Self::MaxBudget => "max_budget",
        }
    }
}

impl fmt::Display for TripField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TripField {
    type Err = TripFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "destination" => Ok(Self::Destination),
            "from_location" => Ok(Self::FromLocation),
            "start_date" => Ok(Self::StartDate),
            "end_date" => Ok(Self::EndDate),
            "people" => Ok(Self::People),
            "trip_type" => Ok(Self::TripType),
            "group_details" => Ok(Self::GroupDetails),
            "min_budget" => Ok(Self::MinBudget),
            "max_budget" => Ok(Self::MaxBudget),
            _ => Err(TripFieldError::UnknownField(value.to_string())),
        }
    }
}

/// Reasons a form value was rejected for a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripFieldError {
    /// No field has this input name.
    #[error("unknown trip field `{0}`")]
    UnknownField(String),
    /// The value is not a known trip type.
    #[error("unknown trip type `{0}`")]
    UnknownTripType(String),
    /// A numeric field received text.
    #[error("`{0}` must be a number")]
    NotANumber(TripField),
    /// A numeric field is below its minimum or not finite.
    #[error("`{0}` is out of range")]
    OutOfRange(TripField),
    /// A date field is not `YYYY-MM-DD`.
    #[error("`{0}` must be a date formatted as YYYY-MM-DD")]
    InvalidDate(TripField),
}
