use chrono::{DateTime, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of session a mentor offers in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Yoga,
    Meditation,
    Diet,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Yoga => "YOGA",
            SessionType::Meditation => "MEDITATION",
            SessionType::Diet => "DIET",
        }
    }
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YOGA" => Ok(SessionType::Yoga),
            "MEDITATION" => Ok(SessionType::Meditation),
            "DIET" => Ok(SessionType::Diet),
            other => Err(format!("unknown session type: {}", other)),
        }
    }
}

/// Weekday of a recurring pattern, stored and transported as its
/// SCREAMING_SNAKE_CASE name ("MONDAY", "TUESDAY", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }

    pub fn to_chrono(self) -> Weekday {
        match self {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONDAY" => Ok(DayOfWeek::Monday),
            "TUESDAY" => Ok(DayOfWeek::Tuesday),
            "WEDNESDAY" => Ok(DayOfWeek::Wednesday),
            "THURSDAY" => Ok(DayOfWeek::Thursday),
            "FRIDAY" => Ok(DayOfWeek::Friday),
            "SATURDAY" => Ok(DayOfWeek::Saturday),
            "SUNDAY" => Ok(DayOfWeek::Sunday),
            other => Err(format!("unknown weekday: {}", other)),
        }
    }
}

/// A bookable window of mentor availability with a student capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub session_type: SessionType,
    pub max_students: i32,
    pub current_students: i32,
    pub is_recurring: bool,
    pub recurring_days: Vec<DayOfWeek>,
    /// Price in minor currency units (e.g. paise).
    pub price: i64,
    pub session_link: String,
    pub notes: Option<String>,
    pub is_active: bool,
    pub is_booked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecurringSlotsRequest {
    pub mentor_id: Uuid,
    pub session_type: SessionType,
    /// Daily start of the slot, e.g. "10:00:00".
    pub start_time_of_day: NaiveTime,
    /// Daily end of the slot; must be later than the start.
    pub end_time_of_day: NaiveTime,
    pub recurring_days: Vec<DayOfWeek>,
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    pub max_students: i32,
    pub price: i64,
    pub session_link: String,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_window_days() -> i64 {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOneOffSlotRequest {
    pub mentor_id: Uuid,
    pub session_type: SessionType,
    #[serde(with = "crate::datetime::flexible")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "crate::datetime::flexible")]
    pub end_time: DateTime<Utc>,
    pub max_students: i32,
    pub price: i64,
    pub session_link: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub created: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotWindowQuery {
    #[serde(default, with = "crate::datetime::flexible_opt")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::datetime::flexible_opt")]
    pub to: Option<DateTime<Utc>>,
}
