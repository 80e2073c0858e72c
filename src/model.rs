use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::filter::WordFilterConfig;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Traveler,
    Guide,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        use Role::*;
        match self {
            Traveler => "traveler",
            Guide => "guide",
            Admin => "admin",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub email: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traveler {
    #[serde(flatten)]
    pub user: User,
    pub nationality: String,
    pub languages: Vec<String>,
    /// Guide ids.
    pub favorites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(flatten)]
    pub user: User,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPlan {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Hours.
    pub duration: u32,
    pub price: u32,
    pub max_people: u32,
    pub includes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    #[serde(flatten)]
    pub user: User,
    pub area: String,
    pub area_en: String,
    pub languages: Vec<String>,
    pub specialties: Vec<String>,
    pub rating: f32,
    pub review_count: u32,
    pub price_per_hour: u32,
    pub bio: String,
    pub bio_en: String,
    pub certifications: Vec<String>,
    pub years_experience: u32,
    pub tour_plans: Vec<TourPlan>,
    /// `YYYY-MM-DD` -> available
    pub availability: BTreeMap<String, bool>,
    pub verified: bool,
    pub status: ApprovalStatus,
}

impl Guide {
    pub fn tour_plan(&self, plan_id: &str) -> Option<&TourPlan> {
        self.tour_plans.iter().find(|plan| plan.id == plan_id)
    }

    pub fn is_available(&self, date: Date) -> bool {
        self.availability.get(&date.to_string()).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub guide_id: String,
    pub traveler_id: String,
    pub tour_plan_id: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub number_of_people: u32,
    pub total_price: u64,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub reviewed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub booking_id: String,
    pub guide_id: String,
    pub traveler_id: String,
    pub rating: f32,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub helpful: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub filtered: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub read: bool,
}

impl Message {
    pub fn between(&self, a: &str, b: &str) -> bool {
        (self.sender_id == a && self.receiver_id == b) || (self.sender_id == b && self.receiver_id == a)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participants: [String; 2],
}

impl Conversation {
    pub fn includes(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    pub fn other(&self, user_id: &str) -> Option<&str> {
        self.participants.iter().find(|p| *p != user_id).map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commission {
    /// Percent.
    pub rate: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub word_filter: WordFilterConfig,
    pub commission: Commission,
    pub payment_methods: Vec<String>,
}
