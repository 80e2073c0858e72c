use std::collections::BTreeMap;

use time::macros::datetime;

use crate::model::{ApprovalStatus, Guide, Role, TourPlan, User};

pub(crate) fn guide(id: &str, area: &str, price_per_hour: u32, rating: f32) -> Guide {
    Guide {
        user: User {
            id: id.to_owned(),
            name: format!("Guide {id}"),
            name_en: format!("Guide {id}"),
            email: format!("{id}@sakuraguide.com"),
            role: Role::Guide,
            created_at: datetime!(2025-01-01 0:00 UTC),
        },
        area: area.to_owned(),
        area_en: area.to_owned(),
        languages: vec!["日本語".to_owned()],
        specialties: Vec::new(),
        rating,
        review_count: 0,
        price_per_hour,
        bio: String::new(),
        bio_en: String::new(),
        certifications: Vec::new(),
        years_experience: 1,
        tour_plans: vec![TourPlan {
            id: format!("tp-{id}"),
            title: "Walk".to_owned(),
            description: String::new(),
            duration: 2,
            price: price_per_hour * 2,
            max_people: 4,
            includes: Vec::new(),
        }],
        availability: BTreeMap::new(),
        verified: true,
        status: ApprovalStatus::Approved,
    }
}
