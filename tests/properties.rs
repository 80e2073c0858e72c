use std::collections::BTreeMap;

use proptest::prelude::*;
use sakuraguide::{
    filter::{filter_message, WordFilterConfig, MASK},
    guides::{search_guides, GuideCriteria, SortKey},
    model::{ApprovalStatus, Guide, Role, User},
};
use time::macros::datetime;

const AREAS: [&str; 4] = ["東京", "京都", "大阪", "沖縄"];

fn guide(index: usize, area: &str, price_per_hour: u32, rating: f32, review_count: u32) -> Guide {
    Guide {
        user: User {
            id: format!("guide-{index}"),
            name: format!("Guide {index}"),
            name_en: format!("Guide {index}"),
            email: format!("guide{index}@sakuraguide.com"),
            role: Role::Guide,
            created_at: datetime!(2025-01-01 0:00 UTC),
        },
        area: area.to_owned(),
        area_en: area.to_owned(),
        languages: vec!["日本語".to_owned()],
        specialties: vec!["歴史・文化".to_owned()],
        rating,
        review_count,
        price_per_hour,
        bio: String::new(),
        bio_en: String::new(),
        certifications: Vec::new(),
        years_experience: 1,
        tour_plans: Vec::new(),
        availability: BTreeMap::new(),
        verified: true,
        status: ApprovalStatus::Approved,
    }
}

fn guides() -> impl Strategy<Value = Vec<Guide>> {
    prop::collection::vec((0..AREAS.len(), 0u32..20_000, 0u32..=50, 0u32..500), 0..20).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (area, price, rating, reviews))| guide(i, AREAS[area], price, rating as f32 / 10.0, reviews))
            .collect()
    })
}

fn criteria() -> impl Strategy<Value = GuideCriteria> {
    (
        prop::option::of(0..AREAS.len()),
        prop::option::of(0i64..20_000),
        prop::option::of(0i64..20_000),
        prop::option::of(0u32..=50),
    )
        .prop_map(|(area, min_price, max_price, min_rating)| GuideCriteria {
            area: area.map(|a| AREAS[a].to_owned()),
            min_price,
            max_price,
            min_rating: min_rating.map(|r| r as f32 / 10.0),
            ..Default::default()
        })
}

fn ids(guides: &[&Guide]) -> Vec<String> {
    guides.iter().map(|g| g.user.id.clone()).collect()
}

proptest! {
    #[test]
    fn disabled_filter_is_identity(text in ".{0,60}", words in prop::collection::vec("[a-z]{1,6}", 0..5)) {
        let config = WordFilterConfig::new(false, &words).unwrap();
        let out = filter_message(&text, &config).unwrap();
        prop_assert_eq!(out.filtered, text);
        prop_assert!(!out.is_filtered);
    }

    #[test]
    fn banned_words_are_always_masked(prefix in "[a-z ]{0,10}", word in "[a-z]{2,6}", suffix in "[a-z ]{0,10}", upper in any::<bool>()) {
        let written = if upper { word.to_uppercase() } else { word.clone() };
        let text = format!("{prefix}{written}{suffix}");
        let config = WordFilterConfig::new(true, [&word]).unwrap();

        let out = filter_message(&text, &config).unwrap();
        prop_assert!(out.is_filtered);
        prop_assert!(out.filtered.contains(MASK));
        prop_assert!(!out.filtered.to_lowercase().contains(&word));
    }

    #[test]
    fn filtering_is_idempotent(text in "[a-z ]{0,40}", words in prop::collection::vec("[a-z]{3,6}", 1..4)) {
        let config = WordFilterConfig::new(true, &words).unwrap();
        let once = filter_message(&text, &config).unwrap();
        let twice = filter_message(&once.filtered, &config).unwrap();
        prop_assert_eq!(&twice.filtered, &once.filtered);
        prop_assert!(!twice.is_filtered);
    }

    #[test]
    fn results_are_a_subset(all in guides(), criteria in criteria()) {
        let result = search_guides(&all, "", &criteria, SortKey::Rating);
        for found in &result {
            prop_assert!(all.iter().any(|g| g.user.id == found.user.id));
            prop_assert!(criteria.matches(found));
        }
    }

    #[test]
    fn price_orders_are_reverses(all in guides()) {
        let mut seen = std::collections::HashSet::new();
        let distinct: Vec<Guide> = all.into_iter().filter(|g| seen.insert(g.price_per_hour)).collect();
        let none = GuideCriteria::default();

        let mut low = ids(&search_guides(&distinct, "", &none, SortKey::PriceLow));
        let high = ids(&search_guides(&distinct, "", &none, SortKey::PriceHigh));
        low.reverse();
        prop_assert_eq!(low, high);
    }

    #[test]
    fn empty_search_keeps_everything(all in guides()) {
        let result = search_guides(&all, "", &GuideCriteria::default(), SortKey::Recommended);
        prop_assert_eq!(result.len(), all.len());
        prop_assert!(result.windows(2).all(|w| w[0].review_count >= w[1].review_count));
    }
}
