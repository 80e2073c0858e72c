use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Guide;

/// The filter UI's "any" option.
pub const ANY: &str = "すべて";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Recommended,
    Rating,
    PriceLow,
    PriceHigh,
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unknown keys sort the recommended way.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use SortKey::*;
        Ok(match s {
            "rating" => Rating,
            "price-low" => PriceLow,
            "price-high" => PriceHigh,
            _ => Recommended,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideCriteria {
    pub area: Option<String>,
    pub language: Option<String>,
    pub specialty: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_rating: Option<f32>,
}

fn choice(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty() && *v != ANY)
}

fn bound<T: Copy + Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

impl GuideCriteria {
    /// True when no criterion would reject anything.
    pub fn is_empty(&self) -> bool {
        choice(&self.area).is_none()
            && choice(&self.language).is_none()
            && choice(&self.specialty).is_none()
            && bound(self.min_price).is_none()
            && bound(self.max_price).is_none()
            && bound(self.min_rating).is_none()
    }

    pub fn matches(&self, guide: &Guide) -> bool {
        if let Some(area) = choice(&self.area) {
            if guide.area != area {
                return false;
            }
        }
        if let Some(language) = choice(&self.language) {
            if !guide.languages.iter().any(|l| l == language) {
                return false;
            }
        }
        if let Some(specialty) = choice(&self.specialty) {
            if !guide.specialties.iter().any(|s| s == specialty) {
                return false;
            }
        }
        if let Some(min) = bound(self.min_price) {
            if i64::from(guide.price_per_hour) < min {
                return false;
            }
        }
        if let Some(max) = bound(self.max_price) {
            if i64::from(guide.price_per_hour) > max {
                return false;
            }
        }
        if let Some(min) = bound(self.min_rating) {
            if guide.rating < min {
                return false;
            }
        }
        true
    }
}

fn matches_query(guide: &Guide, query: &str) -> bool {
    guide.user.name.to_lowercase().contains(query)
        || guide.area.to_lowercase().contains(query)
        || guide.bio.to_lowercase().contains(query)
        || guide.specialties.iter().any(|s| s.to_lowercase().contains(query))
}

/// Filters `guides` by free-text `query` and `criteria`, then orders them by
/// `sort`. Callers pass approved guides only.
pub fn search_guides<'a>(
    guides: &'a [Guide],
    query: &str,
    criteria: &GuideCriteria,
    sort: SortKey,
) -> Vec<&'a Guide> {
    let query = query.to_lowercase();

    let mut result: Vec<&Guide> = guides
        .iter()
        .filter(|guide| query.is_empty() || matches_query(guide, &query))
        .filter(|guide| criteria.matches(guide))
        .collect();

    use SortKey::*;
    match sort {
        Rating => result.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        PriceLow => result.sort_by_key(|g| g.price_per_hour),
        PriceHigh => result.sort_by(|a, b| b.price_per_hour.cmp(&a.price_per_hour)),
        Recommended => result.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
    }

    result
}
