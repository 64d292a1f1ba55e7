use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a catalog item. Always positive, including when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw id. Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for ProductId {
    type Error = String;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| "product id must be positive".to_string())
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl FromStr for ProductId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid product id: {s:?}"))?;
        Self::try_from(raw)
    }
}

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: String,
}

/// A single customer review. Server-owned and never mutated by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub author: String,
    pub content: String,
    /// Star rating, 1..=5. Out-of-range values fail to decode.
    #[serde(deserialize_with = "star_rating")]
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

fn star_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = u8::deserialize(deserializer)?;
    if (1..=5).contains(&raw) {
        Ok(raw)
    } else {
        Err(de::Error::invalid_value(
            Unexpected::Unsigned(raw.into()),
            &"a star rating from 1 to 5",
        ))
    }
}

/// Reviews for one product plus the summary the server may already hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewSet {
    pub reviews: Vec<Review>,
    pub summary: Option<String>,
}

impl ReviewSet {
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Mean star rating, `None` when there are no reviews.
    pub fn average_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(f64::from(total) / self.reviews.len() as f64)
    }
}

/// Body of `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Body of `GET /products/{id}/reviews`.
pub type GetReviewsResponse = ReviewSet;

/// Body of `POST /products/{id}/reviews/summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: u64, rating: u8) -> Review {
        Review {
            id,
            author: format!("author-{id}"),
            content: "fine".into(),
            rating,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn product_id_rejects_zero() {
        assert!(ProductId::new(0).is_none());
        assert_eq!(ProductId::new(7).map(ProductId::get), Some(7));
        assert!("0".parse::<ProductId>().is_err());
        assert!("abc".parse::<ProductId>().is_err());
        assert_eq!("  42 ".parse::<ProductId>().unwrap().get(), 42);
    }

    #[test]
    fn average_rating_of_empty_set_is_none() {
        assert_eq!(ReviewSet::default().average_rating(), None);
    }

    #[test]
    fn average_rating_is_mean() {
        let set = ReviewSet {
            reviews: vec![review(1, 5), review(2, 4), review(3, 4)],
            summary: None,
        };
        let avg = set.average_rating().unwrap();
        assert!((avg - 13.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn review_set_deserializes_camel_case_wire_format() {
        let json = r#"{
            "reviews": [
                {"id": 1, "author": "Ana", "content": "Great", "rating": 5,
                 "createdAt": "2024-03-01T10:00:00.000Z"}
            ],
            "summary": null
        }"#;
        let set: ReviewSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.reviews.len(), 1);
        assert_eq!(set.reviews[0].author, "Ana");
        assert!(set.summary.is_none());
    }

    #[test]
    fn zero_product_id_fails_to_decode() {
        let json = r#"{"id": 0, "name": "Ghost", "description": null, "price": 1.0, "image": "x"}"#;
        let err = serde_json::from_str::<Product>(json).unwrap_err();
        assert!(err.to_string().contains("positive"), "{err}");

        let id: ProductId = serde_json::from_str("12").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "12");
    }

    #[test]
    fn out_of_range_ratings_fail_to_decode() {
        for rating in [0, 6, 255] {
            let json = format!(
                r#"{{"id": 1, "author": "Ana", "content": "Hm", "rating": {rating},
                    "createdAt": "2024-03-01T10:00:00.000Z"}}"#
            );
            assert!(serde_json::from_str::<Review>(&json).is_err(), "rating {rating}");
        }
        let json = r#"{"id": 1, "author": "Ana", "content": "Ok", "rating": 1,
                       "createdAt": "2024-03-01T10:00:00.000Z"}"#;
        assert_eq!(serde_json::from_str::<Review>(json).unwrap().rating, 1);
    }

    #[test]
    fn product_accepts_null_description() {
        let json = r#"{"id": 3, "name": "Mug", "description": null, "price": 9.5, "image": "http://x/mug.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.get(), 3);
        assert!(product.description.is_none());
    }
}
