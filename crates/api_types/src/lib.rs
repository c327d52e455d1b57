use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Field deserializers for what the browser page posts: ids read from
/// `<select>.value` arrive as strings, and an untouched date input arrives
/// as `""`.
pub mod lenient {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    /// Id given as a JSON number or a numeric string. Blank means absent.
    pub fn id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawId>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawId::Number(n)) => i32::try_from(n)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("id out of range: {n}"))),
            Some(RawId::Text(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                text.parse()
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("invalid id: {text:?}")))
            }
        }
    }

    /// `YYYY-MM-DD` date. Blank means absent.
    pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) if text.trim().is_empty() => Ok(None),
            Some(text) => text.trim().parse().map(Some).map_err(D::Error::custom),
        }
    }
}

pub mod common {
    use super::*;

    /// Body of every error response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorBody {
        pub error: String,
    }

    /// Body of delete/remove responses.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Message {
        pub message: String,
    }

    impl Message {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }

    /// `?house_id=` query string. Optional at the type level so that a
    /// missing value can be reported with a readable message.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct HouseScope {
        pub house_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Endpoints {
        pub houses: String,
        pub people: String,
        pub items: String,
        pub purchases: String,
        pub meals: String,
    }

    /// Response of `GET /`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServiceDescriptor {
        pub message: String,
        pub version: String,
        pub endpoints: Endpoints,
    }
}

pub mod house {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HouseNew {
        pub name: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct HouseUpdate {
        pub name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct House {
        pub id: i32,
        pub name: String,
    }
}

pub mod person {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PersonNew {
        pub name: Option<String>,
        pub email: Option<String>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
    }

    /// Sparse update; `house_id` selects the scope and is always required.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PersonUpdate {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        pub name: Option<String>,
        pub email: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Person {
        pub id: i32,
        pub name: String,
        pub email: String,
        pub house_id: i32,
    }
}

pub mod item {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemNew {
        pub item_name: Option<String>,
        pub count: Option<i64>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        pub cost_per_ct: Option<f64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ItemUpdate {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        pub item_name: Option<String>,
        pub count: Option<i64>,
        pub cost_per_ct: Option<f64>,
    }

    /// Body of `PATCH /api/items/{id}/count`: `change` is signed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemCountChange {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        pub change: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Item {
        pub item_id: i32,
        pub item_name: String,
        pub count: i64,
        pub cost_per_ct: f64,
        pub house_id: i32,
    }
}

pub mod purchase {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseNew {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub buyer_id: Option<i32>,
        /// Defaults to the current UTC date.
        #[serde(default, deserialize_with = "lenient::date")]
        pub purchase_at: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PurchaseUpdate {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub buyer_id: Option<i32>,
        #[serde(default, deserialize_with = "lenient::date")]
        pub purchase_at: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseLineNew {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub item_id: Option<i32>,
        pub quantity: Option<i64>,
        pub cost_per_ct: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Purchase {
        pub p_id: i32,
        pub house_id: i32,
        pub buyer_id: i32,
        pub purchase_at: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseLine {
        pub pl_id: i32,
        pub p_id: i32,
        pub house_id: i32,
        pub item_id: i32,
        pub quantity: i64,
        pub cost_per_ct: f64,
        /// `null` when the item has been deleted since.
        pub item_name: Option<String>,
        pub line_total: f64,
    }

    /// Response of `GET /api/purchases/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseDetail {
        pub p_id: i32,
        pub house_id: i32,
        pub buyer_id: i32,
        pub purchase_at: NaiveDate,
        pub buyer_name: Option<String>,
        pub lines: Vec<PurchaseLine>,
        pub total: f64,
    }
}

pub mod meal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MealNew {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        pub meal_name: Option<String>,
        /// Defaults to the current UTC date.
        #[serde(default, deserialize_with = "lenient::date")]
        pub made_on: Option<NaiveDate>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MealUpdate {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        pub meal_name: Option<String>,
        #[serde(default, deserialize_with = "lenient::date")]
        pub made_on: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MealAttendeeNew {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub user_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MealIngredientNew {
        #[serde(default, deserialize_with = "lenient::id")]
        pub house_id: Option<i32>,
        #[serde(default, deserialize_with = "lenient::id")]
        pub item_id: Option<i32>,
        pub quant_used: Option<f64>,
        pub cost_per_ct: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Meal {
        pub meal_id: i32,
        pub house_id: i32,
        pub meal_name: String,
        pub made_on: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Attendee {
        pub id: i32,
        pub name: Option<String>,
        pub email: Option<String>,
        pub house_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MealIngredient {
        pub meal_id: i32,
        pub house_id: i32,
        pub item_id: i32,
        pub quant_used: f64,
        pub cost_per_ct: f64,
        pub item_name: Option<String>,
        pub line_total: f64,
    }

    /// Response of `GET /api/meals/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MealDetail {
        pub meal_id: i32,
        pub house_id: i32,
        pub meal_name: String,
        pub made_on: NaiveDate,
        pub attendees: Vec<Attendee>,
        pub ingredients: Vec<MealIngredient>,
        pub total_cost: f64,
        /// `0` when nobody attended.
        pub cost_per_person: f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meal::{MealAttendeeNew, MealUpdate};
    use purchase::PurchaseNew;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let body: PurchaseNew =
            serde_json::from_value(json!({ "house_id": 2, "buyer_id": " 7 " })).unwrap();
        assert_eq!(body.house_id, Some(2));
        assert_eq!(body.buyer_id, Some(7));
        assert_eq!(body.purchase_at, None);
    }

    #[test]
    fn blank_or_null_ids_are_absent() {
        let body: MealAttendeeNew =
            serde_json::from_value(json!({ "house_id": null, "user_id": "" })).unwrap();
        assert_eq!(body.house_id, None);
        assert_eq!(body.user_id, None);
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        let err = serde_json::from_value::<MealAttendeeNew>(json!({ "user_id": "bob" }))
            .unwrap_err();
        assert!(err.to_string().contains("invalid id"));
        assert!(serde_json::from_value::<MealAttendeeNew>(json!({ "user_id": 1.5 })).is_err());
    }

    #[test]
    fn blank_dates_are_absent() {
        let body: MealUpdate =
            serde_json::from_value(json!({ "house_id": "1", "made_on": "" })).unwrap();
        assert_eq!(body.made_on, None);

        let body: PurchaseNew =
            serde_json::from_value(json!({ "purchase_at": "2024-01-01" })).unwrap();
        assert_eq!(body.purchase_at, NaiveDate::from_ymd_opt(2024, 1, 1));

        assert!(serde_json::from_value::<PurchaseNew>(json!({ "purchase_at": "01/02/2024" })).is_err());
    }
}
