use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Account {
        pub id: String,
        pub name: String,
    }
}

pub mod tag {
    use super::*;

    /// A label from the shared vocabulary. Names are unique server-side.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Tag {
        pub id: String,
        pub name: String,
    }

    /// Body of `POST /api/tags`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TagNew {
        pub name: String,
    }

    /// Body of `POST /api/transactions/{id}/tags`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagAssociate {
        pub tag_id: String,
    }
}

pub mod transaction {
    use std::fmt;

    use chrono::NaiveDate;

    use super::*;
    use crate::tag::Tag;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Category {
        Income,
        Expense,
        Asset,
        Liability,
    }

    impl Category {
        pub const ALL: [Category; 4] = [
            Category::Income,
            Category::Expense,
            Category::Asset,
            Category::Liability,
        ];

        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "Income",
                Self::Expense => "Expense",
                Self::Asset => "Asset",
                Self::Liability => "Liability",
            }
        }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionType {
        Credit,
        Debit,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Transaction {
        pub id: String,
        /// Calendar date of the entry. Timestamps are accepted and truncated.
        #[serde(with = "crate::date")]
        pub date: NaiveDate,
        pub account_id: String,
        pub description: String,
        pub category: Category,
        /// Absolute amount; the sign comes from `kind`.
        pub amount: f64,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub comment: Option<String>,
        #[serde(default)]
        pub tags: Vec<Tag>,
    }

    /// Body of `PATCH /api/transactions/{id}` for a category change.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub category: Category,
    }

    /// Body of `PATCH /api/transactions/{id}` for a comment change.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CommentUpdate {
        pub comment: String,
    }
}

/// Serde glue for transaction dates.
///
/// The backend may send `2024-03-15`, `2024-03-15T00:00:00.000Z` or a naive
/// `2024-03-15T10:30:00`. Only the calendar date is kept; it is always written
/// back as `YYYY-MM-DD`.
pub mod date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::transaction::{Category, Transaction, TransactionType};

    #[test]
    fn transaction_reads_camel_case_and_type() {
        let raw = r#"{
            "id": "t1",
            "date": "2024-03-15T00:00:00.000Z",
            "accountId": "a1",
            "description": "Coffee",
            "category": "Expense",
            "amount": 3.5,
            "type": "debit",
            "tags": [{"id": "g1", "name": "food"}]
        }"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(tx.account_id, "a1");
        assert_eq!(tx.kind, TransactionType::Debit);
        assert_eq!(tx.category, Category::Expense);
        assert_eq!(tx.comment, None);
        assert_eq!(tx.tags[0].name, "food");
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let raw = r#"{"id":"t2","date":"2024-01-02","accountId":"a1","description":"Pay",
            "category":"Income","amount":1200,"type":"credit","comment":"jan"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert!(tx.tags.is_empty());
        assert_eq!(tx.comment.as_deref(), Some("jan"));
    }

    #[test]
    fn date_accepts_naive_timestamps_and_rejects_garbage() {
        assert_eq!(
            super::date::parse("2024-02-29T23:59:59"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(super::date::parse("yesterday"), None);
    }

    #[test]
    fn date_is_written_as_plain_date() {
        let raw = r#"{"id":"t3","date":"2024-03-15T10:00:00+02:00","accountId":"a1",
            "description":"x","category":"Asset","amount":1,"type":"credit"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2024-03-15");
        assert_eq!(json["type"], "credit");
        assert!(json.get("comment").is_none());
    }
}
