//! The JSON bodies accepted by the create and update endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Time};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{
        ExpenseBuilder,
        core::{DATE_FORMAT, SHORT_TIME_FORMAT, TIME_FORMAT},
    },
};

/// The body of a request to create or update an expense.
///
/// Every field is optional at this level so that a missing required field
/// can be reported as [Error::MissingFields] instead of a deserialization error.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    /// How much was spent, either a JSON number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount: Option<f64>,
    /// What kind of expense this was.
    #[serde(default)]
    pub category: Option<String>,
    /// A finer grained kind of expense within `category`.
    #[serde(default)]
    pub sub_category: Option<String>,
    /// Free text describing what the money was spent on.
    #[serde(default)]
    pub purpose: Option<String>,
    /// The person who paid.
    #[serde(default)]
    pub spent_by: Option<String>,
    /// The date of the expense as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// The time of the expense as `HH:MM` or `HH:MM:SS`.
    #[serde(default)]
    pub time: Option<String>,
}

impl ExpenseRequest {
    /// Check the request and convert it into an [ExpenseBuilder].
    ///
    /// Blank optional fields are treated as absent.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] if the amount is missing, zero or not finite, or the category or payer is blank,
    /// - [Error::InvalidDate] if the date is not formatted as `YYYY-MM-DD`,
    /// - or [Error::InvalidTime] if the time is not formatted as `HH:MM` or `HH:MM:SS`.
    pub fn validate(self) -> Result<ExpenseBuilder, Error> {
        let amount = self
            .amount
            .filter(|amount| amount.is_finite() && *amount != 0.0);
        let category = non_blank(self.category);
        let spent_by = non_blank(self.spent_by);

        let (Some(amount), Some(category), Some(spent_by)) = (amount, category, spent_by) else {
            return Err(Error::MissingFields);
        };

        let date = non_blank(self.date);
        if let Some(date) = &date {
            Date::parse(date, DATE_FORMAT).map_err(|_| Error::InvalidDate(date.clone()))?;
        }

        let time = non_blank(self.time);
        if let Some(time) = &time {
            Time::parse(time, TIME_FORMAT)
                .or_else(|_| Time::parse(time, SHORT_TIME_FORMAT))
                .map_err(|_| Error::InvalidTime(time.clone()))?;
        }

        Ok(ExpenseBuilder {
            amount,
            category,
            sub_category: non_blank(self.sub_category),
            purpose: non_blank(self.purpose),
            spent_by,
            date,
            time,
        })
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountValue {
    Number(f64),
    Text(String),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AmountValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AmountValue::Number(amount)) => Ok(Some(amount)),
        Some(AmountValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(AmountValue::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("amount \"{text}\" is not a number"))),
    }
}

/// The response to creating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// The ID of the new expense.
    pub id: ExpenseId,
}

/// The response to updating an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedResponse {
    /// One if the expense was updated, zero if it does not exist.
    pub updated: usize,
}

/// The response to deleting an expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedResponse {
    /// One if the expense was deleted, zero if it does not exist.
    pub deleted: usize,
}
