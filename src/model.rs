use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Second-precision timestamp format used by the CSV snapshot and the
/// warehouse upload.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One extracted job posting.
///
/// Optional fields are `None` when the detail page did not carry the value;
/// they stay `None` through extraction and are only filled (or the row
/// dropped) by the cleaning pass. In particular the salary bounds are present
/// only when the raw salary text matched the `IDR<min> - <max>/Bulan` range
/// shape - an unspecified salary is `None` here, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_name: String,
    pub job_type: String,
    pub salary_range: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub skills_requirements: Option<String>,
    pub education_requirements: String,
    pub experience_requirements: String,
    pub another_requirements: Option<String>,
    pub province: String,
    pub city: String,
    pub district: String,
    pub company_name: String,
    pub company_industry: Option<String>,
    pub company_size: String,
    /// Raw "posted X ago" phrase with the site's leading word stripped.
    pub last_post: String,
    /// Absolute post time derived from `last_post`; `None` when the phrase
    /// used an unrecognized unit word.
    #[serde(with = "opt_timestamp")]
    pub post_time: Option<NaiveDateTime>,
    /// When this record was extracted.
    #[serde(with = "timestamp")]
    pub obtained: NaiveDateTime,
    pub url: String,
}

pub mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(de)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

pub mod opt_timestamp {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// An absent timestamp must stay a real `None` in the serialized view:
    /// the warehouse upload needs a JSON `null` for a nullable TIMESTAMP
    /// column (the CSV writer still renders it as an empty field).
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => ser.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string()),
            None => ser.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(de)?;
        let raw = match raw {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn timestamps_round_trip_at_second_precision() {
        #[derive(Serialize, Deserialize)]
        struct Row {
            #[serde(with = "timestamp")]
            obtained: NaiveDateTime,
            #[serde(with = "opt_timestamp")]
            post_time: Option<NaiveDateTime>,
        }

        let row = Row {
            obtained: NaiveDate::from_ymd_opt(2025, 3, 14)
                .unwrap()
                .and_hms_opt(9, 26, 53)
                .unwrap(),
            post_time: None,
        };
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("2025-03-14 09:26:53"));

        let back: Row = serde_json::from_str(&json).unwrap();
        assert_eq!(back.obtained, ts("2025-03-14 09:26:53"));
        assert_eq!(back.post_time, None);
    }

    // The streaming insert sends records in their serde JSON view; a missing
    // post time has to reach the nullable TIMESTAMP column as null, not as
    // an empty string BigQuery would reject.
    #[test]
    fn missing_post_time_serializes_as_null() {
        let record = JobRecord {
            job_name: "Data Scientist".to_string(),
            job_type: "Full-Time".to_string(),
            salary_range: "Unspecified".to_string(),
            salary_min: None,
            salary_max: None,
            skills_requirements: Some("Python".to_string()),
            education_requirements: "No Requirement".to_string(),
            experience_requirements: "No Requirement".to_string(),
            another_requirements: None,
            province: "Unspecified".to_string(),
            city: "Unspecified".to_string(),
            district: "Unspecified".to_string(),
            company_name: "Unspecified".to_string(),
            company_industry: None,
            company_size: "Unspecified".to_string(),
            last_post: "2 minggu yang lalu".to_string(),
            post_time: None,
            obtained: ts("2025-03-14 09:26:53"),
            url: "https://glints.com/id/opportunities/jobs/x".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["post_time"], serde_json::Value::Null);
        assert_eq!(value["obtained"], "2025-03-14 09:26:53");
    }
}
