use crate::model::JobRecord;
use anyhow::{bail, Context, Result};
use gcp_bigquery_client::model::table::Table;
use gcp_bigquery_client::model::table_data_insert_all_request::TableDataInsertAllRequest;
use gcp_bigquery_client::model::table_field_schema::TableFieldSchema;
use gcp_bigquery_client::model::table_schema::TableSchema;
use gcp_bigquery_client::Client;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

const JOBS_TABLE: &str = "Glints";
const SKILLS_TABLE: &str = "Skills";

/// Streaming inserts are capped well below the API's request limits.
const INSERT_CHUNK: usize = 500;

/// One row of the derived skills-frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: u64,
}

/// Splits the delimited skills field of every record, trims the tokens and
/// counts occurrences across all rows, descending by count (ties broken
/// alphabetically for a stable output).
pub fn skill_frequencies(records: &[JobRecord]) -> Vec<SkillCount> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        let Some(skills) = record.skills_requirements.as_deref() else {
            continue;
        };
        for token in skills.split(',') {
            let token = token.trim();
            if !token.is_empty() {
                *counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut frequencies: Vec<SkillCount> = counts
        .into_iter()
        .map(|(skill, count)| SkillCount { skill, count })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.skill.cmp(&b.skill)));
    frequencies
}

/// Uploads the cleaned dataset as `{dataset}.Glints` and the derived
/// skills-frequency table as `{dataset}.Skills`, replacing any existing
/// destination tables. Upload failures are not retried; they propagate to
/// the caller.
pub fn upload(
    records: &[JobRecord],
    project_id: &str,
    dataset_id: &str,
    key_path: &Path,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start upload runtime")?;
    runtime.block_on(upload_inner(records, project_id, dataset_id, key_path))
}

async fn upload_inner(
    records: &[JobRecord],
    project_id: &str,
    dataset_id: &str,
    key_path: &Path,
) -> Result<()> {
    let key_file = key_path
        .to_str()
        .context("service-account key path is not valid UTF-8")?;
    let client = Client::from_service_account_key_file(key_file)
        .await
        .context("failed to authenticate against BigQuery")?;

    replace_table(&client, project_id, dataset_id, JOBS_TABLE, jobs_schema(), records).await?;

    let skills = skill_frequencies(records);
    replace_table(&client, project_id, dataset_id, SKILLS_TABLE, skills_schema(), &skills).await?;

    Ok(())
}

/// Full-overwrite semantics: drop the old table if there is one, recreate it
/// with an explicit schema, then stream the rows in.
async fn replace_table<T: Serialize>(
    client: &Client,
    project_id: &str,
    dataset_id: &str,
    table_name: &str,
    schema: TableSchema,
    rows: &[T],
) -> Result<()> {
    if let Err(e) = client.table().delete(project_id, dataset_id, table_name).await {
        debug!("Delete of {}.{} skipped: {}", dataset_id, table_name, e);
    }

    client
        .table()
        .create(Table::new(project_id, dataset_id, table_name, schema))
        .await
        .with_context(|| format!("failed to create table {}.{}", dataset_id, table_name))?;

    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut request = TableDataInsertAllRequest::new();
        for row in chunk {
            request.add_row(None, row)?;
        }

        let response = client
            .tabledata()
            .insert_all(project_id, dataset_id, table_name, request)
            .await
            .with_context(|| format!("failed to insert into {}.{}", dataset_id, table_name))?;

        if let Some(errors) = response.insert_errors {
            if !errors.is_empty() {
                bail!(
                    "BigQuery rejected {} rows for {}.{}",
                    errors.len(),
                    dataset_id,
                    table_name
                );
            }
        }
    }

    info!("Table {} uploaded successfully!", table_name);
    Ok(())
}

fn jobs_schema() -> TableSchema {
    TableSchema::new(vec![
        TableFieldSchema::string("job_name"),
        TableFieldSchema::string("job_type"),
        TableFieldSchema::string("salary_range"),
        TableFieldSchema::float("salary_min"),
        TableFieldSchema::float("salary_max"),
        TableFieldSchema::string("skills_requirements"),
        TableFieldSchema::string("education_requirements"),
        TableFieldSchema::string("experience_requirements"),
        TableFieldSchema::string("another_requirements"),
        TableFieldSchema::string("province"),
        TableFieldSchema::string("city"),
        TableFieldSchema::string("district"),
        TableFieldSchema::string("company_name"),
        TableFieldSchema::string("company_industry"),
        TableFieldSchema::string("company_size"),
        TableFieldSchema::string("last_post"),
        TableFieldSchema::timestamp("post_time"),
        TableFieldSchema::timestamp("obtained"),
        TableFieldSchema::string("url"),
    ])
}

fn skills_schema() -> TableSchema {
    TableSchema::new(vec![
        TableFieldSchema::string("skill"),
        TableFieldSchema::integer("count"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(skills: Option<&str>) -> JobRecord {
        JobRecord {
            job_name: "Data Scientist".to_string(),
            job_type: "Full-Time".to_string(),
            salary_range: "Unspecified".to_string(),
            salary_min: Some(0.0),
            salary_max: Some(0.0),
            skills_requirements: skills.map(str::to_string),
            education_requirements: "No Requirement".to_string(),
            experience_requirements: "No Requirement".to_string(),
            another_requirements: Some("No other requirements".to_string()),
            province: "Unspecified".to_string(),
            city: "Unspecified".to_string(),
            district: "Unspecified".to_string(),
            company_name: "Unspecified".to_string(),
            company_industry: Some("Unspecified".to_string()),
            company_size: "Unspecified".to_string(),
            last_post: "kemarin".to_string(),
            post_time: None,
            obtained: NaiveDate::from_ymd_opt(2025, 3, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            url: "u".to_string(),
        }
    }

    #[test]
    fn counts_tokens_across_rows_descending() {
        let records = vec![
            record(Some("Python, SQL , Machine Learning")),
            record(Some("Python,SQL")),
            record(Some("Python")),
            record(None),
        ];

        let freqs = skill_frequencies(&records);
        assert_eq!(
            freqs,
            vec![
                SkillCount { skill: "Python".to_string(), count: 3 },
                SkillCount { skill: "SQL".to_string(), count: 2 },
                SkillCount { skill: "Machine Learning".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn empty_tokens_are_ignored() {
        let records = vec![record(Some("Python, , ,SQL"))];
        let freqs = skill_frequencies(&records);
        assert_eq!(freqs.len(), 2);
    }
}
