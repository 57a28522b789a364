use crate::model::JobRecord;
use log::info;
use regex::Regex;

/// Sentinel assigned by extraction when the salary element is absent.
const UNSPECIFIED: &str = "Unspecified";
const NO_OTHER_REQUIREMENTS: &str = "No other requirements";

/// Keywords anchoring the relevance filter to the data-science job domain.
/// Matching is case-insensitive exact substring over title and skills.
pub const RELEVANCE_KEYWORDS: [&str; 7] = [
    "data",
    "scientist",
    "machine learning",
    "big data",
    "modeling",
    "analyst",
    "analis",
];

/// Columns that can carry missing values after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    SkillsRequirements,
    SalaryMin,
    SalaryMax,
    AnotherRequirements,
    CompanyIndustry,
}

impl Column {
    fn name(self) -> &'static str {
        match self {
            Column::SkillsRequirements => "skills_requirements",
            Column::SalaryMin => "salary_min",
            Column::SalaryMax => "salary_max",
            Column::AnotherRequirements => "another_requirements",
            Column::CompanyIndustry => "company_industry",
        }
    }
}

pub struct Cleaner {
    single_salary: Regex,
    keywords: Vec<String>,
}

impl Cleaner {
    pub fn new() -> Self {
        Cleaner::with_keywords(&RELEVANCE_KEYWORDS)
    }

    pub fn with_keywords(keywords: &[&str]) -> Self {
        Cleaner {
            // A salary with a single value instead of a range, e.g.
            // "IDR4.000.000/Bulan".
            single_salary: Regex::new(r"IDR([\d\.]+)/Bulan").expect("single-salary regex"),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Full cleaning pass: null handling followed by relevance filtering.
    /// Running it twice over the same data is a no-op.
    pub fn clean(&self, records: Vec<JobRecord>) -> Vec<JobRecord> {
        let columns = columns_with_missing(&records);
        let records = self.clean_missing(records, &columns);
        self.filter_relevant(records)
    }

    /// Applies the per-column null rules, only for columns that actually
    /// contain missing values.
    pub fn clean_missing(&self, records: Vec<JobRecord>, columns: &[Column]) -> Vec<JobRecord> {
        let mut records = records;
        for column in columns {
            records = match column {
                // Skills are mandatory for relevance; a row without them is
                // useless downstream.
                Column::SkillsRequirements => records
                    .into_iter()
                    .filter(|r| r.skills_requirements.is_some())
                    .collect(),
                Column::SalaryMin => {
                    for record in &mut records {
                        if record.salary_min.is_none() {
                            record.salary_min = self.recovered_salary(&record.salary_range);
                        }
                    }
                    records
                }
                Column::SalaryMax => {
                    for record in &mut records {
                        if record.salary_max.is_none() {
                            record.salary_max = self.recovered_salary(&record.salary_range);
                        }
                    }
                    records
                }
                Column::AnotherRequirements => {
                    for record in &mut records {
                        if record.another_requirements.is_none() {
                            record.another_requirements = Some(NO_OTHER_REQUIREMENTS.to_string());
                        }
                    }
                    records
                }
                Column::CompanyIndustry => {
                    for record in &mut records {
                        if record.company_industry.is_none() {
                            record.company_industry = Some(UNSPECIFIED.to_string());
                        }
                    }
                    records
                }
            };
        }
        records
    }

    /// Missing salary bound: zero for the "Unspecified" sentinel, otherwise
    /// the single absolute value recovered from the raw text (used as both
    /// bounds). Stays `None` when neither applies.
    fn recovered_salary(&self, salary_range: &str) -> Option<f64> {
        if salary_range == UNSPECIFIED {
            return Some(0.0);
        }
        let caps = self.single_salary.captures(salary_range)?;
        caps.get(1)?.as_str().replace('.', "").parse::<f64>().ok()
    }

    /// Keeps only rows whose title or skills text contains at least one
    /// relevance keyword (case-insensitive exact substring, no fuzzing).
    pub fn filter_relevant(&self, records: Vec<JobRecord>) -> Vec<JobRecord> {
        let kept: Vec<JobRecord> = records
            .into_iter()
            .filter(|record| {
                let title = record.job_name.to_lowercase();
                let skills = record
                    .skills_requirements
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase();
                self.keywords
                    .iter()
                    .any(|k| title.contains(k) || skills.contains(k))
            })
            .collect();
        info!("Relevance filter kept {} rows.", kept.len());
        kept
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Cleaner::new()
    }
}

/// Reports which columns contain missing values, with counts, mirroring the
/// pre-clean audit of the dataset.
pub fn columns_with_missing(records: &[JobRecord]) -> Vec<Column> {
    let counts = [
        (
            Column::SkillsRequirements,
            records.iter().filter(|r| r.skills_requirements.is_none()).count(),
        ),
        (
            Column::SalaryMin,
            records.iter().filter(|r| r.salary_min.is_none()).count(),
        ),
        (
            Column::SalaryMax,
            records.iter().filter(|r| r.salary_max.is_none()).count(),
        ),
        (
            Column::AnotherRequirements,
            records.iter().filter(|r| r.another_requirements.is_none()).count(),
        ),
        (
            Column::CompanyIndustry,
            records.iter().filter(|r| r.company_industry.is_none()).count(),
        ),
    ];

    let missing: Vec<Column> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(column, _)| *column)
        .collect();

    if missing.is_empty() {
        info!("No missing values detected.");
    } else {
        for (column, count) in counts.iter().filter(|(_, c)| *c > 0) {
            info!("Column '{}' has {} missing values.", column.name(), count);
        }
    }
    missing
}
