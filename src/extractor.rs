use crate::delay;
use crate::model::JobRecord;
use crate::selectors::DetailSelectors;
use crate::session::Session;
use chrono::{Duration, Months, NaiveDateTime, Timelike};
use log::warn;
use regex::Regex;
use scraper::{Html, Selector};

pub const BASE_URL: &str = "https://glints.com";

/// Listing pages prefix the posted-ago phrase with this word.
const POSTED_PREFIX: &str = "Tayang ";

/// Fetches one detail page and extracts a [`JobRecord`] from it.
///
/// `None` means "skip this reference": the page-ready wait timed out or the
/// page source could not be read. Once the page is in hand, extraction itself
/// cannot fail - every field falls back to an explicit default.
pub fn extract_job_details(
    session: &Session,
    selectors: &DetailSelectors,
    reference: &str,
) -> Option<JobRecord> {
    let url = format!("{}{}", BASE_URL, reference);

    delay::random_page_delay();

    let result = session
        .navigate(&url)
        .and_then(|_| session.wait_for(selectors.title))
        .and_then(|_| session.content());

    let html = match result {
        Ok(html) => html,
        Err(e) => {
            warn!("Skipping {}: {:#}", url, e);
            return None;
        }
    };

    let now = chrono::Local::now().naive_local();
    Some(parse_detail(&html, selectors, &url, now))
}

/// Parses every field of a rendered detail page. Absent optional fields get
/// their documented defaults and never abort the record.
pub fn parse_detail(
    html: &str,
    selectors: &DetailSelectors,
    url: &str,
    now: NaiveDateTime,
) -> JobRecord {
    let document = Html::parse_document(html);

    let salary_range =
        select_text(&document, selectors.salary).unwrap_or_else(|| "Unspecified".to_string());
    let (salary_min, salary_max) = match parse_salary_range(&salary_range) {
        Some((min, max)) => (Some(min), Some(max)),
        None => (None, None),
    };

    let last_post = select_text(&document, selectors.posted_at)
        .map(|text| text.trim_start_matches(POSTED_PREFIX).to_string())
        .unwrap_or_default();

    JobRecord {
        job_name: select_text(&document, selectors.title)
            .unwrap_or_else(|| "No Title".to_string()),
        job_type: select_text(&document, selectors.job_type)
            .unwrap_or_else(|| "Unspecified".to_string()),
        salary_range,
        salary_min,
        salary_max,
        skills_requirements: skills(&document, selectors),
        education_requirements: select_text(&document, selectors.education)
            .unwrap_or_else(|| "No Requirement".to_string()),
        experience_requirements: select_text(&document, selectors.experience)
            .unwrap_or_else(|| "No Requirement".to_string()),
        another_requirements: extra_requirements(&document, selectors),
        province: select_text(&document, selectors.province)
            .unwrap_or_else(|| "Unspecified".to_string()),
        city: select_text(&document, selectors.city).unwrap_or_else(|| "Unspecified".to_string()),
        district: select_text(&document, selectors.district)
            .unwrap_or_else(|| "Unspecified".to_string()),
        company_name: select_text(&document, selectors.company_name)
            .unwrap_or_else(|| "Unspecified".to_string()),
        company_industry: select_text(&document, selectors.company_industry),
        company_size: select_text(&document, selectors.company_size)
            .unwrap_or_else(|| "Unspecified".to_string()),
        post_time: parse_posted_at(&last_post, now),
        last_post,
        obtained: now,
        url: url.to_string(),
    }
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Ordered skill list rendered as a comma-delimited string; `None` when the
/// skills container is absent or empty.
fn skills(document: &Html, selectors: &DetailSelectors) -> Option<String> {
    let container_sel = Selector::parse(selectors.skills_container).ok()?;
    let span_sel = Selector::parse("span").ok()?;

    let container = document.select(&container_sel).next()?;
    let list: Vec<String> = container
        .select(&span_sel)
        .map(|span| span.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if list.is_empty() {
        None
    } else {
        Some(list.join(", "))
    }
}

/// Free-text requirement tags. The first three tags repeat the education,
/// experience and job-type values already captured above, so only the rest
/// count as "other requirements".
fn extra_requirements(document: &Html, selectors: &DetailSelectors) -> Option<String> {
    let tag_sel = Selector::parse(selectors.requirement_tag).ok()?;

    let tags: Vec<String> = document
        .select(&tag_sel)
        .map(|tag| tag.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    if tags.len() > 3 {
        Some(tags[3..].join(", "))
    } else {
        None
    }
}

/// Derives numeric salary bounds from an `IDR<min> - <max>/Bulan` range.
/// Thousands separators (dots) are stripped before parsing. Anything that is
/// not a two-number range yields `None` - "unspecified" is not zero.
pub fn parse_salary_range(raw: &str) -> Option<(f64, f64)> {
    let re = Regex::new(r"IDR([\d\.]+)\s*-\s*([\d\.]+)").ok()?;
    let caps = re.captures(raw)?;
    let min = caps.get(1)?.as_str().replace('.', "").parse::<f64>().ok()?;
    let max = caps.get(2)?.as_str().replace('.', "").parse::<f64>().ok()?;
    Some((min, max))
}

/// Converts a relative "posted X ago" phrase (Indonesian locale) into an
/// absolute timestamp at second precision.
///
/// menit -> minutes, jam -> hours, kemarin -> exactly one day, hari -> days,
/// bulan -> calendar months, tahun -> calendar years. An unrecognized unit
/// word yields `None`, which propagates downstream as an absent post time.
pub fn parse_posted_at(phrase: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let now = now.with_nanosecond(0)?;
    let lower = phrase.to_lowercase();
    let leading_number = || -> Option<i64> { phrase.split_whitespace().next()?.parse().ok() };

    if lower.contains("menit") {
        Some(now - Duration::minutes(leading_number()?))
    } else if lower.contains("jam") {
        Some(now - Duration::hours(leading_number()?))
    } else if lower.contains("kemarin") {
        Some(now - Duration::days(1))
    } else if lower.contains("hari") {
        Some(now - Duration::days(leading_number()?))
    } else if lower.contains("bulan") {
        now.checked_sub_months(Months::new(u32::try_from(leading_number()?).ok()?))
    } else if lower.contains("tahun") {
        now.checked_sub_months(Months::new(u32::try_from(leading_number()?).ok()?.checked_mul(12)?))
    } else {
        None
    }
}
