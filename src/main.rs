use anyhow::{bail, Result};
use glints_harvest_lib::{auth, batch, extractor, logger, paginator, snapshot, warehouse};
use glints_harvest_lib::{AppConfig, Cleaner, SelectorSet, Session};
use log::{error, info};

const CREDENTIALS_FILE: &str = "privacy/.env";
const SNAPSHOT_FILE: &str = "data/Glints_RAW.csv";

const SEARCH_TERM: &str = "Data Scientist";
/// Optional cap on result pages; `None` walks every discovered page.
const PAGE_LIMIT: Option<usize> = None;
const BATCH_SIZE: usize = 50;

fn main() {
    logger::init();
    info!("Starting Glints harvest...");

    match run() {
        Ok(()) => info!("Harvest completed."),
        Err(e) => error!("Harvest aborted: {:#}", e),
    }
}

fn run() -> Result<()> {
    let config = AppConfig::load(CREDENTIALS_FILE)?;
    let selectors = SelectorSet::default();

    let session = Session::launch()?;
    let outcome = harvest(&config, &selectors, &session);

    // The browser process dies with the session handle; dropping it here
    // keeps teardown on the success and failure paths alike.
    drop(session);
    info!("Browser session terminated.");

    outcome
}

fn harvest(config: &AppConfig, selectors: &SelectorSet, session: &Session) -> Result<()> {
    if !auth::login(
        session,
        &selectors.login,
        &config.glints_email,
        &config.glints_password,
    ) {
        bail!("login failed");
    }
    info!("Login success!");

    let links = paginator::collect_job_links(session, &selectors.listing, SEARCH_TERM, PAGE_LIMIT);
    info!("Total jobs found: {}", links.len());
    if links.is_empty() {
        bail!("no job listings found for '{}'", SEARCH_TERM);
    }

    let raw_records = batch::run_batches(&links, BATCH_SIZE, |link| {
        extractor::extract_job_details(session, &selectors.detail, link)
    });
    if raw_records.is_empty() {
        bail!("no job details extracted");
    }

    snapshot::save(SNAPSHOT_FILE, &raw_records)?;
    // Reload the snapshot so the cleaning stage always sees the same typed
    // view a later offline run would get.
    let raw_records = snapshot::load(SNAPSHOT_FILE)?;

    info!("Cleaning RAW data...");
    let cleaned = Cleaner::new().clean(raw_records);
    info!("{} relevant rows after cleaning.", cleaned.len());

    if cleaned.is_empty() {
        info!("Nothing to upload.");
        return Ok(());
    }

    info!("Uploading to Google BigQuery...");
    warehouse::upload(
        &cleaned,
        &config.project_id,
        &config.dataset_id,
        &config.key_path(),
    )?;

    Ok(())
}
