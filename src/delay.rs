use log::info;
use rand::Rng;

/// Randomized pause before every page fetch to reduce rate-limiting risk.
pub fn random_page_delay() {
    let mut rng = rand::thread_rng();
    let delay_secs = rng.gen_range(1..=5);
    info!("Waiting for {} seconds (Page Delay)...", delay_secs);
    sleep_secs(delay_secs);
}

/// Longer randomized pause inserted before each extraction batch.
pub fn random_batch_delay() {
    let mut rng = rand::thread_rng();
    let delay_secs = rng.gen_range(3..=8);
    info!("Waiting for {} seconds (Batch Delay)...", delay_secs);
    sleep_secs(delay_secs);
}

#[cfg(not(test))]
fn sleep_secs(secs: u64) {
    std::thread::sleep(std::time::Duration::from_secs(secs));
}

// Unit tests exercise the batch loop directly; they must not wait out the
// real anti-rate-limit pauses.
#[cfg(test)]
fn sleep_secs(_secs: u64) {}
