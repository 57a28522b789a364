use crate::delay;
use crate::selectors::ListingSelectors;
use crate::session::Session;
use log::{info, warn};
use scraper::{Html, Selector};

/// Collects job-detail references for `keyword` across all accessible result
/// pages, in page order.
///
/// Page 1 failing to load yields an empty result. A later page failing to
/// load is skipped and pagination continues. An absent or unparsable
/// pagination control returns whatever was accumulated so far.
pub fn collect_job_links(
    session: &Session,
    selectors: &ListingSelectors,
    keyword: &str,
    page_limit: Option<usize>,
) -> Vec<String> {
    info!("Analyzing job market for: {} ...", keyword);

    let first_page = match request_page(session, selectors, keyword, 1) {
        Some(html) => html,
        None => {
            warn!(
                "No matches found for '{}', or the first page failed to load.",
                keyword
            );
            return Vec::new();
        }
    };

    let mut links = listing_links(&first_page, selectors);
    info!("Found {} job listings on the first page.", links.len());

    let last_page = match last_page_number(&first_page, selectors) {
        Some(n) => n,
        None => {
            info!("Single result page; retrieved {} job listings.", links.len());
            return links;
        }
    };

    let max_page = pages_to_fetch(last_page, page_limit);
    info!(
        "Discovered {} pages of job listings, capping the process at {} pages.",
        last_page, max_page
    );

    for page_num in 2..=max_page {
        match request_page(session, selectors, keyword, page_num) {
            Some(html) => links.extend(listing_links(&html, selectors)),
            // A failed page is simply absent from the result.
            None => continue,
        }
    }

    info!("Successfully gathered {} job listings.", links.len());
    links
}

/// Navigates to one result page and returns its rendered HTML, or `None` on
/// timeout or navigation error.
fn request_page(
    session: &Session,
    selectors: &ListingSelectors,
    keyword: &str,
    page_num: usize,
) -> Option<String> {
    delay::random_page_delay();

    let url = format!(
        "https://glints.com/id/opportunities/jobs/explore?keyword={}&country=ID&locationName=All+Cities%2FProvinces&lowestLocationLevel=1&page={}",
        urlencoding::encode(keyword),
        page_num
    );

    let result = session
        .navigate(&url)
        .and_then(|_| session.wait_for(selectors.ready))
        .and_then(|_| session.content());

    match result {
        Ok(html) => Some(html),
        Err(e) => {
            warn!(
                "Failed to load page {} for '{}': {:#}. Skipping...",
                page_num, keyword, e
            );
            None
        }
    }
}

/// Extracts the detail-page references from one rendered listing page.
pub fn listing_links(html: &str, selectors: &ListingSelectors) -> Vec<String> {
    let document = Html::parse_document(html);
    let (card_sel, link_sel) = match (
        Selector::parse(selectors.job_card),
        Selector::parse(selectors.job_link),
    ) {
        (Ok(c), Ok(l)) => (c, l),
        _ => {
            warn!("Invalid listing selector configuration.");
            return Vec::new();
        }
    };

    document
        .select(&card_sel)
        .filter_map(|card| card.select(&link_sel).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Reads the highest page number advertised by the pagination control.
///
/// `None` when the control is absent (single-page result) or when its text
/// does not parse as a number (upstream markup drift; the caller keeps what
/// it already collected).
pub fn last_page_number(html: &str, selectors: &ListingSelectors) -> Option<usize> {
    let document = Html::parse_document(html);
    let button_sel = Selector::parse(selectors.page_button).ok()?;

    let last_button = document.select(&button_sel).last()?;
    let text = last_button.text().collect::<String>();
    match text.trim().parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("Error parsing pagination control '{}': {}", text.trim(), e);
            None
        }
    }
}

/// Clamps the discovered page count to the caller-supplied cap. A cap below 1
/// is treated as 1; no cap means every discovered page.
pub fn pages_to_fetch(last_page: usize, page_limit: Option<usize>) -> usize {
    match page_limit {
        Some(limit) => limit.max(1).min(last_page),
        None => last_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_CLASS: &str = "JobCardsc__JobcardContainer-sc-hmqj50-0 iirqVR CompactOpportunityCardsc__CompactJobCardWrapper-sc-dkg8my-5 hRilQl";
    const LINK_CLASS: &str =
        "CompactOpportunityCardsc__JobCardTitleNoStyleAnchor-sc-dkg8my-12 jHptbP";
    const BUTTON_CLASS: &str =
        "UnstyledButton-sc-zp0cw8-0 AnchorPaginationsc__Number-sc-8wke03-3 dYSdtB bkvUQn";

    fn listing_page(hrefs: &[&str], page_buttons: &[&str]) -> String {
        let cards: String = hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<div class="{CARD_CLASS}"><a class="{LINK_CLASS}" href="{href}">Job</a></div>"#
                )
            })
            .collect();
        let buttons: String = page_buttons
            .iter()
            .map(|label| format!(r#"<button class="{BUTTON_CLASS}">{label}</button>"#))
            .collect();
        format!("<html><body><div id=\"__next\">{cards}{buttons}</div></body></html>")
    }

    #[test]
    fn extracts_links_in_page_order() {
        let html = listing_page(&["/id/opportunities/jobs/a-1", "/id/opportunities/jobs/b-2"], &[]);
        let links = listing_links(&html, &ListingSelectors::default());
        assert_eq!(
            links,
            vec!["/id/opportunities/jobs/a-1", "/id/opportunities/jobs/b-2"]
        );
    }

    #[test]
    fn cards_without_anchor_are_skipped() {
        let html = format!(
            "<html><body><div class=\"{CARD_CLASS}\">no link here</div></body></html>"
        );
        assert!(listing_links(&html, &ListingSelectors::default()).is_empty());
    }

    #[test]
    fn reads_highest_advertised_page() {
        let html = listing_page(&[], &["1", "2", "10"]);
        assert_eq!(last_page_number(&html, &ListingSelectors::default()), Some(10));
    }

    #[test]
    fn missing_pagination_control_means_single_page() {
        let html = listing_page(&["/id/opportunities/jobs/a-1"], &[]);
        assert_eq!(last_page_number(&html, &ListingSelectors::default()), None);
    }

    #[test]
    fn unparsable_pagination_text_is_none() {
        let html = listing_page(&[], &["1", "..."]);
        assert_eq!(last_page_number(&html, &ListingSelectors::default()), None);
    }

    #[test]
    fn cap_clamps_discovered_page_count() {
        assert_eq!(pages_to_fetch(10, Some(3)), 3);
        assert_eq!(pages_to_fetch(10, None), 10);
        assert_eq!(pages_to_fetch(2, Some(5)), 2);
        assert_eq!(pages_to_fetch(10, Some(0)), 1);
    }
}
