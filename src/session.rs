use anyhow::{Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsString;
use std::sync::Arc;
use std::time::Duration;

/// Bounded wait applied to every element lookup.
pub const ELEMENT_WAIT: Duration = Duration::from_secs(15);

const USER_AGENT_ARG: &str = "--user-agent=Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:91.0) \
     Gecko/20100101 Firefox/91.0";

/// One owned headless-browser session with a single logical current page.
///
/// Callers must complete a full navigate -> wait -> read cycle before the next
/// navigation; the session does nothing to enforce that itself. The underlying
/// browser process is killed when the session is dropped, which covers error
/// returns and panic unwinds alike.
pub struct Session {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl Session {
    pub fn launch() -> Result<Self> {
        let user_agent = OsString::from(USER_AGENT_ARG);
        let no_automation = OsString::from("--disable-blink-features=AutomationControlled");

        let browser = Browser::new(LaunchOptions {
            headless: true,
            args: vec![&user_agent, &no_automation],
            ..Default::default()
        })
        .context("failed to launch headless browser")?;

        let tab = browser.new_tab().context("failed to open browser tab")?;

        Ok(Session {
            _browser: browser,
            tab,
        })
    }

    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }

    /// Waits up to [`ELEMENT_WAIT`] for `selector` to appear on the current page.
    pub fn wait_for(&self, selector: &str) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, ELEMENT_WAIT)
            .with_context(|| format!("timed out waiting for '{}'", selector))?;
        Ok(())
    }

    /// Waits for `selector`, then clicks it.
    pub fn click(&self, selector: &str) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, ELEMENT_WAIT)
            .with_context(|| format!("timed out waiting for '{}'", selector))?
            .click()?;
        Ok(())
    }

    /// Waits for `selector`, focuses it by clicking, then types `text` into it.
    pub fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, ELEMENT_WAIT)
            .with_context(|| format!("timed out waiting for '{}'", selector))?
            .click()?;
        self.tab.type_str(text)?;
        Ok(())
    }

    /// Returns the rendered HTML of the current page.
    pub fn content(&self) -> Result<String> {
        self.tab.get_content().context("failed to read page source")
    }
}
