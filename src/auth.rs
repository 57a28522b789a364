use crate::selectors::LoginSelectors;
use crate::session::Session;
use anyhow::Result;
use log::{info, warn};

const LOGIN_URL: &str = "https://glints.com/id/login";

/// Drives the scripted email-login flow once.
///
/// Returns `true` only when the post-login profile menu appears. Every
/// failure mode - a step timing out, the indicator never showing up, anything
/// unexpected - is reported as `false` and never propagated. No retry.
pub fn login(session: &Session, selectors: &LoginSelectors, email: &str, password: &str) -> bool {
    match try_login(session, selectors, email, password) {
        Ok(()) => {
            info!("Login confirmed: profile menu is visible.");
            true
        }
        Err(e) => {
            warn!("Login failed: {:#}", e);
            false
        }
    }
}

fn try_login(
    session: &Session,
    selectors: &LoginSelectors,
    email: &str,
    password: &str,
) -> Result<()> {
    info!("Opening login page...");
    session.navigate(LOGIN_URL)?;

    session.click(selectors.email_option)?;
    session.type_into(selectors.email_field, email)?;
    session.type_into(selectors.password_field, password)?;
    session.click(selectors.submit_button)?;

    // The profile menu is the only reliable signal that the credentials were
    // accepted; the form itself stays on the page on rejection.
    session.wait_for(selectors.profile_menu)?;
    Ok(())
}
