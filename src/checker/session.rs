//! The checker's form flow as a chain of states.
//!
//! `Session::bootstrap` → `Bootstrapped::lookup` → `LookedUp::confirm` →
//! `Confirmed::extract`. Each step consumes the previous state, so the token
//! and cookie jar can only be used in order and only within one lookup.

use super::parse;
use super::types::{ChargeDetermination, VehicleRecord};
use crate::config::CheckerConfig;
use crate::error::{CheckerError, Result};
use reqwest::header::REFERER;
use std::time::Duration;
use tracing::{debug, info};

/// A fresh HTTP session with its own cookie jar
pub struct Session {
    client: reqwest::Client,
    config: CheckerConfig,
}

/// Entry page fetched, anti-forgery token in hand
pub struct Bootstrapped {
    session: Session,
    token: String,
}

/// Result of submitting the registration form
pub enum Lookup {
    NotFound,
    Found(LookedUp),
}

/// Vehicle found; details read from the lookup page
pub struct LookedUp {
    session: Session,
    token: String,
    pub vehicle: VehicleRecord,
}

/// Details confirmed; holds the results page
pub struct Confirmed {
    config: CheckerConfig,
    pub vehicle: VehicleRecord,
    page: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub vehicle: VehicleRecord,
    pub charged: ChargeDetermination,
}

impl Session {
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Fetch the entry page and read the csrf token from its head
    pub async fn bootstrap(self) -> Result<Bootstrapped> {
        let url = self.config.entry_url();
        debug!(%url, "fetching checker entry page");

        let page = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let token = parse::extract_token(&page).ok_or(CheckerError::TokenNotFound)?;
        debug!("anti-forgery token acquired");

        Ok(Bootstrapped {
            session: self,
            token,
        })
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<String> {
        let page = self
            .client
            .post(url)
            .header(REFERER, self.config.entry_url())
            .form(form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(page)
    }
}

impl Bootstrapped {
    /// Submit the registration. A not-found page ends the flow here.
    pub async fn lookup(self, vrn: &str) -> Result<Lookup> {
        let url = self.session.config.entry_url();
        let page = self
            .session
            .post_form(
                &url,
                &[
                    ("vrn", vrn),
                    ("registration-country", "UK"),
                    ("commit", "Continue"),
                    ("authenticity_token", self.token.as_str()),
                ],
            )
            .await?;

        if parse::is_not_found(&page) {
            info!(vrn, "vehicle not found by checker");
            return Ok(Lookup::NotFound);
        }

        let vehicle = parse::extract_vehicle(&page);
        debug!(attributes = vehicle.len(), "vehicle details read");

        Ok(Lookup::Found(LookedUp {
            session: self.session,
            token: self.token,
            vehicle,
        }))
    }
}

impl LookedUp {
    /// Confirm the details as shown and fetch the results page
    pub async fn confirm(self) -> Result<Confirmed> {
        let url = self.session.config.confirm_url();
        let page = self
            .session
            .post_form(
                &url,
                &[
                    ("authenticity_token", self.token.as_str()),
                    ("confirm_details_form[undetermined]", "false"),
                    ("confirm_details_form[taxi_and_correct_type]", "true"),
                    ("confirm_details_form[confirm_details]", "yes"),
                    ("confirm_details_form[confirm_taxi_or_phv]", "false"),
                    ("commit", "Confirm"),
                ],
            )
            .await?;

        Ok(Confirmed {
            config: self.session.config,
            vehicle: self.vehicle,
            page,
        })
    }
}

impl Confirmed {
    pub fn extract(self) -> Extracted {
        let charged = parse::determine_charge(&self.page, &self.config);
        Extracted {
            vehicle: self.vehicle,
            charged,
        }
    }
}
