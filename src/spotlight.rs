//! Spotlight: a small random pick of Silver and Gold members.

use crate::config::Config;
use crate::context::{Container, RenderContext};
use crate::directory::LogoOptions;
use crate::error::Error;
use crate::format::{ensure_protocol, format_phone, phone_digits};
use crate::markup::Element;
use crate::types::Member;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const LOADING_MESSAGE: &str = "Loading featured businesses...";
pub const NO_MEMBERS_MESSAGE: &str = "No qualified members available for spotlight at this time.";
pub const ERROR_HEADING: &str = "Unable to Load Featured Businesses";
pub const RELOAD_ANNOUNCEMENT: &str = "Reloading featured businesses...";
pub const RETRY_BUTTON_ID: &str = "spotlightRetry";

/// Shuffle `qualifying` uniformly and keep a prefix of
/// `min(max, max(min, len))` items. With fewer candidates than `min`, every
/// candidate is kept.
pub fn select_spotlight<T: Clone, R: Rng + ?Sized>(
    qualifying: &[T],
    min: usize,
    max: usize,
    rng: &mut R,
) -> Vec<T> {
    let mut pool = qualifying.to_vec();
    pool.shuffle(rng);
    let count = max.min(min.max(pool.len()));
    pool.truncate(count);
    pool
}

/// Members eligible for the spotlight, in document order
pub fn qualifying_members(members: &[Member]) -> Vec<Member> {
    members
        .iter()
        .filter(|m| m.tier.qualifies_for_spotlight())
        .cloned()
        .collect()
}

/// Timing of the staggered card reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotlightSchedule {
    pub cards: usize,
    pub stagger: Duration,
    pub settle: Duration,
}

impl SpotlightSchedule {
    /// When card `index` appears, relative to the start of the reveal
    pub fn card_delay(&self, index: usize) -> Duration {
        self.stagger * index as u32
    }

    /// When the region counts as fully loaded
    pub fn completes_after(&self) -> Duration {
        self.stagger * self.cards as u32 + self.settle
    }

    /// Screen-reader announcement made once the reveal completes
    pub fn announcement(&self) -> String {
        let noun = if self.cards == 1 { "business" } else { "businesses" };
        format!(
            "Featured businesses loaded. Showing {} {}.",
            self.cards, noun
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotlightState {
    Idle,
    Loading,
    Loaded(SpotlightSchedule),
    /// The document loaded but no member qualifies
    NoMembers,
    /// The document could not be fetched or parsed
    Failed,
}

/// Build the spotlight card for a selected member at position `index`
pub fn spotlight_card(
    member: &Member,
    index: usize,
    logos: &LogoOptions,
    schedule: &SpotlightSchedule,
) -> Element {
    let title_id = format!("spotlight-title-{}", index);
    let desc_id = format!("spotlight-desc-{}", index);
    let tier = member.tier;

    let header = Element::new("div")
        .class("spotlight-header")
        .child(logos.logo(member))
        .child(
            Element::new("div")
                .class(format!("membership {}", tier.css_class()))
                .attr("role", "text")
                .attr("aria-label", format!("{} membership level", tier.label()))
                .text(tier.badge()),
        );

    // Click-to-call only when there is something to dial
    let digits = phone_digits(&member.phone);
    let phone = if digits.is_empty() {
        Element::new("span").text(member.phone.clone())
    } else {
        Element::new("a")
            .attr("href", format!("tel:{}", digits))
            .attr("aria-label", format!("Call {}", member.name))
            .text(format_phone(&member.phone))
    };

    let contact = Element::new("div")
        .class("contact-info")
        .child(
            Element::new("p")
                .class("address")
                .child(Element::new("span").attr("aria-label", "Address").text("📍"))
                .text(" ")
                .child(Element::new("span").text(member.address.clone())),
        )
        .child(
            Element::new("p")
                .class("phone")
                .child(Element::new("span").attr("aria-label", "Phone number").text("📞"))
                .text(" ")
                .child(phone),
        )
        .child(
            Element::new("a")
                .attr("href", ensure_protocol(&member.website))
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .class("website-link")
                .attr(
                    "aria-label",
                    format!("Visit {} website (opens in new tab)", member.name),
                )
                .child(Element::new("span").attr("aria-hidden", "true").text("🌐"))
                .text(" Visit Website"),
        );

    Element::new("article")
        .class("spotlight-card")
        .attr("role", "article")
        .attr("aria-labelledby", title_id.clone())
        .attr(
            "data-delay-ms",
            schedule.card_delay(index).as_millis().to_string(),
        )
        .child(header)
        .child(
            Element::new("div")
                .class("spotlight-content")
                .child(Element::new("h3").id(title_id).text(member.name.clone()))
                .child(
                    Element::new("p")
                        .id(desc_id)
                        .class("member-description")
                        .text(member.description.clone()),
                )
                .child(contact),
        )
}

pub fn loading_placeholder() -> Element {
    Element::new("div")
        .class("loading-state")
        .attr("aria-live", "polite")
        .child(Element::new("p").text(LOADING_MESSAGE))
}

pub fn no_members_message() -> Element {
    Element::new("div")
        .class("no-members-message")
        .attr("role", "alert")
        .child(Element::new("p").text(NO_MEMBERS_MESSAGE))
        .child(Element::new("p").text("Check back soon for featured businesses!"))
}

/// Error state with a retry trigger
pub fn error_state() -> Element {
    Element::new("div")
        .class("error-message")
        .attr("role", "alert")
        .child(Element::new("h3").text(ERROR_HEADING))
        .child(
            Element::new("p")
                .text("We're experiencing technical difficulties loading our business spotlights."),
        )
        .child(
            Element::new("button")
                .id(RETRY_BUTTON_ID)
                .class("retry-button")
                .attr("type", "button")
                .attr("aria-label", "Try loading featured businesses again")
                .text("Try Again"),
        )
}

/// Loads members and renders a random spotlight subset into its container
pub struct SpotlightSelector<R = StdRng> {
    ctx: RenderContext,
    logos: LogoOptions,
    min: usize,
    max: usize,
    stagger: Duration,
    settle: Duration,
    rng: R,
    state: SpotlightState,
}

impl SpotlightSelector<StdRng> {
    /// Selector seeded from system entropy
    pub fn from_config(config: &Config) -> Self {
        Self::with_rng(Self::context_for(config), config, StdRng::from_entropy())
    }

    /// Selector with a fixed seed, for reproducible picks
    pub fn seeded(config: &Config, seed: u64) -> Self {
        Self::with_rng(Self::context_for(config), config, StdRng::seed_from_u64(seed))
    }

    fn context_for(config: &Config) -> RenderContext {
        RenderContext::new(config.spotlight_container_id.clone(), config.source.clone())
    }
}

impl<R: Rng> SpotlightSelector<R> {
    pub fn with_rng(ctx: RenderContext, config: &Config, rng: R) -> Self {
        Self {
            ctx,
            logos: LogoOptions::from_config(config),
            min: config.spotlight_min,
            max: config.spotlight_max,
            stagger: config.stagger,
            settle: config.settle,
            rng,
            state: SpotlightState::Idle,
        }
    }

    pub fn container(&self) -> &Container {
        &self.ctx.container
    }

    pub fn state(&self) -> &SpotlightState {
        &self.state
    }

    /// Put the loading placeholder in place. Runs before any fetch starts.
    pub fn begin_loading(&mut self) {
        self.ctx.container.replace_with(loading_placeholder());
        self.state = SpotlightState::Loading;
    }

    /// Fetch members and render a fresh random spotlight. Failures never
    /// propagate; they leave the error state with its retry trigger.
    pub async fn load_spotlights(&mut self) -> &SpotlightState {
        self.begin_loading();

        match self.ctx.source.fetch_members().await {
            Ok(members) => self.show(&members),
            Err(Error::Shape(reason)) => {
                tracing::warn!("Member document from {} has no member list: {}", self.ctx.source, reason);
                self.show(&[])
            }
            Err(e) => {
                tracing::error!("Failed to load spotlight data from {}: {}", self.ctx.source, e);
                self.ctx.container.replace_with(error_state());
                self.state = SpotlightState::Failed;
            }
        }
        &self.state
    }

    /// Manual retry: announce the reload, then load again from scratch
    pub async fn retry(&mut self) -> &SpotlightState {
        tracing::info!("{}", RELOAD_ANNOUNCEMENT);
        self.load_spotlights().await
    }

    /// Select and render from an already loaded member list
    pub fn show(&mut self, members: &[Member]) {
        let qualifying = qualifying_members(members);
        if qualifying.is_empty() {
            tracing::info!("No members qualify for the spotlight");
            self.ctx.container.replace_with(no_members_message());
            self.state = SpotlightState::NoMembers;
            return;
        }

        let selected = select_spotlight(&qualifying, self.min, self.max, &mut self.rng);
        let schedule = SpotlightSchedule {
            cards: selected.len(),
            stagger: self.stagger,
            settle: self.settle,
        };

        self.ctx.container.clear();
        for (index, member) in selected.iter().enumerate() {
            self.ctx
                .container
                .append(spotlight_card(member, index, &self.logos, &schedule));
        }
        tracing::info!(
            "Spotlighting {} of {} qualifying members",
            selected.len(),
            qualifying.len()
        );
        self.state = SpotlightState::Loaded(schedule);
    }
}
