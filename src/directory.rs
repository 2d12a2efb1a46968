//! Member directory: one card per member, in grid or list layout.

use crate::config::{Config, Layout};
use crate::context::{Container, RenderContext};
use crate::error::Error;
use crate::format::{ensure_protocol, escape_js_string};
use crate::markup::Element;
use crate::types::Member;

pub const ERROR_MESSAGE: &str = "Unable to load the member directory. Please try again later.";
pub const NO_DATA_MESSAGE: &str = "No members to display at this time.";

/// Where member logos live and what to show when one fails to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoOptions {
    pub image_base: String,
    pub placeholder_image: String,
}

impl LogoOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            image_base: config.image_base.clone(),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    /// Resolve an image filename against the base; absolute URLs pass through
    pub fn src(&self, image: &str) -> String {
        if image.contains("://") || image.starts_with('/') {
            image.to_string()
        } else {
            format!("{}{}", self.image_base, image)
        }
    }

    pub fn fallback_src(&self) -> String {
        self.src(&self.placeholder_image)
    }

    /// Logo `<img>` that swaps to the placeholder if the image fails at display
    /// time. The handler detaches itself so a missing placeholder fails once.
    pub fn logo(&self, member: &Member) -> Element {
        let fallback = self.fallback_src();
        let onerror = format!(
            "this.onerror=null;this.src='{}';this.alt='{}';",
            escape_js_string(&fallback),
            escape_js_string(&format!("{} - logo not available", member.name))
        );
        Element::new("img")
            .attr("src", self.src(&member.image))
            .attr("alt", format!("{} logo", member.name))
            .attr("loading", "lazy")
            .attr("data-fallback", fallback)
            .attr("onerror", onerror)
    }
}

impl Default for LogoOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Outcome of a directory load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    /// Nothing loaded yet
    Idle,
    Rendered { cards: usize },
    NoData,
    Failed,
}

/// Build the display card for one member
pub fn member_card(member: &Member, logos: &LogoOptions) -> Element {
    let badge = Element::new("span")
        .class(format!("membership {}", member.tier.css_class()))
        .text(member.tier.badge());

    let website = Element::new("a")
        .attr("href", ensure_protocol(&member.website))
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .text("Website");

    Element::new("section")
        .class("member-card")
        .child(logos.logo(member))
        .child(
            Element::new("div")
                .class("member-info")
                .child(Element::new("h3").text(member.name.clone()))
                .child(Element::new("p").class("description").text(member.description.clone()))
                .child(Element::new("p").class("address").text(member.address.clone()))
                .child(Element::new("p").class("phone").text(member.phone.clone()))
                .child(website)
                .child(badge),
        )
}

pub fn error_message() -> Element {
    Element::new("p")
        .class("error-message")
        .attr("role", "alert")
        .text(ERROR_MESSAGE)
}

pub fn no_data_message() -> Element {
    Element::new("p").class("no-data-message").text(NO_DATA_MESSAGE)
}

/// Renders the member directory into its container
pub struct DirectoryRenderer {
    ctx: RenderContext,
    logos: LogoOptions,
    layout: Layout,
    state: DirectoryState,
}

impl DirectoryRenderer {
    pub fn new(ctx: RenderContext, config: &Config) -> Self {
        let mut renderer = Self {
            ctx,
            logos: LogoOptions::from_config(config),
            layout: config.layout,
            state: DirectoryState::Idle,
        };
        renderer.set_layout(config.layout);
        renderer
    }

    /// Build a renderer with its context taken from the configuration
    pub fn from_config(config: &Config) -> Self {
        let ctx = RenderContext::new(config.directory_container_id.clone(), config.source.clone());
        Self::new(ctx, config)
    }

    pub fn container(&self) -> &Container {
        &self.ctx.container
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn state(&self) -> DirectoryState {
        self.state
    }

    /// Fetch the member document and render it. Failures never propagate;
    /// they leave a single message in the container.
    pub async fn load_and_render(&mut self) -> DirectoryState {
        match self.ctx.source.fetch_members().await {
            Ok(members) => self.render(&members),
            Err(Error::Shape(reason)) => {
                tracing::warn!("Member document from {} has no member list: {}", self.ctx.source, reason);
                self.show_no_data()
            }
            Err(e) => {
                tracing::error!("Failed to load members from {}: {}", self.ctx.source, e);
                self.ctx.container.replace_with(error_message());
                self.state = DirectoryState::Failed;
                self.state
            }
        }
    }

    /// Replace the container content with one card per member, in order
    pub fn render(&mut self, members: &[Member]) -> DirectoryState {
        if members.is_empty() {
            return self.show_no_data();
        }

        self.ctx.container.clear();
        for member in members {
            self.ctx.container.append(member_card(member, &self.logos));
        }
        tracing::info!("Rendered {} member cards", members.len());
        self.state = DirectoryState::Rendered {
            cards: members.len(),
        };
        self.state
    }

    /// Switch layout by reclassing the container; cards are left untouched
    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.ctx.container.set_class(layout.class_name());
    }

    fn show_no_data(&mut self) -> DirectoryState {
        self.ctx.container.replace_with(no_data_message());
        self.state = DirectoryState::NoData;
        self.state
    }
}
