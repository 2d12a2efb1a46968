use crate::config::{Config, Layout};
use crate::directory::DirectoryRenderer;
use crate::format::escape_html;
use crate::markup::Element;
use crate::spotlight::{SpotlightSelector, SpotlightState, RETRY_BUTTON_ID};
use chrono::Utc;

pub const GRID_BUTTON_ID: &str = "gridView";
pub const LIST_BUTTON_ID: &str = "listView";
pub const SPOTLIGHT_STATUS_ID: &str = "spotlightStatus";

/// Both regions of the landing page, each loaded independently
pub struct Page {
    pub directory: DirectoryRenderer,
    pub spotlight: SpotlightSelector,
}

impl Page {
    /// Build both components and load them concurrently. Neither
    /// component's failure affects the other.
    pub async fn load(config: &Config, seed: Option<u64>) -> Self {
        let mut directory = DirectoryRenderer::from_config(config);
        let mut spotlight = match seed {
            Some(seed) => SpotlightSelector::seeded(config, seed),
            None => SpotlightSelector::from_config(config),
        };

        let (directory_state, spotlight_state) =
            futures::join!(directory.load_and_render(), spotlight.load_spotlights());
        tracing::debug!(
            "Page loaded: directory {:?}, spotlight {:?}",
            directory_state,
            spotlight_state
        );

        Self {
            directory,
            spotlight,
        }
    }
}

/// The grid/list toggle buttons
pub fn layout_controls(active: Layout) -> Element {
    let button = |id: &str, label: &str, layout: Layout| {
        Element::new("button")
            .id(id)
            .attr("type", "button")
            .attr("aria-pressed", (active == layout).to_string())
            .text(label)
    };

    Element::new("div")
        .class("view-controls")
        .child(button(GRID_BUTTON_ID, "Grid", Layout::Grid))
        .child(button(LIST_BUTTON_ID, "List", Layout::List))
}

/// Polite live region that receives the reveal announcement once the
/// staggered spotlight cards have all appeared
pub fn spotlight_status(state: &SpotlightState) -> Element {
    let status = Element::new("p")
        .id(SPOTLIGHT_STATUS_ID)
        .class("visually-hidden")
        .attr("aria-live", "polite");
    match state {
        SpotlightState::Loaded(schedule) => status
            .attr("data-announcement", schedule.announcement())
            .attr(
                "data-after-ms",
                schedule.completes_after().as_millis().to_string(),
            ),
        _ => status,
    }
}

/// Render a standalone HTML document holding both regions.
///
/// The page is a static snapshot, so the spotlight's retry trigger is left
/// out; a fresh selection means rendering the page again.
pub fn render_document(title: &str, page: &Page) -> String {
    let directory = page.directory.container();
    let mut spotlight = page.spotlight.container().to_element().class("spotlight-grid");
    spotlight.remove_by_id(RETRY_BUTTON_ID);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    .grid-view {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }}
    .list-view {{ display: flex; flex-direction: column; gap: 0.5rem; }}
    .list-view .member-card img {{ display: none; }}
    .spotlight-grid {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1rem; }}
    .membership {{ font-weight: bold; }}
    .error-message {{ border-left: 4px solid #ff6b6b; padding: 1rem; }}
    .visually-hidden {{ position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }}
  </style>
</head>
<body>
  <main>
    <h1>{title}</h1>
    <section class="spotlights" aria-label="Member spotlights">
      {spotlight}
      {status}
    </section>
    <section class="directory" aria-label="Member directory">
      {controls}
      {directory}
    </section>
  </main>
  <footer>
    <p>Last updated: {updated}</p>
  </footer>
  <script>
    const members = document.getElementById('{directory_id}');
    document.getElementById('{grid}').onclick = () => members.className = 'grid-view';
    document.getElementById('{list}').onclick = () => members.className = 'list-view';
    document.querySelectorAll('.spotlight-card[data-delay-ms]').forEach(card => {{
      card.style.opacity = '0';
      setTimeout(() => {{
        card.style.transition = 'opacity 0.3s';
        card.style.opacity = '1';
      }}, Number(card.dataset.delayMs));
    }});
    const status = document.getElementById('{status_id}');
    if (status.dataset.announcement) {{
      setTimeout(() => status.textContent = status.dataset.announcement, Number(status.dataset.afterMs));
    }}
  </script>
</body>
</html>
"#,
        title = escape_html(title),
        spotlight = spotlight.to_html(),
        status = spotlight_status(page.spotlight.state()).to_html(),
        controls = layout_controls(page.directory.layout()).to_html(),
        directory = directory.to_element().to_html(),
        updated = Utc::now().format("%B %d, %Y at %I:%M %p UTC"),
        directory_id = escape_html(directory.id()),
        grid = GRID_BUTTON_ID,
        list = LIST_BUTTON_ID,
        status_id = SPOTLIGHT_STATUS_ID,
    )
}
