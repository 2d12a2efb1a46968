use crate::error::{Error, Result};
use crate::source::DataSource;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Layout mode of the member directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Grid,
    List,
}

impl Layout {
    /// Class applied to the directory container
    pub fn class_name(self) -> &'static str {
        match self {
            Layout::Grid => "grid-view",
            Layout::List => "list-view",
        }
    }
}

impl From<&str> for Layout {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "list" => Layout::List,
            "grid" | _ => Layout::Grid,
        }
    }
}

/// Configuration shared by the directory and spotlight components
#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
    /// Prefix for member logo filenames
    pub image_base: String,
    pub placeholder_image: String,
    pub layout: Layout,
    pub spotlight_min: usize,
    pub spotlight_max: usize,
    /// Delay between consecutive spotlight cards appearing
    pub stagger: Duration,
    /// Extra time after the last card before the region counts as loaded
    pub settle: Duration,
    pub directory_container_id: String,
    pub spotlight_container_id: String,
}

impl Config {
    /// Create a new default configuration
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            image_base: "images/".to_string(),
            placeholder_image: "placeholder-logo.jpg".to_string(),
            layout: Layout::Grid,
            spotlight_min: 2,
            spotlight_max: 3,
            stagger: Duration::from_millis(200),
            settle: Duration::from_millis(500),
            directory_container_id: "membersContainer".to_string(),
            spotlight_container_id: "spotlightContainer".to_string(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.spotlight_max == 0 {
            return Err(Error::Config(
                "spotlight_max must be at least 1".to_string(),
            ));
        }

        if self.spotlight_min > self.spotlight_max {
            return Err(Error::Config(format!(
                "spotlight_min ({}) is greater than spotlight_max ({})",
                self.spotlight_min, self.spotlight_max
            )));
        }

        if self.directory_container_id.trim().is_empty()
            || self.spotlight_container_id.trim().is_empty()
        {
            return Err(Error::Config("Container ids must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DataSource::default())
    }
}

/// On-disk configuration (YAML). Every field is optional and layered over
/// the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub image_base: Option<String>,
    pub placeholder_image: Option<String>,
    pub layout: Option<String>,
    pub spotlight_min: Option<usize>,
    pub spotlight_max: Option<usize>,
    pub stagger_ms: Option<u64>,
    pub settle_ms: Option<u64>,
    pub directory_container_id: Option<String>,
    pub spotlight_container_id: Option<String>,
}

/// Load and parse a YAML configuration file
pub fn load_file(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(source: DataSource) -> Self {
        Self {
            config: Config::new(source),
        }
    }

    /// Layer the values present in a config file over the current settings
    pub fn apply_file(mut self, file: ConfigFile) -> Self {
        if let Some(source) = file.source {
            self.config.source = DataSource::parse(&source);
        }
        if let Some(base) = file.image_base {
            self.config.image_base = base;
        }
        if let Some(image) = file.placeholder_image {
            self.config.placeholder_image = image;
        }
        if let Some(layout) = file.layout {
            self.config.layout = Layout::from(layout.as_str());
        }
        if let Some(min) = file.spotlight_min {
            self.config.spotlight_min = min;
        }
        if let Some(max) = file.spotlight_max {
            self.config.spotlight_max = max;
        }
        if let Some(ms) = file.stagger_ms {
            self.config.stagger = Duration::from_millis(ms);
        }
        if let Some(ms) = file.settle_ms {
            self.config.settle = Duration::from_millis(ms);
        }
        if let Some(id) = file.directory_container_id {
            self.config.directory_container_id = id;
        }
        if let Some(id) = file.spotlight_container_id {
            self.config.spotlight_container_id = id;
        }
        self
    }

    /// Set the data source
    pub fn source(mut self, source: DataSource) -> Self {
        self.config.source = source;
        self
    }

    pub fn image_base(mut self, base: impl Into<String>) -> Self {
        self.config.image_base = base.into();
        self
    }

    pub fn placeholder_image(mut self, image: impl Into<String>) -> Self {
        self.config.placeholder_image = image.into();
        self
    }

    /// Set the initial directory layout
    pub fn layout(mut self, layout: Layout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Set the spotlight size bounds
    pub fn spotlight_bounds(mut self, min: usize, max: usize) -> Self {
        self.config.spotlight_min = min;
        self.config.spotlight_max = max;
        self
    }

    pub fn stagger(mut self, stagger: Duration) -> Self {
        self.config.stagger = stagger;
        self
    }

    pub fn settle(mut self, settle: Duration) -> Self {
        self.config.settle = settle;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ConfigBuilder::new(DataSource::default()).build().unwrap();
        assert_eq!(config.layout, Layout::Grid);
        assert_eq!((config.spotlight_min, config.spotlight_max), (2, 3));
        assert_eq!(config.stagger, Duration::from_millis(200));
        assert_eq!(config.directory_container_id, "membersContainer");
    }

    #[test]
    fn test_invalid_bounds() {
        let result = ConfigBuilder::new(DataSource::default())
            .spotlight_bounds(4, 3)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ConfigBuilder::new(DataSource::default())
            .spotlight_bounds(0, 0)
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!(Layout::from("LIST"), Layout::List);
        assert_eq!(Layout::from("grid"), Layout::Grid);
        assert_eq!(Layout::from("cards"), Layout::Grid);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "source: https://example.com/members.json\nlayout: list\nspotlight_max: 4\nstagger_ms: 50"
        )
        .unwrap();

        let config = ConfigBuilder::new(DataSource::default())
            .apply_file(load_file(file.path()).unwrap())
            .build()
            .unwrap();

        assert_eq!(
            config.source,
            DataSource::Http("https://example.com/members.json".to_string())
        );
        assert_eq!(config.layout, Layout::List);
        assert_eq!(config.spotlight_max, 4);
        assert_eq!(config.stagger, Duration::from_millis(50));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sauce: members.json").unwrap();
        assert!(matches!(load_file(file.path()), Err(Error::Yaml(_))));
    }
}
