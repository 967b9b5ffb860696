//! `coursetabs show` command implementation.

use std::path::PathBuf;

use clap::Args;
use coursetabs::{Course, CourseFeatures, RouteTable, Viewer};
use coursetabs_config::{CliSettings, Config, FeaturesConfig};

use super::load_course;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    /// Course JSON file.
    course: PathBuf,

    /// Path to configuration file (default: auto-discover coursetabs.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show tabs as an anonymous visitor.
    #[arg(long, conflicts_with = "no_staff")]
    anonymous: bool,

    /// Show tabs as an authenticated learner without staff rights.
    #[arg(long)]
    no_staff: bool,

    /// Append the instructor tab when the viewer may see it.
    #[arg(long)]
    instructor: bool,

    /// Base URL for resolved links (overrides config).
    #[arg(long, env = "COURSETABS_BASE_URL")]
    base_url: Option<String>,

    /// Enable student notes (overrides config).
    #[arg(long)]
    student_notes: bool,
}

impl ShowArgs {
    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the course cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            base_url: self.base_url.clone(),
            student_notes: self.student_notes.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let (mut course, has_features) = load_course(&self.course)?;
        if !has_features {
            course.features = course_features(config.features);
        }
        let routes = route_table(&config);
        let viewer = self.viewer();

        output.highlight(&format!("Tabs for {}", course.id));
        let lines = render_tabs(&course, &routes, viewer, self.instructor);
        if lines.is_empty() {
            output.warning("No tabs visible to this viewer");
        }
        for line in lines {
            output.result(&line);
        }
        Ok(())
    }

    fn viewer(&self) -> Viewer {
        if self.anonymous {
            Viewer::anonymous()
        } else if self.no_staff {
            Viewer::learner()
        } else {
            Viewer::staff()
        }
    }
}

fn course_features(features: FeaturesConfig) -> CourseFeatures {
    CourseFeatures {
        wiki: features.wiki,
        discussion_service: features.discussion_service,
        textbooks: features.textbooks,
        student_notes: features.student_notes,
    }
}

fn route_table(config: &Config) -> RouteTable {
    RouteTable::new()
        .with_base_url(config.links.base_url.clone())
        .with_routes(
            config
                .links
                .routes
                .iter()
                .map(|(name, template)| (name.clone(), template.clone())),
        )
}

/// One line per displayable tab: name, active page and resolved link.
fn render_tabs(
    course: &Course,
    routes: &RouteTable,
    viewer: Viewer,
    include_instructor_tab: bool,
) -> Vec<String> {
    course
        .displayable_tabs(viewer, include_instructor_tab)
        .map(|tab| {
            format!(
                "{:<24} {:<20} {}",
                tab.name(),
                tab.active_page_name().unwrap_or("-"),
                tab.link(course, routes).as_deref().unwrap_or("-"),
            )
        })
        .collect()
}
