use crate::config::toml_config::FinderConfig;
use crate::domain::model::{FilterKey, RacePolicy};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "uni-finder")]
#[command(about = "Search, page through and compare universities from the listing service")]
pub struct CliConfig {
    #[arg(long, env = "UNI_FINDER_API_URL", global = true, help = "Base URL of the listing service")]
    pub api_url: Option<String>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,

    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[arg(long, global = true, help = "sequenced | last-writer-wins")]
    pub race_policy: Option<RacePolicy>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "compact", help = "compact | json")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run one filtered query and print a page of results
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
    },
    /// Look up a single university by id
    Show { id: String },
    /// Print the filter vocabulary offered by the listing service
    Filters {
        #[arg(long, help = "Only countries and courses containing this text")]
        matching: Option<String>,
    },
    /// Compare two universities from the filtered result set side by side
    Compare {
        first: String,
        second: String,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub course: Option<String>,
    #[arg(long)]
    pub tuition_min: Option<String>,
    #[arg(long)]
    pub tuition_max: Option<String>,
    #[arg(long)]
    pub ranking_min: Option<String>,
    #[arg(long)]
    pub ranking_max: Option<String>,
    #[arg(long)]
    pub established_min: Option<String>,
    #[arg(long)]
    pub established_max: Option<String>,
    #[arg(long)]
    pub min_ielts: Option<String>,
    #[arg(long, help = "true | false")]
    pub scholarships: Option<String>,
}

impl FilterArgs {
    /// Given flags as filter updates, in canonical key order.
    pub fn entries(&self) -> Vec<(FilterKey, &str)> {
        [
            (FilterKey::Name, &self.name),
            (FilterKey::Country, &self.country),
            (FilterKey::Location, &self.location),
            (FilterKey::TuitionMin, &self.tuition_min),
            (FilterKey::TuitionMax, &self.tuition_max),
            (FilterKey::RankingMin, &self.ranking_min),
            (FilterKey::RankingMax, &self.ranking_max),
            (FilterKey::EstablishedMin, &self.established_min),
            (FilterKey::EstablishedMax, &self.established_max),
            (FilterKey::MinIelts, &self.min_ielts),
            (FilterKey::Course, &self.course),
            (FilterKey::Scholarships, &self.scholarships),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }
}

impl CliConfig {
    /// File configuration (if any) with command-line overrides applied,
    /// validated.
    pub fn load_config(&self) -> Result<FinderConfig> {
        let base = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                FinderConfig::from_file(path)?
            }
            None => FinderConfig::default(),
        };

        let config = base.with_overrides(
            self.api_url.clone(),
            self.debounce_ms,
            self.page_size,
            self.race_policy,
        );
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_parse_search_with_filters() {
        let cli = CliConfig::try_parse_from([
            "uni-finder",
            "--api-url",
            "http://127.0.0.1:4000",
            "search",
            "--country",
            "UK",
            "--tuition-max",
            "30000",
            "--page",
            "2",
        ])
        .unwrap();

        match &cli.command {
            Command::Search { filters, page } => {
                assert_eq!(*page, 2);
                assert_eq!(
                    filters.entries(),
                    vec![(FilterKey::Country, "UK"), (FilterKey::TuitionMax, "30000")]
                );
            }
            other => panic!("unexpected command {:?}", other),
        }

        let config = cli.load_config().unwrap();
        assert_eq!(config.api_base_url(), "http://127.0.0.1:4000");
    }

    #[test]
    fn test_parse_compare_and_race_policy() {
        let cli = CliConfig::try_parse_from([
            "uni-finder",
            "compare",
            "ox",
            "cam",
            "--race-policy",
            "last-writer-wins",
        ])
        .unwrap();

        assert_eq!(cli.race_policy, Some(RacePolicy::LastWriterWins));
        assert!(matches!(
            cli.command,
            Command::Compare { ref first, ref second, .. } if first == "ox" && second == "cam"
        ));
    }

    #[test]
    fn test_invalid_api_url_fails_validation() {
        let cli =
            CliConfig::try_parse_from(["uni-finder", "--api-url", "nope", "filters"]).unwrap();
        assert!(cli.load_config().is_err());
    }
}
