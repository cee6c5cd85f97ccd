use crate::adapters::http::HttpListingClient;
use crate::app::render;
use crate::config::{Command, FilterArgs, FinderConfig};
use crate::core::finder::{SearchSettings, UniversityFinder};
use crate::core::ConfigProvider;
use crate::domain::model::FilterKey;
use crate::utils::error::{FinderError, Result};
use std::sync::Arc;

pub type HttpFinder = UniversityFinder<HttpListingClient>;

pub fn build_finder(config: &FinderConfig) -> Result<HttpFinder> {
    let client = HttpListingClient::new(config.api_base_url())?;
    tracing::info!("Using listing service at {}", client.base_url());
    Ok(UniversityFinder::new(
        Arc::new(client),
        SearchSettings::from_config(config),
    ))
}

/// Mounts the session, applies every given filter and waits for the single
/// debounced query the burst produces.
async fn run_query(finder: &mut HttpFinder, filters: &FilterArgs) {
    finder.mount();
    for (key, value) in filters.entries() {
        finder.update_filter(key, value);
    }
    finder.settle().await;

    if let Some(error) = finder.query().last_error() {
        tracing::warn!("Showing empty results after failed query: {}", error);
    }
}

pub async fn execute(command: &Command, config: &FinderConfig) -> Result<String> {
    let mut finder = build_finder(config)?;

    match command {
        Command::Search { filters, page } => {
            run_query(&mut finder, filters).await;
            finder.go_to_page(*page);
            Ok(search_output(&finder))
        }
        Command::Show { id } => {
            let university = finder.university(id).await?;
            Ok(render::university_card(&university, false))
        }
        Command::Filters { matching } => {
            let Some(options) = finder.filter_options().await.cloned() else {
                return Ok("Filter vocabulary unavailable; free-text filters still work.\n".into());
            };
            match matching {
                Some(text) => {
                    let mut out = String::new();
                    for key in [FilterKey::Country, FilterKey::Course] {
                        out.push_str(&format!(
                            "{}: {}\n",
                            key,
                            options.suggest(key, text).join(", ")
                        ));
                    }
                    Ok(out)
                }
                None => Ok(render::filter_vocabulary(&options)),
            }
        }
        Command::Compare {
            first,
            second,
            filters,
        } => {
            run_query(&mut finder, filters).await;
            finder.toggle_compare(first);
            finder.toggle_compare(second);

            if !finder.open_comparison() {
                return Err(FinderError::config(
                    "comparison needs two different university ids",
                ));
            }

            match finder.comparison_view() {
                Some(view) => Ok(render::comparison_table(&view)),
                None => {
                    let missing = [first, second]
                        .into_iter()
                        .find(|id| !finder.universities().iter().any(|u| &u.id == *id))
                        .cloned()
                        .unwrap_or_default();
                    Err(FinderError::NotFound { id: missing })
                }
            }
        }
    }
}

fn search_output(finder: &HttpFinder) -> String {
    let mut out = String::new();

    let active = finder.active_filter_count();
    if active > 0 {
        out.push_str(&format!(
            "{} filter{} active\n",
            active,
            if active > 1 { "s" } else { "" }
        ));
    }
    out.push_str(&format!("{}\n\n", finder.page_summary()));

    let visible = finder.visible_universities();
    if visible.is_empty() {
        out.push_str("No universities match your filters. Try adjusting them.\n");
        return out;
    }

    for university in visible {
        let selected = finder.comparison().is_selected(&university.id);
        out.push_str(&render::university_card(university, selected));
        out.push('\n');
    }

    if let Some(strip) = render::page_strip(finder.pagination()) {
        out.push_str(&strip);
        out.push('\n');
    }
    out
}
