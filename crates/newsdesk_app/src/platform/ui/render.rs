use std::fmt::Write;

use newsdesk_core::{AppViewModel, ArticlePanel, NewsSource};

const RULE: &str = "----------------------------------------";

pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{RULE}");
    let url = if view.url_input.is_empty() {
        "(none)"
    } else {
        view.url_input.as_str()
    };
    let _ = writeln!(out, "Site: {url}");

    if view.listing_loading {
        let _ = writeln!(out, "Scraping news...");
    }
    if let Some(error) = &view.listing_error {
        let _ = writeln!(out, "! {error}");
    }

    if view.filters_enabled {
        let keyword = if view.filter.keyword.is_empty() {
            "none".to_string()
        } else {
            format!("{:?}", view.filter.keyword)
        };
        let _ = writeln!(
            out,
            "Filter: {keyword} | Sort: {} | Showing {} of {}",
            view.filter.sort_by.label(),
            view.items.len(),
            view.total_items
        );
        for (index, item) in view.items.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}", index + 1, item.title);
            let _ = writeln!(out, "     By {} | {} | {}", item.author, item.date, item.source);
        }
    }

    match &view.article {
        ArticlePanel::Closed => {}
        ArticlePanel::Loading => {
            let _ = writeln!(out, "{RULE}\nLoading article...");
        }
        ArticlePanel::Failed(message) => {
            let _ = writeln!(out, "{RULE}\n! {message}");
        }
        ArticlePanel::Open(article) => {
            let _ = writeln!(out, "{RULE}\n{}", article.title);
            let _ = writeln!(
                out,
                "By {} | {} | {}",
                article.author, article.date, article.source
            );
            if let Some(image_url) = &article.image_url {
                let _ = writeln!(out, "Image: {image_url}");
            }
            let _ = writeln!(out, "\n{}", article.content);
        }
    }

    out
}

pub fn render_presets(sources: &[NewsSource]) -> String {
    let mut out = String::new();
    for (index, source) in sources.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} - {} ({})",
            index + 1,
            source.name,
            source.url,
            source.description
        );
    }
    out
}
