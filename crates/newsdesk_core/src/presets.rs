/// A news site offered as a quick pick for the URL input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsSource {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const NEWS_SOURCES: &[NewsSource] = &[
    NewsSource {
        name: "ABS-CBN News",
        url: "https://news.abs-cbn.com/",
        description: "Philippine news and current events",
    },
    NewsSource {
        name: "GMA News",
        url: "https://www.gmanetwork.com/news/",
        description: "Latest Philippine news",
    },
    NewsSource {
        name: "Rappler",
        url: "https://www.rappler.com/",
        description: "Philippine news and analysis",
    },
    NewsSource {
        name: "Inquirer",
        url: "https://newsinfo.inquirer.net/",
        description: "Philippine daily news",
    },
    NewsSource {
        name: "Manila Bulletin",
        url: "https://mb.com.ph/",
        description: "Philippine news and information",
    },
    NewsSource {
        name: "CNN Philippines",
        url: "https://www.cnnphilippines.com/",
        description: "Latest news and updates",
    },
];
