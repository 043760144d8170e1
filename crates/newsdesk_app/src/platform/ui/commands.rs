use newsdesk_core::{Msg, SortKey};

pub const HELP: &str = "\
Commands:
  url <address>      set the site to scrape
  presets            list quick-pick news sites
  preset <n>         use quick-pick site n
  scrape [address]   scrape the current (or given) site
  filter [keyword]   filter by title or author; no keyword clears it
  sort date|title    change the sort order
  open <n>           read article n from the list
  close              close the article view
  dismiss            clear the error message
  help               show this help
  quit               exit";

/// One line of user input, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Vec<Msg>),
    /// 1-based position in the displayed list.
    Open(usize),
    Presets,
    Help,
    Quit,
    Invalid(String),
}

/// Returns `None` for blank lines.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "url" => Command::Send(vec![Msg::UrlInputChanged(rest.to_string())]),
        "presets" => Command::Presets,
        "preset" => match parse_position(rest) {
            Some(n) => Command::Send(vec![Msg::PresetSelected(n - 1)]),
            None => Command::Invalid(format!("expected a preset number, got {rest:?}")),
        },
        "scrape" if rest.is_empty() => Command::Send(vec![Msg::ScrapeSubmitted]),
        "scrape" => Command::Send(vec![
            Msg::UrlInputChanged(rest.to_string()),
            Msg::ScrapeSubmitted,
        ]),
        "filter" => Command::Send(vec![Msg::KeywordChanged(rest.to_string())]),
        "sort" => match SortKey::from_label(rest) {
            Some(key) => Command::Send(vec![Msg::SortChanged(key)]),
            None => Command::Invalid(format!("sort by `date` or `title`, not {rest:?}")),
        },
        "open" => match parse_position(rest) {
            Some(n) => Command::Open(n),
            None => Command::Invalid(format!("expected an article number, got {rest:?}")),
        },
        "close" => Command::Send(vec![Msg::ArticleClosed]),
        "dismiss" => Command::Send(vec![Msg::ListingErrorDismissed]),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Invalid(format!("unknown command {other:?}; type `help`")),
    };
    Some(command)
}

fn parse_position(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().filter(|n| *n >= 1)
}
