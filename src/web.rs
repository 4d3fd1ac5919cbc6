// SPDX-License-Identifier: MPL-2.0
//! Page model for the embedded web experience screen.
//!
//! There is no real browser engine here: the screen fetches a page over
//! HTTP and reports what it found. The model tracks the load lifecycle and
//! a visited-URL history with back/forward semantics.

/// Facts reported about a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    pub body_bytes: usize,
    pub title: Option<String>,
}

/// Load lifecycle of the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Idle,
    Loading,
    Loaded(PageInfo),
    Failed(String),
}

/// Navigation state for the web experience screen.
#[derive(Debug)]
pub struct Browser {
    /// Contents of the address bar; may differ from the loaded page.
    pub address: String,
    state: PageState,
    history: Vec<String>,
    cursor: usize,
}

impl Browser {
    #[must_use]
    pub fn new(home_url: String) -> Self {
        Self {
            address: home_url,
            state: PageState::Idle,
            history: Vec::new(),
            cursor: 0,
        }
    }

    /// Begins loading `url`, truncating any forward history.
    ///
    /// Returns the URL the caller should fetch.
    pub fn navigate(&mut self, url: String) -> String {
        if !self.history.is_empty() {
            self.history.truncate(self.cursor + 1);
        }
        self.history.push(url.clone());
        self.cursor = self.history.len() - 1;
        self.address = url.clone();
        self.state = PageState::Loading;
        url
    }

    /// Reloads the current history entry, if any.
    pub fn reload(&mut self) -> Option<String> {
        let url = self.history.get(self.cursor)?.clone();
        self.address = url.clone();
        self.state = PageState::Loading;
        Some(url)
    }

    /// Steps back in history, returning the URL to fetch.
    pub fn go_back(&mut self) -> Option<String> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        self.reload()
    }

    /// Steps forward in history, returning the URL to fetch.
    pub fn go_forward(&mut self) -> Option<String> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        self.reload()
    }

    /// Records the outcome of the in-flight fetch.
    pub fn finish(&mut self, result: Result<PageInfo, String>) {
        self.state = match result {
            Ok(info) => PageState::Loaded(info),
            Err(message) => PageState::Failed(message),
        };
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        !self.history.is_empty() && self.cursor + 1 < self.history.len()
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }
}

/// Extracts the contents of the first `<title>` element, if any.
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_lowercase();
    let open = lower.find("<title")?;
    let start = lower[open..].find('>')? + open + 1;
    let end = lower[start..].find("</title>")? + start;
    let title = html[start..end].trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(url: &str) -> PageInfo {
        PageInfo {
            final_url: url.to_string(),
            status: 200,
            body_bytes: 1024,
            title: None,
        }
    }

    #[test]
    fn navigate_pushes_history_and_sets_loading() {
        let mut browser = Browser::new("https://a.example".into());
        let url = browser.navigate("https://a.example".into());

        assert_eq!(url, "https://a.example");
        assert!(browser.is_loading());
        assert!(!browser.can_go_back());
        assert!(!browser.can_go_forward());
    }

    #[test]
    fn back_and_forward_move_through_history() {
        let mut browser = Browser::new("https://a.example".into());
        browser.navigate("https://a.example".into());
        browser.finish(Ok(loaded("https://a.example")));
        browser.navigate("https://b.example".into());
        browser.finish(Ok(loaded("https://b.example")));

        assert!(browser.can_go_back());
        assert_eq!(browser.go_back(), Some("https://a.example".to_string()));
        assert!(browser.can_go_forward());
        assert_eq!(browser.go_forward(), Some("https://b.example".to_string()));
        assert!(!browser.can_go_forward());
    }

    #[test]
    fn navigating_truncates_forward_history() {
        let mut browser = Browser::new("https://a.example".into());
        browser.navigate("https://a.example".into());
        browser.navigate("https://b.example".into());
        browser.go_back();

        browser.navigate("https://c.example".into());
        assert!(!browser.can_go_forward());
        assert_eq!(browser.go_back(), Some("https://a.example".to_string()));
    }

    #[test]
    fn back_at_start_is_a_noop() {
        let mut browser = Browser::new("https://a.example".into());
        browser.navigate("https://a.example".into());
        assert_eq!(browser.go_back(), None);
    }

    #[test]
    fn finish_records_failures() {
        let mut browser = Browser::new("https://a.example".into());
        browser.navigate("https://a.example".into());
        browser.finish(Err("timed out".into()));
        assert!(matches!(browser.state(), PageState::Failed(m) if m == "timed out"));
    }

    #[test]
    fn extract_title_finds_simple_titles() {
        let html = "<html><head><title>House of EdTech</title></head></html>";
        assert_eq!(extract_title(html), Some("House of EdTech".to_string()));
    }

    #[test]
    fn extract_title_handles_attributes_and_case() {
        let html = "<HTML><TITLE lang=\"en\"> Spaced Out </TITLE></HTML>";
        assert_eq!(extract_title(html), Some("Spaced Out".to_string()));
    }

    #[test]
    fn extract_title_returns_none_when_absent_or_empty() {
        assert_eq!(extract_title("<html><body>hi</body></html>"), None);
        assert_eq!(extract_title("<title>   </title>"), None);
    }
}
