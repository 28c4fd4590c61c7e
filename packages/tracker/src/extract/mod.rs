//! Job-posting detection and field extraction.
//!
//! Works on a [`PageSnapshot`] (URL plus fetched HTML) with CSS-selector
//! locators. Resolution is strategy-driven: the hostname picks a site entry
//! from the registry in [`strategies`], unknown hosts get the generic
//! fallback. Within a strategy, the first selector whose element has
//! non-empty text wins.
//!
//! Extraction is read-only and infallible from the caller's view: malformed
//! HTML or selector misses yield `None`, never an error.

mod strategies;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::{Result, TrackerError};
use crate::types::record::JobRecord;

use strategies::{GENERIC, SITES};

/// Keywords marking a page as job-related on unclassified sites.
const JOB_KEYWORDS: &[&str] = &[
    "job",
    "career",
    "position",
    "opening",
    "vacancy",
    "opportunity",
];

/// A page as handed over by the host surface: address plus raw HTML.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    url: Url,
    html: String,
}

impl PageSnapshot {
    pub fn new(url: &str, html: impl Into<String>) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| TrackerError::Validation(format!("invalid page url: {e}")))?;
        Ok(Self {
            url,
            html: html.into(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// One site's extraction recipe.
///
/// Selector lists are ordered by observed markup stability: most specific
/// and current first, broad fallback last. Earlier entries always win.
#[derive(Debug)]
pub struct SiteStrategy {
    pub name: &'static str,
    /// Hostname fragments that classify a page as this site
    pub hosts: &'static [&'static str],
    /// Path fragments that mark a job page on this site
    pub job_paths: &'static [&'static str],
    pub title_selectors: &'static [&'static str],
    pub company_selectors: &'static [&'static str],
    /// Scoped fallback searched inside the title element's parent
    pub company_fallback: Option<&'static str>,
    /// Minimum title length in characters
    pub min_title_chars: usize,
}

/// Pick the strategy for a page address.
pub fn resolve(url: &Url) -> &'static SiteStrategy {
    let host = url.host_str().unwrap_or("");
    SITES
        .iter()
        .find(|s| s.hosts.iter().any(|h| host.contains(h)))
        .unwrap_or(&GENERIC)
}

/// Cheap pre-check gating whether extraction is attempted at all.
///
/// Classified sites match on path patterns; everything else on job keywords
/// in the URL, path, or page title.
pub fn is_job_page(page: &PageSnapshot) -> bool {
    let strategy = resolve(&page.url);

    if !strategy.job_paths.is_empty() {
        let path = page.url.path().to_lowercase();
        return strategy.job_paths.iter().any(|p| path.contains(p));
    }

    let url = page.url.as_str().to_lowercase();
    let path = page.url.path().to_lowercase();
    let title = page_title(&Html::parse_document(&page.html))
        .unwrap_or_default()
        .to_lowercase();

    JOB_KEYWORDS
        .iter()
        .any(|k| url.contains(k) || path.contains(k) || title.contains(k))
}

/// Extract a job record from the page, or `None` when it is not a job page
/// (site-specific paths) or not extractable (generic path).
pub fn extract(page: &PageSnapshot) -> Option<JobRecord> {
    let strategy = resolve(&page.url);
    let document = Html::parse_document(&page.html);

    let title_el = first_match(&document, strategy.title_selectors)?;
    let job_title = element_text(&title_el);

    if job_title.chars().count() < strategy.min_title_chars {
        debug!(
            strategy = strategy.name,
            title = %job_title,
            "title below minimum length, not a job page"
        );
        return None;
    }

    let company = first_match(&document, strategy.company_selectors)
        .map(|el| element_text(&el))
        .or_else(|| {
            strategy
                .company_fallback
                .and_then(|sel| company_near(&title_el, sel))
        });

    debug!(
        strategy = strategy.name,
        title = %job_title,
        company = company.as_deref().unwrap_or("<none>"),
        "extraction successful"
    );

    let mut record = JobRecord::new(job_title, page.url.as_str());
    if let Some(company) = company {
        record = record.with_company(company);
    }
    Some(record)
}

/// First selector whose first matched element has non-empty trimmed text.
///
/// A selector that fails to parse is skipped: a bad locator entry must never
/// take down extraction.
fn first_match<'a>(document: &'a Html, selectors: &[&str]) -> Option<ElementRef<'a>> {
    for raw in selectors {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        if let Some(el) = document.select(&selector).next() {
            if !element_text(&el).is_empty() {
                return Some(el);
            }
        }
    }
    None
}

/// Scoped company fallback: search the given pattern inside the title
/// element's parent.
fn company_near(title_el: &ElementRef, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let parent = title_el.parent().and_then(ElementRef::wrap)?;
    parent
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::UNKNOWN_COMPANY;

    fn snapshot(url: &str, html: &str) -> PageSnapshot {
        PageSnapshot::new(url, html).unwrap()
    }

    #[test]
    fn test_linkedin_extraction() {
        let page = snapshot(
            "https://www.linkedin.com/jobs/view/12345",
            r#"<html><head><title>Senior Rust Engineer | LinkedIn</title></head><body>
               <main>
                 <h1 class="job-details-jobs-unified-top-card__job-title">Senior Rust Engineer</h1>
                 <a class="job-details-jobs-unified-top-card__company-name" href="/company/acme">Acme Corp</a>
               </main></body></html>"#,
        );

        let record = extract(&page).unwrap();
        assert_eq!(record.job_title, "Senior Rust Engineer");
        assert_eq!(record.company, "Acme Corp");
        assert_eq!(record.jd_link, "https://www.linkedin.com/jobs/view/12345");
    }

    #[test]
    fn test_linkedin_falls_back_to_later_selector() {
        // Older layout: only the top-card classes are present
        let page = snapshot(
            "https://www.linkedin.com/jobs/view/99",
            r#"<body><div class="top-card">
                 <h1 class="top-card-layout__title">Backend Engineer</h1>
                 <a href="/company/beta-inc">Beta Inc</a>
               </div></body>"#,
        );

        let record = extract(&page).unwrap();
        assert_eq!(record.job_title, "Backend Engineer");
        // No company selector matches; the scoped parent fallback does
        assert_eq!(record.company, "Beta Inc");
    }

    #[test]
    fn test_linkedin_without_title_is_not_a_job_page() {
        let page = snapshot(
            "https://www.linkedin.com/jobs/view/1",
            "<body><p>Loading…</p></body>",
        );
        assert!(extract(&page).is_none());
    }

    #[test]
    fn test_indeed_extraction() {
        let page = snapshot(
            "https://www.indeed.com/viewjob?jk=abc",
            r#"<body>
                 <h2 class="jobTitle">Data Engineer</h2>
                 <span data-testid="company-name">Gamma LLC</span>
               </body>"#,
        );

        let record = extract(&page).unwrap();
        assert_eq!(record.job_title, "Data Engineer");
        assert_eq!(record.company, "Gamma LLC");
    }

    #[test]
    fn test_generic_extraction_with_unknown_company() {
        let page = snapshot(
            "https://startup.example/careers/backend",
            r#"<body><h1 class="job-title">Platform Engineer</h1></body>"#,
        );

        let record = extract(&page).unwrap();
        assert_eq!(record.job_title, "Platform Engineer");
        assert_eq!(record.company, UNKNOWN_COMPANY);
    }

    #[test]
    fn test_generic_rejects_short_title() {
        let page = snapshot(
            "https://example.com/careers",
            "<body><h1>Go</h1></body>",
        );
        assert!(extract(&page).is_none());
    }

    #[test]
    fn test_selector_order_wins() {
        // Both a specific and a bare h1 are present; the specific one is
        // earlier in the list and must win
        let page = snapshot(
            "https://example.com/jobs/1",
            r#"<body>
                 <h1>Welcome to our careers page</h1>
                 <h1 class="job-title">Site Reliability Engineer</h1>
               </body>"#,
        );

        let record = extract(&page).unwrap();
        assert_eq!(record.job_title, "Site Reliability Engineer");
    }

    #[test]
    fn test_is_job_page_classified_paths() {
        let html = "<body></body>";
        assert!(is_job_page(&snapshot(
            "https://www.linkedin.com/jobs/view/5",
            html
        )));
        assert!(!is_job_page(&snapshot(
            "https://www.linkedin.com/feed/",
            html
        )));
        assert!(is_job_page(&snapshot(
            "https://www.indeed.com/viewjob?jk=1",
            html
        )));
    }

    #[test]
    fn test_is_job_page_generic_keywords() {
        assert!(is_job_page(&snapshot(
            "https://example.com/careers/123",
            "<body></body>"
        )));
        assert!(is_job_page(&snapshot(
            "https://example.com/about",
            "<head><title>Open Position: Analyst</title></head>"
        )));
        assert!(!is_job_page(&snapshot(
            "https://example.com/blog/cooking",
            "<head><title>Recipes</title></head>"
        )));
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let page = snapshot(
            "https://example.com/jobs",
            "<h1 class=\"job-title\">Engineer</h1><div><<<>></di",
        );
        // html5ever recovers; we just need a record or a clean miss
        let record = extract(&page);
        assert_eq!(record.map(|r| r.job_title), Some("Engineer".to_string()));
    }
}
