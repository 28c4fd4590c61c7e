//! Per-site extraction strategies.
//!
//! Each entry encodes where the ground truth lives in a site's markup and
//! how stable each location has proven: earlier selectors are the current,
//! most specific markup; later ones are broad fallbacks for older layouts.
//! Adding a site means appending a registry entry, never branching shared
//! extraction code.

use super::SiteStrategy;

const LINKEDIN: SiteStrategy = SiteStrategy {
    name: "linkedin",
    hosts: &["linkedin.com"],
    job_paths: &["/jobs/view/", "/jobs/"],
    title_selectors: &[
        "h1.job-details-jobs-unified-top-card__job-title",
        r#"h1[data-test-id="job-title"]"#,
        "h1.jobs-details-top-card__job-title",
        "h1.job-details-top-card__job-title",
        "h1.job-details-top-card__job-title-text",
        r#"h1[class*="job-title"]"#,
        r#"h1[class*="JobTitle"]"#,
        "h1.top-card-layout__title",
        "h1.job-details__job-title",
        // Broad fallbacks: any h1 in the job detail area
        "main h1",
        r#"div[class*="job-details"] h1"#,
        r#"section[class*="job-details"] h1"#,
    ],
    company_selectors: &[
        "a.job-details-jobs-unified-top-card__company-name",
        r#"a[data-test-id="job-poster"]"#,
        "a.jobs-details-top-card__company-name",
        "a.job-details-top-card__company-name",
        r#"a[class*="company-name"]"#,
        r#"a[class*="CompanyName"]"#,
        r#"span[class*="company-name"]"#,
        r#"div[class*="company-name"]"#,
        "a.top-card-layout__entity-info-subtitle",
        r#"main a[href*="/company/"]"#,
        r#"div[class*="job-details"] a[href*="/company/"]"#,
    ],
    company_fallback: Some(r#"a[href*="/company/"]"#),
    min_title_chars: 1,
};

const INDEED: SiteStrategy = SiteStrategy {
    name: "indeed",
    hosts: &["indeed.com"],
    job_paths: &["/viewjob", "/job/"],
    title_selectors: &["h2.jobTitle", r#"h1[data-testid="job-title"]"#],
    company_selectors: &[
        r#"span[data-testid="company-name"]"#,
        r#"a[data-testid="inlineHeader-companyName"]"#,
    ],
    company_fallback: None,
    min_title_chars: 1,
};

/// Generic strategy for company career pages.
///
/// The longer title threshold guards against incidental `<h1>` matches on
/// pages that merely mention jobs.
pub(super) const GENERIC: SiteStrategy = SiteStrategy {
    name: "generic",
    hosts: &[],
    job_paths: &[],
    title_selectors: &[
        "h1.job-title",
        r#"h1[class*="title"]"#,
        r#"h1[class*="job"]"#,
        ".job-title",
        r#"[class*="job-title"]"#,
        "h1",
    ],
    company_selectors: &[
        ".company-name",
        r#"[class*="company"]"#,
        ".employer",
        r#"[class*="employer"]"#,
    ],
    company_fallback: None,
    min_title_chars: 3,
};

/// Site-specific strategies, checked in order before falling back to
/// [`GENERIC`].
pub(super) const SITES: &[SiteStrategy] = &[LINKEDIN, INDEED];
