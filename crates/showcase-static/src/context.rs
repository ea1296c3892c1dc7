//! Values fixed for the duration of one build.

use crate::versions::VersionInfo;

/// Everything pages need that does not come from the catalog.
///
/// Built once before the pipeline starts and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
    /// Public URL of the site
    pub url: String,

    /// Copyright line shown in page footers
    pub copyright: String,

    pub versions: VersionInfo,
}

impl BuildContext {
    pub fn new(url: impl Into<String>, copyright: impl Into<String>, versions: VersionInfo) -> Self {
        Self {
            url: url.into(),
            copyright: copyright.into(),
            versions,
        }
    }
}

/// Copyright line for `holder` in `year`.
pub fn copyright_notice(year: u32, holder: &str) -> String {
    format!("© {year} {holder}")
}

/// Year from the first line of a license that reads `Copyright <year> ...`.
pub fn license_year(license: &str) -> Option<u32> {
    license.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("Copyright ")?;
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    })
}
