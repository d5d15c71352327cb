use crate::model::{LanguageStat, LanguageSummary, LanguageTotals, Repository};
use crate::util::ratio;
use std::collections::HashMap;

/// Per-language counters. Repositories without a language are skipped.
pub fn language_totals(repos: &[Repository]) -> HashMap<String, LanguageTotals> {
    let mut map: HashMap<String, LanguageTotals> = HashMap::new();
    for repo in repos {
        let Some(language) = repo.language.as_deref() else {
            continue;
        };
        let entry = map.entry(language.to_string()).or_default();
        entry.count += 1;
        entry.stars += repo.stargazers_count;
        entry.size += repo.size;
    }
    map
}

/// Ranked language list, most used first.
///
/// `percentage` is relative to all repositories, including the ones with no
/// language, so the column only sums to 100 when every repository has one.
pub fn aggregate_languages(repos: &[Repository]) -> LanguageSummary {
    let repo_count = repos.len() as f64;
    let totals = language_totals(repos);
    let total_bytes = totals.values().map(|t| t.size).sum();

    let mut top_languages: Vec<LanguageStat> = totals
        .into_iter()
        .map(|(name, t)| LanguageStat {
            name,
            count: t.count,
            stars: t.stars,
            size: t.size,
            percentage: ratio(t.count as f64, repo_count) * 100.0,
            popularity: ratio(t.stars as f64, t.count as f64),
        })
        .collect();

    top_languages.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    LanguageSummary { top_languages, total_bytes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(language: Option<&str>, stars: u64, size: u64) -> Repository {
        Repository {
            name: "r".into(),
            language: language.map(String::from),
            stargazers_count: stars,
            size,
            ..Default::default()
        }
    }

    #[test]
    fn typescript_example() {
        let repos = vec![
            repo(Some("TypeScript"), 10, 100),
            repo(Some("TypeScript"), 20, 50),
            repo(None, 5, 7),
        ];
        let summary = aggregate_languages(&repos);
        assert_eq!(summary.top_languages.len(), 1);
        let ts = &summary.top_languages[0];
        assert_eq!(ts.name, "TypeScript");
        assert_eq!(ts.count, 2);
        assert_eq!(ts.stars, 30);
        assert!((ts.percentage - 66.666).abs() < 0.01);
        assert_eq!(ts.popularity, 15.0);
        assert_eq!(summary.total_bytes, 150);
    }

    #[test]
    fn empty_input() {
        let summary = aggregate_languages(&[]);
        assert!(summary.top_languages.is_empty());
        assert_eq!(summary.total_bytes, 0);
    }

    #[test]
    fn ties_are_ordered_by_name() {
        let repos = vec![repo(Some("Rust"), 0, 0), repo(Some("Go"), 0, 0), repo(Some("Rust"), 1, 0), repo(Some("C"), 0, 0)];
        let names: Vec<_> = aggregate_languages(&repos)
            .top_languages
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["Rust", "C", "Go"]);
    }
}
