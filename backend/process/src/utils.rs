use std::collections::HashSet;

use crate::{
    config::SourcePolicy,
    models::{SourceRow, University},
};

/// Prefers the first domain carrying the policy suffix, else the first listed one.
pub fn primary_domain(domains: &[String], suffix: &str) -> Option<String> {
    domains
        .iter()
        .find(|domain| domain.to_lowercase().ends_with(suffix))
        .or_else(|| domains.first())
        .map(|domain| domain.trim().to_lowercase())
        .filter(|domain| !domain.is_empty())
}

pub fn select_rows(universities: Vec<University>, policy: &SourcePolicy) -> Vec<SourceRow> {
    let rows = universities
        .into_iter()
        .filter(|u| u.alpha_two_code == policy.jurisdiction && !u.domains.is_empty())
        .filter_map(|u| {
            let domain = primary_domain(&u.domains, &policy.preferred_suffix)?;

            Some(SourceRow {
                name: u.name,
                domain,
                locality: u.state_province.unwrap_or_default(),
            })
        })
        .collect();

    dedupe_by_domain(rows)
}

/// First sighting of a domain wins, order is kept.
pub fn dedupe_by_domain(rows: Vec<SourceRow>) -> Vec<SourceRow> {
    let mut seen = HashSet::new();

    rows.into_iter()
        .filter(|row| seen.insert(row.domain.clone()))
        .collect()
}

pub fn cache_key(name: &str, locality: &str) -> String {
    format!("{name}|{locality}").trim().to_string()
}

pub fn query_text(name: &str, locality: &str) -> String {
    format!("{name} {locality}").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn university(name: &str, code: &str, domains: &[&str], state: Option<&str>) -> University {
        University {
            name: name.to_string(),
            domains: domains.iter().map(|d| d.to_string()).collect(),
            alpha_two_code: code.to_string(),
            state_province: state.map(str::to_string),
        }
    }

    fn row(name: &str, domain: &str) -> SourceRow {
        SourceRow {
            name: name.to_string(),
            domain: domain.to_string(),
            locality: String::new(),
        }
    }

    #[test]
    fn test_prefers_edu_suffix() {
        let domains = vec!["a.org".to_string(), "b.edu".to_string()];
        assert_eq!(primary_domain(&domains, ".edu").as_deref(), Some("b.edu"));
    }

    #[test]
    fn test_falls_back_to_first_domain() {
        let domains = vec!["First.ORG".to_string(), "second.com".to_string()];
        assert_eq!(primary_domain(&domains, ".edu").as_deref(), Some("first.org"));
        assert_eq!(primary_domain(&[], ".edu"), None);
    }

    #[test]
    fn test_dedupe_keeps_first() {
        let rows = dedupe_by_domain(vec![row("A", "x.edu"), row("B", "x.edu"), row("C", "y.edu")]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "A");
        assert_eq!(rows[1].name, "C");
    }

    #[test]
    fn test_select_filters_jurisdiction_and_empty_domains() {
        let rows = select_rows(
            vec![
                university("Example University", "US", &["example.edu"], Some("CA")),
                university("Elsewhere", "GB", &["elsewhere.ac.uk"], None),
                university("No Domains", "US", &[], None),
                university("Stateless College", "US", &["stateless.org", "Stateless.EDU"], None),
            ],
            &SourcePolicy::default(),
        );

        assert_eq!(
            rows,
            vec![
                SourceRow {
                    name: "Example University".to_string(),
                    domain: "example.edu".to_string(),
                    locality: "CA".to_string(),
                },
                SourceRow {
                    name: "Stateless College".to_string(),
                    domain: "stateless.edu".to_string(),
                    locality: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_keys_and_queries() {
        assert_eq!(cache_key("Example University", "CA"), "Example University|CA");
        assert_eq!(cache_key("Example University", ""), "Example University|");
        assert_eq!(query_text("Example University", ""), "Example University");
        assert_eq!(query_text("Example University", "CA"), "Example University CA");
    }
}
