//! Grouped summaries of species parameters.
//!
//! Pure aggregation over configuration; nothing is simulated here.

use crate::species::SpeciesParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate over one group of species
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub avg_vigor: f64,
    pub avg_humidity_span: f64,
    pub min_bloom_window: f64,
    pub max_bloom_window: f64,
}

impl std::fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<18} | {:2} | avgVigor={:6.2} | avgHumSpan={:5.2} | bloomWindow=[{:6.1},{:6.1}]",
            self.label,
            self.count,
            self.avg_vigor,
            self.avg_humidity_span,
            self.min_bloom_window,
            self.max_bloom_window
        )
    }
}

fn humidity_span(params: &SpeciesParams) -> f64 {
    (params.f_max - params.f_min).abs()
}

fn bloom_window(params: &SpeciesParams) -> f64 {
    (params.h_end - params.h_start).abs()
}

pub fn humidity_class(params: &SpeciesParams) -> &'static str {
    match humidity_span(params) {
        s if s < 0.2 => "Humidity narrow",
        s if s < 0.4 => "Humidity balanced",
        _ => "Humidity wide",
    }
}

pub fn pollination_class(params: &SpeciesParams) -> &'static str {
    match params.pollination_rate {
        p if p < 0.002 => "Pollination low",
        p if p < 0.01 => "Pollination medium",
        _ => "Pollination high",
    }
}

pub fn bloom_class(params: &SpeciesParams) -> &'static str {
    match params.bloom_rate {
        q if q < 0.02 => "Bloom slow",
        q if q < 0.05 => "Bloom medium",
        _ => "Bloom fast",
    }
}

/// Group species by `classifier`, labels in sorted order
pub fn group_by<F>(species: &[SpeciesParams], classifier: F) -> Vec<GroupSummary>
where
    F: Fn(&SpeciesParams) -> &'static str,
{
    let mut groups: BTreeMap<&'static str, Vec<&SpeciesParams>> = BTreeMap::new();
    for params in species {
        groups.entry(classifier(params)).or_default().push(params);
    }

    groups
        .into_iter()
        .map(|(label, members)| summarize(label, &members))
        .collect()
}

fn summarize(label: &str, members: &[&SpeciesParams]) -> GroupSummary {
    let n = members.len() as f64;
    let windows = members.iter().map(|p| bloom_window(p));

    GroupSummary {
        label: label.to_string(),
        count: members.len(),
        avg_vigor: members.iter().map(|p| p.initial_vigor).sum::<f64>() / n,
        avg_humidity_span: members.iter().map(|p| humidity_span(p)).sum::<f64>() / n,
        min_bloom_window: windows.clone().fold(f64::INFINITY, f64::min),
        max_bloom_window: windows.fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Humidity, pollination and bloom groupings, in that order
pub fn functional_report(species: &[SpeciesParams]) -> Vec<GroupSummary> {
    let mut report = group_by(species, humidity_class);
    report.extend(group_by(species, pollination_class));
    report.extend(group_by(species, bloom_class));
    report
}

/// Render a report with a title line
pub fn format_report(title: &str, groups: &[GroupSummary]) -> String {
    let mut out = format!("FUNCTIONAL REPORT - {}\n", title);
    for group in groups {
        out.push_str(&group.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(vigor: f64, f_span: f64, window: f64, p: f64, q: f64) -> SpeciesParams {
        SpeciesParams {
            initial_vigor: vigor,
            f_min: 0.2,
            f_max: 0.2 + f_span,
            h_start: 100.0,
            h_end: 100.0 + window,
            pollination_rate: p,
            bloom_rate: q,
            ..SpeciesParams::default()
        }
    }

    #[test]
    fn test_classifiers() {
        let s = params(10.0, 0.1, 500.0, 0.001, 0.01);
        assert_eq!(humidity_class(&s), "Humidity narrow");
        assert_eq!(pollination_class(&s), "Pollination low");
        assert_eq!(bloom_class(&s), "Bloom slow");

        let s = params(10.0, 0.5, 500.0, 0.02, 0.08);
        assert_eq!(humidity_class(&s), "Humidity wide");
        assert_eq!(pollination_class(&s), "Pollination high");
        assert_eq!(bloom_class(&s), "Bloom fast");
    }

    #[test]
    fn test_group_summary() {
        let species = vec![
            params(10.0, 0.3, 400.0, 0.005, 0.03),
            params(30.0, 0.3, 800.0, 0.005, 0.03),
            params(50.0, 0.1, 200.0, 0.005, 0.03),
        ];
        let groups = group_by(&species, humidity_class);
        assert_eq!(groups.len(), 2);

        // BTreeMap order: "Humidity balanced" < "Humidity narrow"
        let balanced = &groups[0];
        assert_eq!(balanced.label, "Humidity balanced");
        assert_eq!(balanced.count, 2);
        assert_relative_eq!(balanced.avg_vigor, 20.0);
        assert_relative_eq!(balanced.min_bloom_window, 400.0);
        assert_relative_eq!(balanced.max_bloom_window, 800.0);

        assert_eq!(groups[1].label, "Humidity narrow");
        assert_eq!(groups[1].count, 1);
    }

    #[test]
    fn test_functional_report_is_deterministic() {
        let species = crate::config::Config::default().species;
        let a = functional_report(&species);
        let b = functional_report(&species);
        assert_eq!(a, b);
        assert_eq!(
            a.iter().map(|g| g.count).sum::<usize>(),
            3 * species.len()
        );

        let text = format_report("default", &a);
        assert!(text.starts_with("FUNCTIONAL REPORT - default"));
        assert_eq!(text.lines().count(), a.len() + 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(functional_report(&[]).is_empty());
    }
}
