//! Dashboard aggregation: a pure fold over an already-fetched dataset
//! collection. No I/O happens here, which keeps the whole module testable
//! without a store.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    classify::UNCATEGORIZED,
    dataset::{Dataset, DatasetSummary},
};

/// Uploads newer than this many days count toward `recent_uploads`. The
/// comparison is strict: an upload exactly at the window edge is excluded.
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Uploads,
    Charts,
    Insights,
    Rows,
}

/// One milestone definition. Thresholds live in [`ACHIEVEMENTS`] rather than
/// being spread through the evaluation logic.
#[derive(Debug, Clone, Copy)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub threshold: u64,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        name: "Data Explorer",
        description: "Uploaded 10+ files",
        metric: Metric::Uploads,
        threshold: 10,
    },
    Achievement {
        name: "Chart Master",
        description: "Created 25+ charts",
        metric: Metric::Charts,
        threshold: 25,
    },
    Achievement {
        name: "Insight Hunter",
        description: "Generated 50+ insights",
        metric: Metric::Insights,
        threshold: 50,
    },
    Achievement {
        name: "Analytics Pro",
        description: "Analyzed 10K+ rows",
        metric: Metric::Rows,
        threshold: 10_000,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_uploads: usize,
    pub total_rows: u64,
    pub total_charts: u64,
    pub total_insights: u64,
    pub recent_uploads: usize,
    /// Mean of the strictly-positive quality scores, rounded; 0 when no
    /// dataset has a computed quality.
    pub avg_quality: u8,
}

impl DashboardStats {
    fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Uploads => self.total_uploads as u64,
            Metric::Charts => self.total_charts,
            Metric::Insights => self.total_insights,
            Metric::Rows => self.total_rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub name: String,
    pub description: String,
    pub unlocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub uploads: Vec<DatasetSummary>,
    pub stats: DashboardStats,
    pub category_stats: BTreeMap<String, usize>,
    pub achievements: Vec<AchievementStatus>,
}

pub fn aggregate(datasets: &[Dataset], now: DateTime<Utc>) -> DashboardData {
    let stats = compute_stats(datasets, now);
    let category_stats: BTreeMap<String, usize> = datasets
        .iter()
        .counts_by(|d| {
            if d.category.is_empty() {
                UNCATEGORIZED.to_string()
            } else {
                d.category.clone()
            }
        })
        .into_iter()
        .collect();
    let achievements = evaluate_achievements(&stats);
    DashboardData {
        uploads: datasets.iter().map(Dataset::summary).collect(),
        stats,
        category_stats,
        achievements,
    }
}

fn compute_stats(datasets: &[Dataset], now: DateTime<Utc>) -> DashboardStats {
    let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let qualities: Vec<u64> = datasets
        .iter()
        .filter(|d| d.quality > 0)
        .map(|d| d.quality as u64)
        .collect();
    let avg_quality = if qualities.is_empty() {
        0
    } else {
        let mean = qualities.iter().sum::<u64>() as f64 / qualities.len() as f64;
        mean.round() as u8
    };
    DashboardStats {
        total_uploads: datasets.len(),
        total_rows: datasets.iter().map(|d| d.row_count() as u64).sum(),
        total_charts: datasets.iter().map(|d| d.chart_count as u64).sum(),
        total_insights: datasets.iter().map(|d| d.insight_count as u64).sum(),
        recent_uploads: datasets
            .iter()
            .filter(|d| d.created_at > recent_cutoff)
            .count(),
        avg_quality,
    }
}

/// Evaluates every definition independently, in table order; unlock state
/// never affects ordering.
fn evaluate_achievements(stats: &DashboardStats) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|definition| AchievementStatus {
            name: definition.name.to_string(),
            description: definition.description.to_string(),
            unlocked: stats.metric(definition.metric) >= definition.threshold,
        })
        .collect()
}
