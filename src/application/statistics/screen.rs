//! Controller behind the tabbed statistics screen.
//!
//! The screen owns the latest [`StatisticsSummary`]. Entering the screen
//! triggers one background load; its result replaces the summary and is
//! pushed into every tab that has been opened so far.

use super::aggregate::{ModeSummary, StatisticsSummary};
use super::format::format_playing_time;
use super::loader::StatisticsLoader;
use crate::domain::GameMode;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopTimeRow {
    pub rank: usize,
    pub time: String,
    pub date: String,
}

/// Display strings for one mode's tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeTab {
    pub mode: GameMode,
    pub games_played: String,
    pub win_rate: String,
    pub fields_uncovered: String,
    pub average_time: String,
    pub top_times: Vec<TopTimeRow>,
}

impl ModeTab {
    pub fn from_summary(summary: &ModeSummary) -> Self {
        Self {
            mode: summary.mode,
            games_played: summary.games_played.to_string(),
            win_rate: format!("{} %", summary.win_rate_percent),
            fields_uncovered: summary.fields_uncovered.to_string(),
            average_time: format_playing_time(summary.average_win_time_seconds),
            top_times: summary
                .top_times
                .iter()
                .enumerate()
                .map(|(i, entry)| TopTimeRow {
                    rank: i + 1,
                    time: entry.time.clone(),
                    date: entry.date.clone(),
                })
                .collect(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.mode.title()
    }

    /// Plain-text rendering of the tab.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} ==", self.title());
        let _ = writeln!(out, "Games played:     {}", self.games_played);
        let _ = writeln!(out, "Win rate:         {}", self.win_rate);
        let _ = writeln!(out, "Fields uncovered: {}", self.fields_uncovered);
        let _ = writeln!(out, "Average time:     {}", self.average_time);
        let _ = writeln!(out, "Top times:");
        if self.top_times.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for row in &self.top_times {
            let _ = writeln!(out, "  {:>2}. {:>6}  {}", row.rank, row.time, row.date);
        }
        out
    }
}

pub struct StatisticsScreen {
    loader: StatisticsLoader,
    summary: StatisticsSummary,
    tabs: [Option<ModeTab>; 3],
}

impl StatisticsScreen {
    pub fn new(loader: StatisticsLoader) -> Self {
        Self {
            loader,
            summary: StatisticsSummary::default(),
            tabs: [None, None, None],
        }
    }

    pub fn summary(&self) -> &StatisticsSummary {
        &self.summary
    }

    /// Instantiate the tab for `mode` (if needed) from the current summary.
    pub fn open_tab(&mut self, mode: GameMode) -> &ModeTab {
        let summary = &self.summary;
        self.tabs[mode.index()].get_or_insert_with(|| ModeTab::from_summary(summary.get(mode)))
    }

    pub fn close_tab(&mut self, mode: GameMode) {
        self.tabs[mode.index()] = None;
    }

    /// The tab for `mode`, if it has been opened.
    pub fn tab(&self, mode: GameMode) -> Option<&ModeTab> {
        self.tabs[mode.index()].as_ref()
    }

    pub fn open_tabs(&self) -> impl Iterator<Item = &ModeTab> {
        self.tabs.iter().flatten()
    }

    /// Load the store once and refresh the open tabs.
    ///
    /// Decode problems are logged as one warning; the modes they affect
    /// fall back to zeros. A failed read keeps the previous summary.
    pub async fn enter(&mut self) {
        match self.loader.load().await {
            Ok(loaded) => {
                if !loaded.report.is_clean() {
                    log::warn!("Statistics data was partially unreadable: {}", loaded.report);
                }
                self.apply(loaded.summary);
            }
            Err(err) => {
                log::warn!("Failed to load statistics: {:#}", err);
            }
        }
    }

    /// Replace the summary and push it into every open tab.
    pub fn apply(&mut self, summary: StatisticsSummary) {
        self.summary = summary;
        for mode in GameMode::ALL {
            if let Some(tab) = self.tabs[mode.index()].as_mut() {
                *tab = ModeTab::from_summary(self.summary.get(mode));
            }
        }
    }
}
