use super::decode::DecodedDump;
use super::format::format_playing_time;
use crate::domain::{GameMode, TopTime};
use crate::infra::app_config::{AppConfig, DEFAULT_TOP_TIMES_LIMIT, TopTimesOrder};

/// Integer win percentage, 0 when nothing was played. Capped at 100 when
/// the counters are inconsistent.
pub fn win_rate_percent(games_played: u32, games_won: u32) -> u32 {
    if games_played == 0 {
        return 0;
    }
    let percent = u64::from(games_won) * 100 / u64::from(games_played);
    percent.min(100) as u32
}

/// Average seconds per won game, 0 when nothing was won.
pub fn average_win_time(total_winning_seconds: u32, games_won: u32) -> u32 {
    if games_won == 0 {
        return 0;
    }
    total_winning_seconds / games_won
}

/// How many leaderboard entries to keep per mode, and in which order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopTimesPolicy {
    pub limit: usize,
    pub order: TopTimesOrder,
}

impl Default for TopTimesPolicy {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOP_TIMES_LIMIT,
            order: TopTimesOrder::Insertion,
        }
    }
}

impl From<&AppConfig> for TopTimesPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            limit: config.top_times_limit,
            order: config.top_times_order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopTimeEntry {
    pub playing_time_seconds: u32,
    /// `M:SS`
    pub time: String,
    pub date: String,
}

impl From<&TopTime> for TopTimeEntry {
    fn from(top_time: &TopTime) -> Self {
        Self {
            playing_time_seconds: top_time.playing_time_seconds,
            time: format_playing_time(top_time.playing_time_seconds),
            date: top_time.date.clone(),
        }
    }
}

/// Everything the statistics tab of one mode displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSummary {
    pub mode: GameMode,
    pub games_played: u32,
    pub fields_uncovered: u32,
    pub win_rate_percent: u32,
    pub average_win_time_seconds: u32,
    pub top_times: Vec<TopTimeEntry>,
}

impl ModeSummary {
    pub fn empty(mode: GameMode) -> Self {
        Self {
            mode,
            games_played: 0,
            fields_uncovered: 0,
            win_rate_percent: 0,
            average_win_time_seconds: 0,
            top_times: Vec::new(),
        }
    }
}

/// Per-mode summaries, one slot per [`GameMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsSummary {
    modes: [ModeSummary; 3],
}

impl Default for StatisticsSummary {
    fn default() -> Self {
        Self {
            modes: GameMode::ALL.map(ModeSummary::empty),
        }
    }
}

impl StatisticsSummary {
    pub fn get(&self, mode: GameMode) -> &ModeSummary {
        &self.modes[mode.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModeSummary> {
        self.modes.iter()
    }

    fn get_mut(&mut self, mode: GameMode) -> &mut ModeSummary {
        &mut self.modes[mode.index()]
    }
}

/// Fold decoded rows into per-mode summaries.
///
/// A later general statistics row for the same mode replaces an earlier one.
pub fn summarize(dump: &DecodedDump, policy: &TopTimesPolicy) -> StatisticsSummary {
    let mut summary = StatisticsSummary::default();

    for stats in &dump.general_statistics {
        let slot = summary.get_mut(stats.game_mode);
        slot.games_played = stats.games_played;
        slot.fields_uncovered = stats.fields_uncovered;
        slot.win_rate_percent = win_rate_percent(stats.games_played, stats.games_won);
        slot.average_win_time_seconds =
            average_win_time(stats.total_playing_time_seconds, stats.games_won);
    }

    for mode in GameMode::ALL {
        let mut times: Vec<&TopTime> = dump
            .top_times
            .iter()
            .filter(|t| t.game_mode == mode)
            .collect();
        if policy.order == TopTimesOrder::Fastest {
            // Stable sort keeps insertion order among equal times
            times.sort_by_key(|t| t.playing_time_seconds);
        }
        summary.get_mut(mode).top_times = times
            .into_iter()
            .take(policy.limit)
            .map(TopTimeEntry::from)
            .collect();
    }

    summary
}
