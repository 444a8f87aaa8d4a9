//! Statistics use-cases: recording games, decoding the store dump and
//! building the per-mode view state of the statistics screen.

pub mod aggregate;
pub mod decode;
pub mod format;
pub mod loader;
pub mod recorder;
pub mod screen;

pub use aggregate::{
    ModeSummary, StatisticsSummary, TopTimeEntry, TopTimesPolicy, average_win_time, summarize,
    win_rate_percent,
};
pub use decode::{DecodeReport, Decoded, DecodedDump, decode_dump};
pub use format::format_playing_time;
pub use loader::{LoadedStatistics, StatisticsLoader};
pub use recorder::GameRecorder;
pub use screen::{ModeTab, StatisticsScreen, TopTimeRow};
