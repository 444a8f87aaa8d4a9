use crate::domain::{GameMode, GeneralStatistics, StatsError, TopTime};
use crate::infra::db::Database;
use crate::infra::db::repository::*;

fn sample_stats(mode: GameMode) -> GeneralStatistics {
    GeneralStatistics {
        id: 0,
        game_mode: mode,
        games_played: 7,
        games_won: 3,
        fields_uncovered: 412,
        total_playing_time_seconds: 380,
    }
}

#[test]
fn test_general_statistics_insert_then_read() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = GeneralStatisticsRepository::new(db.connection());

    let stats = sample_stats(GameMode::Medium);
    let id = repo.insert(&stats)?;

    let found = repo.find_by_id(id)?.expect("inserted row");
    assert_eq!(found.id, id);
    assert_eq!(
        found,
        GeneralStatistics {
            id,
            ..stats.clone()
        }
    );
    assert!(repo.find_by_id(id + 100)?.is_none());

    Ok(())
}

#[test]
fn test_general_statistics_update_and_delete() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.general_statistics_repo();

    let id = repo.insert(&sample_stats(GameMode::Easy))?;
    let mut stats = repo.find_by_id(id)?.expect("row");
    stats.games_played += 1;
    stats.games_won += 1;
    assert_eq!(repo.update(&stats)?, 1);
    assert_eq!(repo.find_by_id(id)?.expect("row").games_won, 4);

    let unknown = GeneralStatistics {
        id: 999,
        ..stats.clone()
    };
    assert_eq!(repo.update(&unknown)?, 0);

    assert_eq!(repo.delete(id)?, 1);
    assert_eq!(repo.delete(id)?, 0);
    assert!(repo.find_all()?.is_empty());

    Ok(())
}

#[test]
fn test_general_statistics_reinsert_with_id() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.general_statistics_repo();

    let id = repo.insert(&sample_stats(GameMode::Hard))?;
    let removed = repo.find_by_id(id)?.expect("row");
    repo.delete(id)?;

    repo.insert_with_id(&removed)?;
    assert_eq!(repo.find_by_id(id)?, Some(removed));

    Ok(())
}

#[test]
fn test_general_statistics_rejects_invalid_counters() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.general_statistics_repo();

    let mut stats = sample_stats(GameMode::Easy);
    stats.games_won = stats.games_played + 1;
    let err = repo.insert(&stats).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<StatsError>(),
        Some(StatsError::InvalidRecord(_))
    ));
    assert!(repo.find_all()?.is_empty());

    Ok(())
}

#[test]
fn test_find_id_by_mode() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.general_statistics_repo();

    assert_eq!(repo.find_id_by_mode(GameMode::Easy)?, None);

    let easy = repo.insert(&sample_stats(GameMode::Easy))?;
    let hard = repo.insert(&sample_stats(GameMode::Hard))?;
    assert_eq!(repo.find_id_by_mode(GameMode::Easy)?, Some(easy));
    assert_eq!(repo.find_id_by_mode(GameMode::Hard)?, Some(hard));
    assert_eq!(repo.find_id_by_mode(GameMode::Medium)?, None);

    // Duplicate rows for one mode resolve to the latest
    let easy_again = repo.insert(&sample_stats(GameMode::Easy))?;
    assert_eq!(repo.find_id_by_mode(GameMode::Easy)?, Some(easy_again));

    Ok(())
}

#[test]
fn test_general_statistics_delete_all() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.general_statistics_repo();

    for mode in GameMode::ALL {
        repo.insert(&sample_stats(mode))?;
    }
    assert_eq!(repo.find_all()?.len(), 3);

    assert_eq!(repo.delete_all()?, 3);
    assert!(repo.find_all()?.is_empty());

    Ok(())
}

#[test]
fn test_top_time_repository() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = TopTimeRepository::new(db.connection());

    let first = repo.insert(&TopTime::new(GameMode::Easy, 75, "2024-03-01"))?;
    let second = repo.insert(&TopTime::new(GameMode::Easy, 41, "2024-03-02"))?;
    repo.insert(&TopTime::new(GameMode::Hard, 610, "2024-03-02"))?;

    let found = repo.find_by_id(first)?.expect("row");
    assert_eq!(found.playing_time_seconds, 75);
    assert_eq!(found.date, "2024-03-01");

    let easy = repo.find_by_mode(GameMode::Easy)?;
    assert_eq!(
        easy.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![first, second]
    );
    assert_eq!(repo.find_all()?.len(), 3);

    let mut edited = found.clone();
    edited.date = "2024-03-05".into();
    assert_eq!(repo.update(&edited)?, 1);
    assert_eq!(repo.find_by_id(first)?, Some(edited.clone()));

    assert_eq!(repo.delete(first)?, 1);
    repo.insert_with_id(&edited)?;
    assert_eq!(repo.find_by_id(first)?, Some(edited));

    assert_eq!(repo.delete_all()?, 3);
    assert!(repo.find_all()?.is_empty());

    Ok(())
}

#[test]
fn test_best_time() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.top_time_repo();

    assert_eq!(repo.best_time(GameMode::Medium)?, None);

    repo.insert(&TopTime::new(GameMode::Medium, 190, "a"))?;
    repo.insert(&TopTime::new(GameMode::Medium, 143, "b"))?;
    repo.insert(&TopTime::new(GameMode::Medium, 201, "c"))?;
    repo.insert(&TopTime::new(GameMode::Easy, 12, "d"))?;

    assert_eq!(repo.best_time(GameMode::Medium)?, Some(143));
    assert_eq!(repo.best_time(GameMode::Easy)?, Some(12));
    assert_eq!(repo.best_time(GameMode::Hard)?, None);

    Ok(())
}

#[test]
fn test_unknown_persisted_mode_is_an_error() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    {
        let conn = db.connection();
        let guard = conn.lock();
        // Bypass the CHECK constraint the way a legacy table would
        guard.execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO TOP_TIMES (game_mode, playing_time, date) VALUES ('expert', 10, 'x');",
        )?;
    }

    assert!(db.top_time_repo().find_all().is_err());

    Ok(())
}

#[test]
fn test_stored_mode_must_match_exactly() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    {
        let conn = db.connection();
        let guard = conn.lock();
        guard.execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO GENERAL_STATISTICS (game_mode) VALUES ('Hard');",
        )?;
    }

    // The mode filter would never match this row, so a read must not either
    let repo = db.general_statistics_repo();
    assert_eq!(repo.find_id_by_mode(GameMode::Hard)?, None);
    assert!(repo.find_all().is_err());

    Ok(())
}
