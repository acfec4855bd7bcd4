//! Integration tests for the application context

mod common;

use std::time::Duration;

use tempfile::TempDir;

use cyberfolio::games::{FlipOutcome, MEMORY_GAME_ID, MemoryGame};
use cyberfolio::identity::{AccessLevel, SignupForm};
use cyberfolio::preferences::{Language, Theme};
use cyberfolio::easter_eggs::Prank;
use cyberfolio::progress::{AchievementId, ProgressEvent};
use cyberfolio::storage::{KeyValueStore, keys};

use common::{open_app, open_store, paired_deck};

#[test]
fn test_identity_lifecycle_keeps_progress() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    {
        let mut app = open_app(&dir);
        let form = SignupForm {
            name: "Trinity".to_string(),
            email: "trinity@matrix.io".to_string(),
            password: "redpill".to_string(),
            confirm: "redpill".to_string(),
        };
        let rewarded = app.signup(&form).unwrap();
        assert_eq!(rewarded.value.access_level, AccessLevel::NewUser);
        assert!(rewarded.events.iter().any(|e| matches!(
            e,
            ProgressEvent::AchievementUnlocked(u) if u.achievement.id == AchievementId::FirstLogin
        )));
    }

    let mut app = open_app(&dir);
    assert_eq!(app.identity().map(|i| i.name.as_str()), Some("Trinity"));
    assert_eq!(app.snapshot().experience, 50);

    app.logout();
    drop(app);

    let app = open_app(&dir);
    assert!(app.identity().is_none());
    assert_eq!(app.snapshot().experience, 50);
    assert_eq!(app.snapshot().badge_count, 1);
    assert!(open_store(&dir).get(keys::IDENTITY).unwrap().is_none());
}

#[test]
fn test_fixed_actions_follow_reward_table() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = open_app(&dir);

    for key in ["up", "up", "down", "down", "left", "right", "left", "right", "b", "a"] {
        app.press_key(key).unwrap();
    }
    assert!(app.toggle_matrix_mode().unwrap().value);
    let joke = app.tell_joke().unwrap();
    assert!(!joke.value.is_empty());

    let snapshot = app.snapshot();
    assert_eq!(snapshot.experience, 112);
    let descriptions: Vec<_> = snapshot
        .activity_log
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Generated a cyberpunk joke",
            "Toggled Matrix mode",
            "Discovered the legendary Konami Code",
        ]
    );
}

#[test]
fn test_preferences_persist() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    {
        let mut app = open_app(&dir);
        assert_eq!(app.toggle_theme(), Theme::Light);
        app.set_language(Language::Hi);
    }

    let app = open_app(&dir);
    assert_eq!(app.preferences().theme(), Theme::Light);
    assert_eq!(app.preferences().language(), Language::Hi);
    assert_eq!(
        open_store(&dir).get(keys::THEME).unwrap().as_deref(),
        Some("light")
    );
}

#[tokio::test]
async fn test_memory_game_awards_once_at_completion() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = open_app(&dir);

    let started = app
        .start_memory_game_with(MemoryGame::with_deck(paired_deck()))
        .unwrap();
    assert!(started.iter().any(|e| matches!(
        e,
        ProgressEvent::AchievementUnlocked(u) if u.achievement.id == AchievementId::GamePlayer
    )));

    // Two mismatches, each concealed by the board's timer
    for second in [2, 4] {
        app.flip_card(0).unwrap();
        let rewarded = app.flip_card(second).unwrap();
        assert!(matches!(rewarded.value, FlipOutcome::Mismatched { .. }));
        assert!(rewarded.events.is_empty());
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let mut completions = 0;
    for pair in 0..8 {
        app.flip_card(pair * 2).unwrap();
        let rewarded = app.flip_card(pair * 2 + 1).unwrap();
        if let FlipOutcome::Completed { moves, xp, .. } = rewarded.value {
            completions += 1;
            assert_eq!(moves, 10);
            assert_eq!(xp, 80);
        } else {
            assert!(rewarded.events.is_empty());
        }
    }
    assert_eq!(completions, 1);
    assert!(matches!(app.flip_card(0).unwrap().value, FlipOutcome::Ignored));

    let snapshot = app.snapshot();
    assert_eq!(snapshot.experience, 80);
    assert_eq!(snapshot.total_games_played, 1);
    assert_eq!(snapshot.activity_log.len(), 1);
    assert_eq!(
        snapshot.activity_log[0].description,
        "Completed cyber memory challenge"
    );

    let stats = app.progress().state().game_stats();
    assert_eq!(stats.high_scores.get(MEMORY_GAME_ID), Some(&80));
    assert_eq!(stats.achievements, vec!["game-player".to_string()]);
    drop(app);

    let raw = open_store(&dir).get(keys::GAME_STATS).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["highScores"][MEMORY_GAME_ID], 80);
    assert_eq!(value["totalGamesPlayed"], 1);
}

#[tokio::test]
async fn test_restarting_board_is_not_a_new_game() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = open_app(&dir);

    app.start_memory_game().unwrap();
    app.new_memory_board().unwrap();
    app.new_memory_board_with(MemoryGame::with_deck(paired_deck()))
        .unwrap();
    assert_eq!(app.snapshot().total_games_played, 1);
    assert!(app.board().is_some_and(|b| b.with_game(|g| g.moves() == 0)));

    // Opening the game again does count
    app.close_board();
    assert!(app.flip_card(0).is_err());
    assert!(app.new_memory_board().is_err());
    app.start_memory_game().unwrap();
    assert_eq!(app.snapshot().total_games_played, 2);
    assert_eq!(app.snapshot().experience, 0);
}

#[test]
fn test_memory_game_without_runtime_fails_cleanly() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut app = open_app(&dir);

    let err = app.start_memory_game().unwrap_err();
    assert!(err.to_string().contains("memory game"));
    assert!(app.board().is_none());
    assert_eq!(app.snapshot().total_games_played, 0);
    assert!(open_store(&dir).get(keys::GAME_STATS).unwrap().is_none());
}

#[test]
fn test_fun_zone_rewards_persist() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    {
        let mut app = open_app(&dir);
        assert!(app.create_meme("   ", "").is_err());
        app.create_meme("hack the planet", "").unwrap();
        app.toggle_terminal_mode().unwrap();
        let script = app.run_prank(Prank::HackerScreen).unwrap();
        assert_eq!(script.value.len(), 8);
    }

    let app = open_app(&dir);
    assert_eq!(app.snapshot().experience, 5 + 15 + 5);
    assert_eq!(
        app.snapshot().activity_log[0].description,
        "Activated fake hacker screen"
    );
    // Display modes are per session
    assert!(!app.display_modes().terminal());
}
