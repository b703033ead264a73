//! Game controller
//!
//! Owns the simulation state and everything around it: menu/pause/game-over
//! flow, the resume countdown, keyboard state, audio, settings and the high
//! score table. The host calls [`Game::update`] once per animation frame.

use crate::audio::{AudioManager, AudioSink, MusicTrack};
use crate::countdown::Countdown;
use crate::highscores::{self, HighScores};
use crate::platform::{KeyCommand, KeyboardState, Storage};
use crate::settings::Settings;
use crate::sim::{Arena, Difficulty, GameEvent, GamePhase, GameState, Opponent, Side, tick};

/// Single player (vs. AI) or two players on one keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

/// Outcome of a finished match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Side,
    pub winner_name: &'static str,
    pub left_score: u32,
    pub right_score: u32,
    /// Leaderboard rank if the win was recorded
    pub high_score_rank: Option<usize>,
}

impl GameResult {
    /// Text for the game-over screen
    pub fn message(&self) -> String {
        format!("{} Wins!", self.winner_name)
    }
}

/// Game instance holding all state
pub struct Game {
    state: GameState,
    mode: GameMode,
    keys: KeyboardState,
    countdown: Countdown,
    audio: AudioManager,
    settings: Settings,
    high_scores: HighScores,
    storage: Box<dyn Storage>,
    result: Option<GameResult>,
}

impl Game {
    /// Boot into the main menu
    pub fn new(seed: u64, arena: Arena, storage: Box<dyn Storage>, sink: Box<dyn AudioSink>) -> Self {
        let settings = Settings::load(storage.as_ref());
        let high_scores = HighScores::load(storage.as_ref());
        let mut audio = AudioManager::new(sink, settings.music_enabled, settings.sfx_enabled);
        audio.set_volume(settings.music_volume, settings.sfx_volume);
        audio.enter_menu();

        Self {
            state: GameState::new(seed, arena),
            mode: GameMode::SinglePlayer,
            keys: KeyboardState::new(),
            countdown: Countdown::default(),
            audio,
            settings,
            high_scores,
            storage,
            result: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Result of the last finished match (cleared when a new one starts)
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Countdown overlay text while resuming
    pub fn countdown_text(&self) -> Option<String> {
        self.countdown.display_text()
    }

    /// New arena bounds from the host
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Start a fresh match
    pub fn start(&mut self, mode: GameMode, difficulty: Difficulty) {
        let opponent = match mode {
            GameMode::SinglePlayer => Opponent::Ai(difficulty),
            GameMode::TwoPlayer => Opponent::Human,
        };
        if mode == GameMode::SinglePlayer && self.settings.difficulty != difficulty {
            self.settings.difficulty = difficulty;
            self.settings.save(self.storage.as_mut());
        }

        self.mode = mode;
        self.result = None;
        self.countdown.cancel();
        self.state.reset_match(opponent);
        self.state.phase = GamePhase::Playing;
        self.audio.start_game();
        log::info!(
            "Starting {:?} game ({:?}), seed {}",
            mode,
            opponent,
            self.state.seed
        );
    }

    /// Playing -> Paused
    pub fn pause(&mut self) {
        if self.state.phase == GamePhase::Playing {
            self.state.phase = GamePhase::Paused;
            self.audio.pause_game();
            log::info!("Paused");
        }
    }

    /// Start the 3-2-1 countdown; play continues when it finishes
    pub fn resume(&mut self) {
        if self.state.phase == GamePhase::Paused && !self.countdown.is_active() {
            self.countdown.start();
        }
    }

    /// Abandon the current match (or screen) and show the main menu
    pub fn exit_to_menu(&mut self) {
        self.countdown.cancel();
        self.state.phase = GamePhase::Menu;
        self.audio.exit_game();
    }

    /// Dismiss the game-over screen
    pub fn acknowledge_game_over(&mut self) {
        if self.state.phase == GamePhase::GameOver {
            self.state.phase = GamePhase::Menu;
            self.audio.enter_menu();
        }
    }

    pub fn toggle_music(&mut self) -> bool {
        let enabled = self.settings.toggle_music();
        self.settings.save(self.storage.as_mut());
        let track = match self.state.phase {
            GamePhase::Menu => Some(MusicTrack::Menu),
            GamePhase::Playing => Some(MusicTrack::Game),
            GamePhase::Paused | GamePhase::GameOver => None,
        };
        self.audio.set_music_enabled(enabled, track);
        enabled
    }

    pub fn toggle_sfx(&mut self) -> bool {
        let enabled = self.settings.toggle_sfx();
        self.settings.save(self.storage.as_mut());
        self.audio.set_sfx_enabled(enabled);
        enabled
    }

    pub fn key_down(&mut self, key: &str) {
        match self.keys.key_down(key) {
            Some(KeyCommand::Pause) => self.pause(),
            Some(KeyCommand::Confirm) => self.acknowledge_game_over(),
            None => {}
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Release all keys (window lost focus)
    pub fn release_keys(&mut self) {
        self.keys.clear();
    }

    /// One animation frame: advance the countdown, then tick the simulation
    pub fn update(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        if self.countdown.update(elapsed_ms) && self.state.phase == GamePhase::Paused {
            self.state.phase = GamePhase::Playing;
            self.audio.resume_game();
            log::info!("Resumed");
        }

        let events = tick(&mut self.state, &self.keys.tick_input());
        for event in &events {
            self.audio.on_event(event);
            if let GameEvent::GameOver(winner) = *event {
                self.finish(winner);
            }
        }
        events
    }

    /// End-of-game hook: record the result and any high score
    fn finish(&mut self, winner: Side) {
        let left_score = self.state.left.score;
        let human_won = self.mode == GameMode::SinglePlayer && winner == Side::Left;
        let high_score_rank = if human_won && self.high_scores.qualifies(left_score) {
            let rank = self.high_scores.add_score(left_score, highscores::today());
            self.high_scores.save(self.storage.as_mut());
            rank
        } else {
            None
        };

        let result = GameResult {
            winner,
            winner_name: self.state.display_name(winner),
            left_score,
            right_score: self.state.right.score,
            high_score_rank,
        };
        log::info!("{} ({}-{})", result.message(), result.left_score, result.right_score);
        self.result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tests::{AudioCall, RecordingAudio};
    use crate::platform::MemoryStorage;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Storage handle the test can inspect after the game takes ownership
    #[derive(Clone, Default)]
    struct SharedStorage(Rc<RefCell<MemoryStorage>>);

    impl Storage for SharedStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, crate::platform::StorageError> {
            self.0.borrow().get_item(key)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), crate::platform::StorageError> {
            self.0.borrow_mut().set_item(key, value)
        }
    }

    fn setup() -> (Game, SharedStorage, RecordingAudio) {
        let storage = SharedStorage::default();
        let audio = RecordingAudio::default();
        let game = Game::new(
            12345,
            Arena::new(800.0, 600.0),
            Box::new(storage.clone()),
            Box::new(audio.clone()),
        );
        (game, storage, audio)
    }

    /// Put the ball one frame away from scoring for `side`
    fn about_to_score(game: &mut Game, side: Side) {
        let r = game.state.ball.radius;
        let (x, vx) = match side {
            Side::Left => (800.0 - r - 0.5, 5.0),
            Side::Right => (r + 0.5, -5.0),
        };
        game.state.ball.pos = Vec2::new(x, 300.0);
        game.state.ball.vel = Vec2::new(vx, 0.0);
        // Keep both paddles out of the way
        game.state.left.y = 0.0;
        game.state.right.y = 0.0;
        game.state.opponent = match game.state.opponent {
            Opponent::Ai(_) => Opponent::Ai(Difficulty::Hard),
            other => other,
        };
    }

    #[test]
    fn test_boots_into_menu_with_menu_music() {
        let (game, _storage, audio) = setup();
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.state().seed, 12345);
        assert_eq!(
            audio.take(),
            vec![AudioCall::Volume(0.5, 1.0), AudioCall::Play(MusicTrack::Menu)]
        );
        assert!(game.high_scores().is_empty());
    }

    #[test]
    fn test_saved_volumes_reach_audio_backend() {
        let storage = SharedStorage::default();
        storage
            .0
            .borrow_mut()
            .set_item(Settings::STORAGE_KEY, r#"{"music_volume":0.1,"sfx_volume":3.0}"#)
            .unwrap();
        let audio = RecordingAudio::default();
        let game = Game::new(
            1,
            Arena::new(800.0, 600.0),
            Box::new(storage),
            Box::new(audio.clone()),
        );
        assert_eq!(game.settings().music_volume, 0.1);
        assert_eq!(audio.take().first(), Some(&AudioCall::Volume(0.1, 1.0)));
    }

    #[test]
    fn test_menu_does_not_tick() {
        let (mut game, _storage, _audio) = setup();
        let ball = game.state().ball.clone();
        game.key_down("w");
        for _ in 0..10 {
            assert!(game.update(16.0).is_empty());
        }
        assert_eq!(game.state().ball, ball);
    }

    #[test]
    fn test_start_resets_scores_and_plays() {
        let (mut game, _storage, _audio) = setup();
        game.state.left.score = 3;
        game.state.right.score = 2;
        game.start(GameMode::SinglePlayer, Difficulty::Hard);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!((game.state().left.score, game.state().right.score), (0, 0));
        assert_eq!(game.state().opponent, Opponent::Ai(Difficulty::Hard));
        assert_eq!(game.settings().difficulty, Difficulty::Hard);

        let pos = game.state().ball.pos;
        game.update(16.0);
        assert_ne!(game.state().ball.pos, pos);
    }

    #[test]
    fn test_keys_move_left_paddle() {
        let (mut game, _storage, _audio) = setup();
        game.start(GameMode::TwoPlayer, Difficulty::Medium);
        let y = game.state().left.y;
        game.key_down("S");
        game.update(16.0);
        assert_eq!(game.state().left.y, y + 6.0);
        game.key_up("s");
        game.update(16.0);
        assert_eq!(game.state().left.y, y + 6.0);
    }

    #[test]
    fn test_pause_and_countdown_resume() {
        let (mut game, _storage, audio) = setup();
        game.start(GameMode::SinglePlayer, Difficulty::Medium);
        audio.take();

        game.key_down("Escape");
        assert_eq!(game.phase(), GamePhase::Paused);
        assert_eq!(audio.take(), vec![AudioCall::Pause(MusicTrack::Game)]);

        let ball = game.state().ball.clone();
        game.resume();
        assert_eq!(game.countdown_text().as_deref(), Some("3"));
        for _ in 0..3 {
            assert!(game.update(700.0).is_empty());
            assert_eq!(game.phase(), GamePhase::Paused);
        }
        assert_eq!(game.countdown_text().as_deref(), Some("GO!"));
        assert_eq!(game.state().ball, ball);

        game.update(700.0);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.countdown_text(), None);
        assert!(audio.take().contains(&AudioCall::Play(MusicTrack::Game)));
        assert_ne!(game.state().ball.pos, ball.pos);
    }

    #[test]
    fn test_human_win_records_high_score() {
        let (mut game, storage, _audio) = setup();
        game.start(GameMode::SinglePlayer, Difficulty::Easy);
        game.state.left.score = 4;
        game.state.right.score = 2;
        about_to_score(&mut game, Side::Left);

        let events = game.update(16.0);
        assert!(events.contains(&GameEvent::GameOver(Side::Left)));
        assert_eq!(game.phase(), GamePhase::GameOver);

        let result = game.result().unwrap();
        assert_eq!(result.message(), "Player 1 Wins!");
        assert_eq!(result.high_score_rank, Some(1));
        assert_eq!(game.high_scores().top_score(), Some(5));

        // Persisted, and a fresh load sees it
        let reloaded = HighScores::load(&storage);
        assert_eq!(reloaded.top_score(), Some(5));
    }

    #[test]
    fn test_win_below_full_board_leaves_storage_alone() {
        let storage = SharedStorage::default();
        let board = r#"[ {"score": 9, "date": "1/1/2024"}, {"score": 9, "date": "1/2/2024"},
            {"score": 8, "date": "1/3/2024"}, {"score": 7, "date": "1/4/2024"},
            {"score": 6, "date": "1/5/2024"} ]"#;
        storage
            .0
            .borrow_mut()
            .set_item(HighScores::STORAGE_KEY, board)
            .unwrap();
        let mut game = Game::new(
            7,
            Arena::new(800.0, 600.0),
            Box::new(storage.clone()),
            Box::new(RecordingAudio::default()),
        );
        game.start(GameMode::SinglePlayer, game.settings().difficulty);
        game.state.left.score = 4;
        about_to_score(&mut game, Side::Left);

        game.update(16.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.result().unwrap().high_score_rank, None);
        assert_eq!(game.high_scores().top_score(), Some(9));
        assert_eq!(
            storage.get_item(HighScores::STORAGE_KEY).unwrap().as_deref(),
            Some(board)
        );
    }

    #[test]
    fn test_cpu_win_records_nothing() {
        let (mut game, storage, _audio) = setup();
        game.start(GameMode::SinglePlayer, Difficulty::Medium);
        game.state.right.score = 4;
        about_to_score(&mut game, Side::Right);

        game.update(16.0);
        assert_eq!(game.result().unwrap().message(), "CPU Wins!");
        assert!(game.high_scores().is_empty());
        assert!(storage.get_item(HighScores::STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_two_player_win_records_nothing() {
        let (mut game, _storage, _audio) = setup();
        game.start(GameMode::TwoPlayer, Difficulty::Medium);
        game.state.left.score = 4;
        about_to_score(&mut game, Side::Left);
        game.update(16.0);
        assert_eq!(game.result().unwrap().message(), "Player 1 Wins!");
        assert!(game.high_scores().is_empty());

        game.start(GameMode::TwoPlayer, Difficulty::Medium);
        assert!(game.result().is_none());
        game.state.right.score = 4;
        about_to_score(&mut game, Side::Right);
        game.update(16.0);
        assert_eq!(game.result().unwrap().message(), "Player 2 Wins!");
    }

    #[test]
    fn test_enter_returns_to_menu_after_game_over() {
        let (mut game, _storage, audio) = setup();
        game.start(GameMode::TwoPlayer, Difficulty::Medium);

        // Enter does nothing mid-game
        game.key_down("Enter");
        assert_eq!(game.phase(), GamePhase::Playing);

        game.state.right.score = 4;
        about_to_score(&mut game, Side::Right);
        game.update(16.0);
        audio.take();

        game.key_down("Enter");
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(audio.take(), vec![AudioCall::Play(MusicTrack::Menu)]);
    }

    #[test]
    fn test_exit_from_pause_cancels_countdown() {
        let (mut game, _storage, audio) = setup();
        game.start(GameMode::SinglePlayer, Difficulty::Medium);
        game.pause();
        game.resume();
        audio.take();

        game.exit_to_menu();
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(game.countdown_text(), None);
        assert_eq!(
            audio.take(),
            vec![AudioCall::Stop(MusicTrack::Game), AudioCall::Play(MusicTrack::Menu)]
        );

        game.update(5_000.0);
        assert_eq!(game.phase(), GamePhase::Menu);
    }

    #[test]
    fn test_toggles_persist() {
        let (mut game, storage, audio) = setup();
        audio.take();
        assert!(!game.toggle_music());
        assert!(!game.toggle_sfx());
        assert_eq!(
            audio.take(),
            vec![AudioCall::Pause(MusicTrack::Menu), AudioCall::Pause(MusicTrack::Game)]
        );

        let settings = Settings::load(&storage);
        assert!(!settings.music_enabled && !settings.sfx_enabled);

        assert!(game.toggle_music());
        assert_eq!(audio.take(), vec![AudioCall::Play(MusicTrack::Menu)]);
    }

    #[test]
    fn test_corrupt_storage_still_boots() {
        let storage = SharedStorage::default();
        storage
            .0
            .borrow_mut()
            .set_item(HighScores::STORAGE_KEY, "{{{")
            .unwrap();
        let game = Game::new(
            1,
            Arena::new(800.0, 600.0),
            Box::new(storage),
            Box::new(RecordingAudio::default()),
        );
        assert!(game.high_scores().is_empty());
        assert_eq!(game.settings(), &Settings::default());
    }
}
