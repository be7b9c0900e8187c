//! Menu collaborator.
//!
//! The menu owns its own navigation state and the player-facing options
//! (volumes, FPS display, difficulty).  It never touches the simulation:
//! every choice that affects the game comes back as a [`MenuAction`] for
//! `compute` to carry out.
//!
//! | Screen     | Options                                      |
//! |------------|----------------------------------------------|
//! | Main       | Start Game, Difficulty, Settings, Quit       |
//! | Pause      | Resume, Settings, Main Menu, Quit            |
//! | Settings   | Music Volume, Sound Volume, Show FPS, Back   |
//! | Difficulty | Easy, Normal, Hard, Back                     |

use crate::entities::Difficulty;
use crate::geometry::Rect;
use crate::input::{InputEvent, MouseButton};

const MAIN_OPTIONS: [&str; 4] = ["Start Game", "Difficulty", "Settings", "Quit"];
const PAUSE_OPTIONS: [&str; 4] = ["Resume", "Settings", "Main Menu", "Quit"];
const SETTINGS_OPTIONS: [&str; 4] = ["Music Volume", "Sound Volume", "Show FPS", "Back"];
const DIFFICULTY_OPTIONS: [&str; 4] = ["Easy", "Normal", "Hard", "Back"];

pub const TRANSITION_MS: u64 = 300;
const VOLUME_STEP: u8 = 10;

// Option layout, world units.
const OPTION_WIDTH: i32 = 400;
const OPTION_HEIGHT: i32 = 60;
const OPTION_SPACING: i32 = 80;
const PLAY_BUTTON_WIDTH: i32 = 200;
const PLAY_BUTTON_HEIGHT: i32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Pause,
    Settings,
    Difficulty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    Resume,
    ReturnToMainMenu,
    ApplyDifficulty(Difficulty),
    Quit,
}

/// Screen-switch fade.  Progress is recomputed from `start_ms`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MenuAnimation {
    pub active: bool,
    pub progress: f32,
    pub start_ms: u64,
}

impl MenuAnimation {
    pub fn start(&mut self, now_ms: u64) {
        *self = MenuAnimation { active: true, progress: 0.0, start_ms: now_ms };
    }

    pub fn update(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        self.progress = (elapsed as f32 / TRANSITION_MS as f32).min(1.0);
        if self.progress >= 1.0 {
            self.active = false;
            self.progress = 0.0;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    pub active_menu: MenuScreen,
    pub selected_option: usize,
    /// 0 ..= 100
    pub music_volume: u8,
    /// 0 ..= 100
    pub sound_volume: u8,
    pub show_fps: bool,
    pub difficulty: Difficulty,
    pub animation: MenuAnimation,
}

impl Default for Menu {
    fn default() -> Self {
        Menu {
            active_menu: MenuScreen::Main,
            selected_option: 0,
            music_volume: 80,
            sound_volume: 80,
            show_fps: true,
            difficulty: Difficulty::Normal,
            animation: MenuAnimation::default(),
        }
    }
}

fn difficulty_index(d: Difficulty) -> usize {
    match d {
        Difficulty::Easy => 0,
        Difficulty::Normal => 1,
        Difficulty::Hard => 2,
    }
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_options(&self) -> &'static [&'static str] {
        match self.active_menu {
            MenuScreen::Main => &MAIN_OPTIONS,
            MenuScreen::Pause => &PAUSE_OPTIONS,
            MenuScreen::Settings => &SETTINGS_OPTIONS,
            MenuScreen::Difficulty => &DIFFICULTY_OPTIONS,
        }
    }

    /// Switch screens, highlight `selected`, and start the fade.
    pub fn open(&mut self, screen: MenuScreen, selected: usize, now_ms: u64) {
        self.active_menu = screen;
        self.selected_option = selected;
        self.animation.start(now_ms);
    }

    pub fn update_animation(&mut self, now_ms: u64) {
        self.animation.update(now_ms);
    }

    /// Hit-test rectangle of option `index` on the current screen.
    pub fn option_rect(&self, index: usize, screen_width: i32, screen_height: i32) -> Rect {
        let count = self.current_options().len() as i32;
        let first_y = screen_height / 2 - (count * OPTION_SPACING) / 2 + OPTION_SPACING / 2;
        Rect::new(
            (screen_width - OPTION_WIDTH) / 2,
            first_y + index as i32 * OPTION_SPACING,
            OPTION_WIDTH,
            OPTION_HEIGHT,
        )
    }

    /// `paused` tells the menu whether a game is suspended underneath it,
    /// which decides where the Back options lead.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        paused: bool,
        now_ms: u64,
        screen_width: i32,
        screen_height: i32,
    ) -> Option<MenuAction> {
        let count = self.current_options().len();
        match *event {
            InputEvent::KeyDown(key) if key.is_up() => {
                self.selected_option = (self.selected_option + count - 1) % count;
                None
            }
            InputEvent::KeyDown(key) if key.is_down() => {
                self.selected_option = (self.selected_option + 1) % count;
                None
            }
            InputEvent::KeyDown(key) if key.is_confirm() => self.select_option(paused, now_ms),
            InputEvent::KeyDown(key)
                if self.active_menu == MenuScreen::Settings && (key.is_left() || key.is_right()) =>
            {
                self.adjust_setting(key.is_right());
                None
            }
            InputEvent::MouseDown { button: MouseButton::Left, x, y } => {
                let hit = (0..count)
                    .find(|&i| self.option_rect(i, screen_width, screen_height).collidepoint(x, y))?;
                self.selected_option = hit;
                self.select_option(paused, now_ms)
            }
            _ => None,
        }
    }

    /// Adjust the highlighted setting: volumes step by 10 within 0..=100,
    /// the FPS flag toggles in either direction.
    pub fn adjust_setting(&mut self, increase: bool) {
        let step = |v: u8| {
            if increase {
                v.saturating_add(VOLUME_STEP).min(100)
            } else {
                v.saturating_sub(VOLUME_STEP)
            }
        };
        match self.selected_option {
            0 => self.music_volume = step(self.music_volume),
            1 => self.sound_volume = step(self.sound_volume),
            2 => self.show_fps = !self.show_fps,
            _ => {}
        }
    }

    /// Activate the highlighted option.
    pub fn select_option(&mut self, paused: bool, now_ms: u64) -> Option<MenuAction> {
        let back_to = if paused { MenuScreen::Pause } else { MenuScreen::Main };
        match (self.active_menu, self.selected_option) {
            (MenuScreen::Main, 0) => Some(MenuAction::StartGame),
            (MenuScreen::Main, 1) => {
                self.open(MenuScreen::Difficulty, difficulty_index(self.difficulty), now_ms);
                None
            }
            (MenuScreen::Main, 2) | (MenuScreen::Pause, 1) => {
                self.open(MenuScreen::Settings, 0, now_ms);
                None
            }
            (MenuScreen::Main, 3) | (MenuScreen::Pause, 3) => Some(MenuAction::Quit),
            (MenuScreen::Pause, 0) => Some(MenuAction::Resume),
            (MenuScreen::Pause, 2) => {
                self.open(MenuScreen::Main, 0, now_ms);
                Some(MenuAction::ReturnToMainMenu)
            }
            (MenuScreen::Settings, 3) => {
                self.open(back_to, 0, now_ms);
                None
            }
            (MenuScreen::Difficulty, 3) => {
                self.open(back_to, 1, now_ms);
                None
            }
            (MenuScreen::Difficulty, i) => {
                self.difficulty = match i {
                    0 => Difficulty::Easy,
                    1 => Difficulty::Normal,
                    _ => Difficulty::Hard,
                };
                Some(MenuAction::ApplyDifficulty(self.difficulty))
            }
            _ => None,
        }
    }
}

/// The Play button shown over the game-over screen, centred.
pub fn play_button_rect(screen_width: i32, screen_height: i32) -> Rect {
    let mut rect = Rect::new(0, 0, PLAY_BUTTON_WIDTH, PLAY_BUTTON_HEIGHT);
    rect.set_center(screen_width / 2, screen_height / 2 + 2 * PLAY_BUTTON_HEIGHT);
    rect
}
