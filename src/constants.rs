/// DOM element ids and class names bound by the front-end.
///
/// These must match `static/index.html`.
// Canvas and overlays
pub const CANVAS_ID: &str = "main-canvas";
pub const SUNSET_OVERLAY_ID: &str = "sunset-overlay";
pub const START_SCREEN_ID: &str = "start-screen";
pub const BEGIN_ACTIVITIES_ID: &str = "begin-activities-btn";
pub const BEGIN_STORY_ID: &str = "begin-story-btn";

// Header
pub const TITLE_ID: &str = "app-title";
pub const TIMER_DISPLAY_ID: &str = "timer-display";
pub const SESSION_ID_ID: &str = "session-id";
pub const HEADER_ID: &str = "header-area";
pub const NAV_BAR_ID: &str = "nav-bar";
pub const NAV_BUTTON_CLASS: &str = "nav-btn";

// Settings and quit confirmation
pub const SETTINGS_MODAL_ID: &str = "settings-modal";
pub const SETTINGS_CLOSE_ID: &str = "settings-close-btn";
pub const SETTING_BUTTON_SELECTOR: &str = ".setting-btn";
pub const PAUSE_BUTTON_ID: &str = "pause-btn";
pub const QUIT_BUTTON_ID: &str = "quit-btn";
pub const CONFIRM_MODAL_ID: &str = "confirm-modal";
pub const CONFIRM_QUIT_ID: &str = "confirm-quit-btn";
pub const CANCEL_QUIT_ID: &str = "cancel-quit-btn";
pub const MODAL_CLASS: &str = "modal-overlay";

// Parent gate
pub const MATHS_MODAL_ID: &str = "maths-challenge-modal";
pub const MATHS_QUESTION_ID: &str = "maths-question";
pub const MATHS_ANSWER_ID: &str = "maths-answer";
pub const MATHS_SUBMIT_ID: &str = "maths-submit-btn";
pub const MATHS_CANCEL_ID: &str = "maths-cancel-btn";
pub const MATHS_FEEDBACK_ID: &str = "maths-feedback";

// Admin overlay
pub const ADMIN_OVERLAY_ID: &str = "admin-overlay";
pub const ADMIN_SUNSET_ID: &str = "admin-sunset-btn";
pub const ADMIN_PREV_SCENE_ID: &str = "admin-prev-scene-btn";
pub const ADMIN_NEXT_SCENE_ID: &str = "admin-next-scene-btn";
pub const ADMIN_CLOSE_ID: &str = "admin-close-btn";

pub const SELECTED_CLASS: &str = "selected";
pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

/// Interval between timer ticks.
pub const TICK_INTERVAL_MS: i32 = 1_000;
/// Delay before the nav bar fades in after a session starts.
pub const NAV_FADE_IN_MS: i32 = 100;
/// Horizontal scroll per wheel notch in story mode, in CSS pixels.
pub const STORY_SCROLL_STEP: f32 = 40.0;
/// Frame deltas longer than this are logged as stalls.
pub const FRAME_STALL_MS: u128 = 250;
