//! Screen state machine
//!
//! ```text
//! LoggedOut --login--> LoggedIn(Feed) <--navigate--> LoggedIn(Upload)
//! LoggedIn(*) --logout--> LoggedOut
//! LoggedIn(Feed) --deleted--> LoggedIn(Feed)
//! LoggedIn(Upload) --shared--> LoggedIn(Feed)
//! ```

use crate::session::Session;

/// Screens available to a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Feed,
    Upload,
}

/// What a UI session is looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    LoggedOut,
    LoggedIn(Page),
}

/// User actions and backend outcomes that move between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    LoginSucceeded,
    Logout,
    Navigate(Page),
    DeleteSucceeded,
    ShareSucceeded,
}

impl Screen {
    /// Landing screen for a session: the feed when signed in
    pub fn for_session(session: &Session) -> Self {
        if session.is_authenticated() {
            Screen::LoggedIn(Page::Feed)
        } else {
            Screen::LoggedOut
        }
    }

    /// Next screen after `event`; events that do not apply leave the screen as is
    pub fn apply(self, event: Event) -> Self {
        match (self, event) {
            (Screen::LoggedOut, Event::LoginSucceeded) => Screen::LoggedIn(Page::Feed),
            (Screen::LoggedIn(_), Event::Logout) => Screen::LoggedOut,
            (Screen::LoggedIn(_), Event::Navigate(page)) => Screen::LoggedIn(page),
            (Screen::LoggedIn(Page::Feed), Event::DeleteSucceeded) => Screen::LoggedIn(Page::Feed),
            (Screen::LoggedIn(Page::Upload), Event::ShareSucceeded) => {
                Screen::LoggedIn(Page::Feed)
            }
            (screen, _) => screen,
        }
    }

    /// Route rendering this screen
    pub fn path(self) -> &'static str {
        match self {
            Screen::LoggedOut => "/login",
            Screen::LoggedIn(Page::Feed) => "/",
            Screen::LoggedIn(Page::Upload) => "/upload",
        }
    }
}
