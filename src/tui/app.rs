use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::model::RuleSet;

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{ContactFormState, HelpState, draw_contact_form, draw_help};
use super::widgets::{NAV_TITLE, draw_nav_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The contact form and, once submitted, its summary.
    ContactForm,
    /// Show keybinding help.
    Help,
}

impl Screen {
    /// Human-readable screen name.
    pub fn label(self) -> &'static str {
        match self {
            Self::ContactForm => "Contact Form",
            Self::Help => "Help",
        }
    }
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    contact_form: ContactFormState,
    help: HelpState,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the [`Screen::ContactForm`] screen, validating with `rules`.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            screen: Screen::ContactForm,
            contact_form: ContactFormState::new(rules),
            help: HelpState::new(),
            should_quit: false,
        }
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Renders the nav bar and the current screen.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn draw(&self, frame: &mut Frame) {
        let [nav_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

        draw_nav_bar(NAV_TITLE, frame, nav_area);
        match self.screen {
            Screen::ContactForm => draw_contact_form(&self.contact_form, frame, body_area),
            Screen::Help => draw_help(&self.help, frame, body_area),
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT)
            && key.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.set_origin(self.screen);
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::ContactForm => self.contact_form.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the contact form screen state.
    pub fn contact_form(&self) -> &ContactFormState {
        &self.contact_form
    }
}
