//! Application state management for the memegle TUI
//!
//! This module contains the main application state, handling keyboard input,
//! data loading, and state transitions between the home and search screens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::api::GifService;
use crate::config::DEFAULT_FETCH_COUNT;
use crate::data::GifImage;

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Landing screen with the project title and features
    Home,
    /// Search input plus result list
    Search,
}

/// Whether keystrokes go to the search input or the result list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Editing,
    Browsing,
}

/// A data load waiting for the main loop to run it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Trending,
    Search { keyword: String, page: u32 },
}

/// What the result list currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Nothing loaded yet
    Empty,
    /// Trending GIFs
    Trending,
    /// Keyword results, loaded page by page
    Keyword {
        keyword: String,
        /// Page to request when the user scrolls past the end
        next_page: u32,
        /// Set once a page came back short
        exhausted: bool,
    },
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Where keystrokes go on the search screen
    pub input_mode: InputMode,
    /// Text in the search input
    pub query: String,
    /// GIFs shown in the result list
    pub results: Vec<GifImage>,
    /// What `results` holds
    pub listing: Listing,
    /// Index of the selected result
    pub selected_index: usize,
    /// Load the main loop should perform next; shown as loading until it runs
    pub pending: Option<Request>,
    /// Last error shown in the status line
    pub status: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// GIPHY access
    service: GifService,
}

impl App {
    /// Creates a new App on the home screen
    pub fn new(service: GifService) -> Self {
        Self {
            state: AppState::Home,
            input_mode: InputMode::Editing,
            query: String::new(),
            results: Vec::new(),
            listing: Listing::Empty,
            selected_index: 0,
            pending: None,
            status: None,
            show_help: false,
            should_quit: false,
            service,
        }
    }

    /// Returns the currently selected GIF, if any
    pub fn selected_gif(&self) -> Option<&GifImage> {
        self.results.get(self.selected_index)
    }

    /// Switches to the search screen, loading trending GIFs the first time
    pub fn start_search(&mut self) {
        self.state = AppState::Search;
        self.input_mode = InputMode::Editing;
        if self.listing == Listing::Empty && self.pending.is_none() {
            self.pending = Some(Request::Trending);
        }
    }

    /// Queues a search for the current input; a blank input shows trending
    pub fn submit_query(&mut self) {
        let keyword = self.query.trim();
        self.pending = Some(if keyword.is_empty() {
            Request::Trending
        } else {
            Request::Search {
                keyword: keyword.to_string(),
                page: 0,
            }
        });
        self.input_mode = InputMode::Browsing;
    }

    /// Runs the pending load, if any, and applies its result
    pub async fn process_pending(&mut self) {
        let Some(request) = self.pending.take() else {
            return;
        };

        debug!(?request, "Loading GIFs");

        let result = match &request {
            Request::Trending => self.service.get_trending().await,
            Request::Search { keyword, page } => {
                self.service.search_by_keyword(keyword, *page).await
            }
        };

        match result {
            Ok(images) => self.apply_results(request, images),
            Err(e) => self.status = Some(format!("Failed to load GIFs: {e}")),
        }
    }

    /// Replaces or extends the result list with a finished load
    pub fn apply_results(&mut self, request: Request, images: Vec<GifImage>) {
        self.status = None;
        match request {
            Request::Trending => {
                self.results = images;
                self.listing = Listing::Trending;
                self.selected_index = 0;
            }
            Request::Search { keyword, page } => {
                let exhausted = images.len() < DEFAULT_FETCH_COUNT as usize;
                if page == 0 {
                    self.results = images;
                    self.selected_index = 0;
                } else {
                    self.results.extend(images);
                }
                self.listing = Listing::Keyword {
                    keyword,
                    next_page: page + 1,
                    exhausted,
                };
            }
        }
    }

    /// Handles keyboard input based on current state
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {} // Ignore other keys when help is shown
            }
            return;
        }

        match self.state {
            AppState::Home => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Enter | KeyCode::Char('s') => {
                    self.start_search();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            AppState::Search => match self.input_mode {
                InputMode::Editing => match key_event.code {
                    KeyCode::Enter => {
                        self.submit_query();
                    }
                    KeyCode::Esc | KeyCode::Down | KeyCode::Tab => {
                        self.input_mode = InputMode::Browsing;
                    }
                    KeyCode::Backspace => {
                        self.query.pop();
                    }
                    KeyCode::Char(c) => {
                        self.query.push(c);
                    }
                    _ => {}
                },
                InputMode::Browsing => match key_event.code {
                    KeyCode::Char('q') => {
                        self.should_quit = true;
                    }
                    KeyCode::Esc => {
                        self.state = AppState::Home;
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.move_selection_up();
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.move_selection_down();
                    }
                    KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => {
                        self.input_mode = InputMode::Editing;
                    }
                    KeyCode::Char('t') => {
                        self.pending = Some(Request::Trending);
                    }
                    KeyCode::Char('?') => {
                        self.show_help = true;
                    }
                    _ => {}
                },
            },
        }
    }

    /// Moves selection up, stopping at the first result
    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Moves selection down; reaching the last keyword result queues the next page
    fn move_selection_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        if self.selected_index + 1 < self.results.len() {
            self.selected_index += 1;
        }
        if self.selected_index + 1 == self.results.len() {
            self.request_next_page();
        }
    }

    /// Queues the next keyword page unless one is queued or the results ran out
    fn request_next_page(&mut self) {
        if self.pending.is_some() {
            return;
        }
        if let Listing::Keyword {
            keyword,
            next_page,
            exhausted: false,
        } = &self.listing
        {
            self.pending = Some(Request::Search {
                keyword: keyword.clone(),
                page: *next_page,
            });
        }
    }
}
