//! Terminal UI front end.
//!
//! Draws the current storefront snapshot every frame. Commands run as
//! spawned tasks so the screen keeps redrawing while requests are in flight;
//! their outcomes show up through storefront alerts.

use crate::actions::{self, Flow};
use crate::commands::{Command, parse_command};
use crate::render;
use anyhow::Result;
use car_store::{AlertKind, AppState, Page, Storefront, view};
use chrono::{DateTime, Utc};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Constraint, Flex, Layout, Margin, Position, Rect},
    style::{Style, Stylize},
    symbols::scrollbar,
    text::{Line, Span},
    widgets::{
        Block, Clear, List, ListDirection, ListItem, Padding, Paragraph, Scrollbar,
        ScrollbarOrientation, Wrap,
    },
};
use std::time::Duration;

mod widgets;

use widgets::{ScrollableList, UserInput};

const HELP: &str = "\
1 .. 5 (empty input)
        Switch page: catalog, garage, add car, favorites, login.
login USERNAME PASSWORD | register USERNAME EMAIL PASSWORD | logout
        Start or end a session.
filter make=.. body=.. fuel=.. trans=.. min=.. max=.. | reset | refresh
        Filter the catalog. Price bounds are inclusive.
garage add CAR_ID | garage remove CAR_ID
        Keep cars in the local comparison list.
fav CAR_ID
        Toggle a favorite. Needs a session.
reviews CAR_ID | reviews close
        Open or close the reviews panel for a car.
review RATING COMMENT
        Post a 1 to 5 star review for the open car.
review edit ID | review save RATING COMMENT | review cancel | review delete ID
        Change or remove one of your reviews.
add | edit CAR_ID | set FIELD VALUE | submit | delete CAR_ID
        Create, edit and delete listings.
";
const MAX_LOG_RECORDS: usize = 1024;
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Clone, Copy)]
enum RecordKind {
    Info,
    Error,
    You,
}

/// A timestamped log line
#[derive(Clone)]
struct Record {
    datetime: DateTime<Utc>,
    kind: RecordKind,
    content: String,
}

impl Record {
    fn new(kind: RecordKind, content: String) -> Self {
        Self {
            datetime: Utc::now(),
            kind,
            content,
        }
    }
}

impl From<Record> for ListItem<'_> {
    fn from(val: Record) -> Self {
        let repr = match val.kind {
            RecordKind::Info => "INFO".light_blue(),
            RecordKind::Error => "ERROR".light_red(),
            RecordKind::You => "YOU".light_green(),
        };

        let msg = vec![
            format!("[{} ", val.datetime.format("%H:%M:%S")).into(),
            Span::styled(format!("{repr:5}"), repr.style),
            format!("]: {}", val.content).into(),
        ];

        ListItem::new(Line::from(msg))
    }
}

/// Page selected by a number key
fn page_for_key(c: char) -> Option<Page> {
    match c {
        '1' => Some(Page::Catalog),
        '2' => Some(Page::Garage),
        '3' => Some(Page::AddCar),
        '4' => Some(Page::Favorites),
        '5' => Some(Page::Login),
        _ => None,
    }
}

/// TUI App state
pub struct TuiApp {
    storefront: Storefront,
    /// Last snapshot taken from the storefront
    state: AppState,
    /// Whether to display the help menu window
    show_help_menu: bool,
    /// Helps scroll through the help menu window if the terminal is small
    help_handle: ScrollableList,
    /// History of commands and alerts
    log_handle: ScrollableList,
    /// Current value of the input box
    user_input: UserInput,
    /// Destructive command waiting for a yes
    pending: Option<(Command, &'static str)>,
    /// Vertical scroll offset of the page body
    page_scroll: u16,
}

impl TuiApp {
    pub async fn new(storefront: Storefront) -> Self {
        let mut help_handle = ScrollableList::new(MAX_LOG_RECORDS);
        help_handle.push("".into());
        for line in HELP.lines() {
            help_handle.push(line.to_string().into());
        }
        help_handle.push("".into());
        help_handle.jump_to_first();

        let state = storefront.snapshot().await;
        Self {
            storefront,
            state,
            show_help_menu: false,
            help_handle,
            log_handle: ScrollableList::new(MAX_LOG_RECORDS),
            user_input: UserInput::new(),
            pending: None,
            page_scroll: 0,
        }
    }

    fn add_log(&mut self, kind: RecordKind, content: String) {
        let record = Record::new(kind, content);
        self.log_handle.push(record.into());
    }

    /// Run a command in the background
    fn spawn(&self, command: Command) {
        let storefront = self.storefront.clone();
        tokio::spawn(async move {
            // Failures reach the user as alerts
            let _ = actions::execute(&storefront, command).await;
        });
    }

    /// Handle a submitted input line
    ///
    /// # Returns
    ///
    /// * `true` - The user asked to quit
    fn handle_input(&mut self, input: &str) -> bool {
        if let Some((command, _)) = self.pending.take() {
            if matches!(input.trim(), "y" | "Y" | "yes") {
                self.add_log(RecordKind::You, input.to_string());
                self.spawn(command.confirmed());
            } else {
                self.add_log(RecordKind::Info, "Cancelled".to_string());
            }
            return false;
        }

        if input.trim().is_empty() {
            return false;
        }

        match parse_command(input) {
            Ok(Command::Quit) => return true,
            Ok(Command::Help) => self.show_help_menu = !self.show_help_menu,
            Ok(command) => {
                self.add_log(RecordKind::You, input.to_string());
                if let Some(question) = command.confirmation() {
                    self.pending = Some((command, question));
                } else {
                    self.page_scroll = 0;
                    self.spawn(command);
                }
            }
            Err(e) => self.add_log(RecordKind::Error, e.to_string()),
        }
        false
    }

    /// Pull fresh state and alerts from the storefront
    async fn sync(&mut self) {
        for alert in self.storefront.take_alerts().await {
            let kind = match alert.kind {
                AlertKind::Info => RecordKind::Info,
                AlertKind::Error => RecordKind::Error,
            };
            self.add_log(kind, alert.message);
        }
        self.state = self.storefront.snapshot().await;
    }

    fn draw_nav(&self, frame: &mut Frame, area: Rect) {
        let nav = view::render_nav(&self.state);
        let line = Line::from(render::nav_line(&nav)).bold();
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_page(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = render::page_lines(&self.state)
            .into_iter()
            .map(Line::from)
            .collect();
        let page = Paragraph::new(lines)
            .scroll((self.page_scroll, 0))
            .block(
                Block::bordered()
                    .padding(Padding::horizontal(1))
                    .title(format!(" {}  ", self.state.page)),
            );
        frame.render_widget(page, area);
    }

    fn draw_reviews(&self, frame: &mut Frame, area: Rect, lines: Vec<String>) {
        let lines: Vec<Line> = lines.into_iter().map(Line::from).collect();
        let reviews = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" reviews  "));
        frame.render_widget(reviews, area);
    }

    /// Render the log window with scrollbar
    fn draw_log(&mut self, frame: &mut Frame, area: Rect) {
        let log_records = self.log_handle.list_items.clone();
        let log_records = List::new(log_records)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" history  "));
        frame.render_stateful_widget(log_records, area, &mut self.log_handle.list_state);

        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .symbols(scrollbar::VERTICAL)
                .begin_symbol(None)
                .end_symbol(None),
            area.inner(Margin {
                vertical: 1,
                horizontal: 1,
            }),
            &mut self.log_handle.scroll_state,
        );
    }

    fn draw_user_input(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.pending {
            Some((_, question)) => format!(" {question} [y/N]  ").light_red(),
            None => " command  ".light_green(),
        };
        let user_input = Paragraph::new(self.user_input.value.as_str())
            .style(Style::default())
            .block(Block::bordered().title(title));
        frame.render_widget(user_input, area);
        frame.set_cursor_position(Position::new(
            area.x + self.user_input.char_idx as u16 + 1,
            area.y + 1,
        ));
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let help_message = vec![
            "press ".into(),
            "Tab".bold().white(),
            " for help, ".into(),
            "1-5".bold().white(),
            " to switch pages, ".into(),
            "PgUp/PgDn".bold().white(),
            " to scroll, ".into(),
            "Esc".bold().white(),
            " to exit".into(),
        ];
        frame.render_widget(Paragraph::new(Line::from(help_message)), area);
    }

    fn draw_help_menu(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Max(29)]).flex(Flex::Center);
        let horizontal = Layout::horizontal([Constraint::Max(92)]).flex(Flex::Center);
        let [help_menu_area] = vertical.areas(frame.area());
        let [help_menu_area] = horizontal.areas(help_menu_area);
        frame.render_widget(Clear, help_menu_area);

        let help_items = self.help_handle.list_items.clone();
        let help_items = List::new(help_items)
            .direction(ListDirection::BottomToTop)
            .block(Block::bordered().title(" commands  "));
        frame.render_stateful_widget(
            help_items,
            help_menu_area,
            &mut self.help_handle.list_state,
        );
    }

    fn draw(&mut self, frame: &mut Frame) {
        let window = Layout::vertical([
            Constraint::Length(1), // Nav bar
            Constraint::Min(6),    // Page (+ reviews)
            Constraint::Length(8), // Log
            Constraint::Length(3), // User input
            Constraint::Length(1), // Help bar
        ]);
        let [nav_area, main_area, log_area, user_input_area, help_area] =
            window.areas(frame.area());

        let reviews = render::reviews_lines(&view::render_reviews(&self.state));
        if reviews.is_empty() {
            self.draw_page(frame, main_area);
        } else {
            let [page_area, reviews_area] =
                Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .areas(main_area);
            self.draw_page(frame, page_area);
            self.draw_reviews(frame, reviews_area, reviews);
        }

        self.draw_nav(frame, nav_area);
        self.draw_log(frame, log_area);
        self.draw_user_input(frame, user_input_area);
        self.draw_help_bar(frame, help_area);

        if self.show_help_menu {
            self.draw_help_menu(frame);
        }
    }

    /// Run the TUI application until Esc or `quit`
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            self.sync().await;
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(POLL_TIMEOUT)?
                && let Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) = event::read()?
                && kind == KeyEventKind::Press
            {
                match modifiers {
                    KeyModifiers::CONTROL => match code {
                        KeyCode::Home => self.log_handle.jump_to_first(),
                        KeyCode::End => self.log_handle.jump_to_last(),
                        KeyCode::Char('c') => return Ok(()),
                        _ => {}
                    },
                    KeyModifiers::NONE | KeyModifiers::SHIFT => match code {
                        KeyCode::Enter => {
                            let user_input = self.user_input.submit();
                            if self.handle_input(&user_input) {
                                return Ok(());
                            }
                        }
                        KeyCode::Char(c)
                            if self.user_input.is_empty() && self.pending.is_none() =>
                        {
                            match page_for_key(c) {
                                Some(page) => {
                                    self.page_scroll = 0;
                                    self.spawn(Command::Show(page));
                                }
                                None => self.user_input.input(c),
                            }
                        }
                        KeyCode::Char(to_insert) => self.user_input.input(to_insert),
                        KeyCode::Backspace => self.user_input.backspace(),
                        KeyCode::Delete => self.user_input.delete(),
                        KeyCode::Left => self.user_input.move_left(),
                        KeyCode::Right => self.user_input.move_right(),
                        KeyCode::Up => {
                            if self.show_help_menu {
                                self.help_handle.move_up();
                            } else {
                                self.log_handle.move_up();
                            }
                        }
                        KeyCode::Down => {
                            if self.show_help_menu {
                                self.help_handle.move_down();
                            } else {
                                self.log_handle.move_down();
                            }
                        }
                        KeyCode::PageUp => self.page_scroll = self.page_scroll.saturating_sub(5),
                        KeyCode::PageDown => self.page_scroll = self.page_scroll.saturating_add(5),
                        KeyCode::Home => self.user_input.jump_to_first(),
                        KeyCode::End => self.user_input.jump_to_last(),
                        KeyCode::Tab => self.show_help_menu = !self.show_help_menu,
                        KeyCode::Esc => {
                            if self.show_help_menu {
                                self.show_help_menu = false;
                            } else {
                                return Ok(());
                            }
                        }
                        _ => {}
                    },
                    _ => {}
                }
            }
        }
    }
}
