pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

const TICK_RATE_MS: u64 = 250;
const AGE_STEP: i8 = 5;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(anyhow::Error::from(e));
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match app.screen {
            app::Screen::Menu => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down => app.next_tool(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_tool(),
                KeyCode::Enter => app.open_selected_tool(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            app::Screen::Disc => match key.code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Esc | KeyCode::Backspace => app.back_to_menu(),
                KeyCode::Char('j') | KeyCode::Down => app.next_question(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_question(),
                KeyCode::Char(c @ '1'..='5') => {
                    if let Some(value) = c.to_digit(10) {
                        app.answer_selected(value as u8);
                    }
                }
                KeyCode::Enter => app.show_disc_result(),
                KeyCode::Char('r') => app.reset_disc(),
                KeyCode::Char('o') => app.open_cta(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
            app::Screen::Income => match key.code {
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Esc | KeyCode::Backspace => app.back_to_menu(),
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.next_field(),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.previous_field(),
                KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => app.adjust_field(true),
                KeyCode::Char('h') | KeyCode::Left => app.adjust_field(false),
                KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_age_by(AGE_STEP),
                KeyCode::Char('-') => app.adjust_age_by(-AGE_STEP),
                KeyCode::Char('u') => app.start_contact_input(),
                KeyCode::Char('o') => app.open_cta(),
                KeyCode::Char('?') => app.show_help(),
                _ => {}
            },
        },
        app::InputMode::ContactInput => match key.code {
            KeyCode::Enter => app.confirm_contact_input(),
            KeyCode::Esc => app.cancel_contact_input(),
            KeyCode::Backspace => {
                app.contact_input.pop();
            }
            KeyCode::Char(c) if !c.is_control() => app.contact_input.push(c),
            // Swallow everything else while typing
            _ => {}
        },
        app::InputMode::DiscResult => match key.code {
            KeyCode::Char('o') => app.open_cta(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => app.dismiss_disc_result(),
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
