use std::time::Instant;

use ratatui::widgets::{ListState, TableState};
use tracing::debug;

use crate::config::Config;
use crate::disc::DiscSession;
use crate::income::{Choice, IncomeSession};
use crate::tui::theme::ThemeColors;

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Disc,
    Income,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    ContactInput,
    DiscResult,
    Help,
}

/// Entries on the tool menu, in display order.
pub const TOOLS: [(Screen, &str, &str); 2] = [
    (
        Screen::Disc,
        "DISC 測驗",
        "快速掌握客戶溝通風格，提供保險情境的話術建議。",
    ),
    (
        Screen::Income,
        "一生該賺多少錢",
        "依據生活型態估算至少需要累積的收入與風險提醒。",
    ),
];

/// Calculator questions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeField {
    Age,
    WorkUntil,
    Family,
    Kids,
    Mortgage,
    BreakImpact,
    LifeCost,
}

impl IncomeField {
    pub const ALL: [IncomeField; 7] = [
        IncomeField::Age,
        IncomeField::WorkUntil,
        IncomeField::Family,
        IncomeField::Kids,
        IncomeField::Mortgage,
        IncomeField::BreakImpact,
        IncomeField::LifeCost,
    ];

    pub fn title(self) -> &'static str {
        match self {
            IncomeField::Age => "目前年齡",
            IncomeField::WorkUntil => "預計工作到幾歲？",
            IncomeField::Family => "目前家庭狀態",
            IncomeField::Kids => "小孩數量",
            IncomeField::Mortgage => "房貸狀態",
            IncomeField::BreakImpact => "收入中斷一年會如何？",
            IncomeField::LifeCost => "生活費級距",
        }
    }

    /// Kids and mortgage are only asked about for families with children.
    pub fn is_visible(self, session: &IncomeSession) -> bool {
        match self {
            IncomeField::Kids | IncomeField::Mortgage => session.profile.family.has_children(),
            _ => true,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub menu_state: ListState,
    pub disc: DiscSession,
    pub disc_table: TableState,
    pub income: IncomeSession,
    pub income_field: IncomeField,
    pub contact_input: String,
    pub cta_link: String,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(config: &Config, theme: ThemeColors) -> Self {
        let mut menu_state = ListState::default();
        menu_state.select(Some(0));
        let mut disc_table = TableState::default();
        disc_table.select(Some(0));

        Self {
            screen: Screen::Menu,
            input_mode: InputMode::Normal,
            menu_state,
            disc: DiscSession::new(config.questions()),
            disc_table,
            income: IncomeSession::new(config.estimator()),
            income_field: IncomeField::Age,
            contact_input: String::new(),
            cta_link: config.cta_link.clone(),
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    // Menu

    pub fn next_tool(&mut self) {
        let i = self.menu_state.selected().unwrap_or(0);
        self.menu_state.select(Some((i + 1) % TOOLS.len()));
    }

    pub fn previous_tool(&mut self) {
        let i = self.menu_state.selected().unwrap_or(0);
        self.menu_state.select(Some((i + TOOLS.len() - 1) % TOOLS.len()));
    }

    pub fn open_selected_tool(&mut self) {
        let i = self.menu_state.selected().unwrap_or(0);
        self.screen = TOOLS[i].0;
        self.input_mode = InputMode::Normal;
        debug!(screen = ?self.screen, "opened tool");
    }

    pub fn back_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.input_mode = InputMode::Normal;
    }

    // DISC questionnaire

    pub fn selected_question(&self) -> usize {
        self.disc_table.selected().unwrap_or(0)
    }

    pub fn next_question(&mut self) {
        let count = self.disc.question_count();
        if count == 0 {
            return;
        }
        let i = self.selected_question();
        let next = if i >= count - 1 { 0 } else { i + 1 };
        self.disc_table.select(Some(next));
    }

    pub fn previous_question(&mut self) {
        let count = self.disc.question_count();
        if count == 0 {
            return;
        }
        let i = self.selected_question();
        let prev = if i == 0 { count - 1 } else { i - 1 };
        self.disc_table.select(Some(prev));
    }

    /// Answer the selected question and move to the next one.
    pub fn answer_selected(&mut self, value: u8) {
        let index = self.selected_question();
        match self.disc.record_answer(index, value) {
            Ok(()) => {
                if index + 1 < self.disc.question_count() {
                    self.disc_table.select(Some(index + 1));
                }
                if self.disc.is_complete() {
                    self.show_flash("All answered. Press Enter for your result".to_string());
                }
            }
            Err(e) => self.show_flash(format!("Error: {}", e)),
        }
    }

    pub fn show_disc_result(&mut self) {
        if self.disc.is_complete() {
            self.input_mode = InputMode::DiscResult;
        } else {
            let remaining = self.disc.question_count() - self.disc.answered_count();
            self.show_flash(format!("{} questions left", remaining));
        }
    }

    pub fn dismiss_disc_result(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn reset_disc(&mut self) {
        // Answers are only ever added, so clearing starts a new session
        self.disc = DiscSession::new(self.disc.questions().to_vec());
        self.disc_table.select(Some(0));
        self.show_flash("Answers cleared".to_string());
    }

    // Lifetime income calculator

    pub fn visible_fields(&self) -> Vec<IncomeField> {
        IncomeField::ALL
            .into_iter()
            .filter(|f| f.is_visible(&self.income))
            .collect()
    }

    fn field_position(&self, fields: &[IncomeField]) -> usize {
        fields
            .iter()
            .position(|f| *f == self.income_field)
            .unwrap_or(0)
    }

    pub fn next_field(&mut self) {
        let fields = self.visible_fields();
        let i = self.field_position(&fields);
        self.income_field = fields[(i + 1) % fields.len()];
    }

    pub fn previous_field(&mut self) {
        let fields = self.visible_fields();
        let i = self.field_position(&fields);
        self.income_field = fields[(i + fields.len() - 1) % fields.len()];
    }

    /// Step the focused field forward (`forward`) or back.
    pub fn adjust_field(&mut self, forward: bool) {
        if self.income_field == IncomeField::Age {
            self.adjust_age_by(if forward { 1 } else { -1 });
            return;
        }

        let profile = &mut self.income.profile;
        match self.income_field {
            IncomeField::Age => {}
            IncomeField::WorkUntil => {
                profile.work_until = step(profile.work_until, forward);
            }
            IncomeField::Family => {
                profile.family = step(profile.family, forward);
            }
            IncomeField::Kids => {
                profile.kids = step(profile.kids, forward);
            }
            IncomeField::Mortgage => {
                profile.mortgage = step(profile.mortgage, forward);
            }
            IncomeField::BreakImpact => {
                profile.break_impact = step(profile.break_impact, forward);
            }
            IncomeField::LifeCost => {
                profile.life_cost = step(profile.life_cost, forward);
            }
        }

        // Focus may sit on a question that just got hidden
        if !self.income_field.is_visible(&self.income) {
            self.income_field = IncomeField::Family;
        }
    }

    pub fn adjust_age_by(&mut self, delta: i8) {
        if delta >= 0 {
            self.income.increase_age(delta as u8);
        } else {
            self.income.decrease_age(delta.unsigned_abs());
        }
    }

    pub fn start_contact_input(&mut self) {
        if self.income.contact.is_unlocked() {
            self.show_flash("Already unlocked".to_string());
            return;
        }
        self.input_mode = InputMode::ContactInput;
        self.contact_input.clear();
    }

    pub fn confirm_contact_input(&mut self) {
        if self.income.unlock(&self.contact_input) {
            self.show_flash("Unlocked: full analysis shown".to_string());
        } else {
            self.show_flash("Error: enter an email or phone number".to_string());
        }
        self.input_mode = InputMode::Normal;
        self.contact_input.clear();
    }

    pub fn cancel_contact_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.contact_input.clear();
    }

    // Shared

    pub fn open_cta(&mut self) {
        match crate::browser::open_url(&self.cta_link) {
            Ok(()) => self.show_flash(format!("Opened: {}", self.cta_link)),
            Err(e) => self.show_flash(format!("Failed to open browser: {}", e)),
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

fn step<C: Choice>(value: C, forward: bool) -> C {
    if forward {
        value.next()
    } else {
        value.prev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::income::{FamilyStatus, Kids, WorkUntil};

    fn app() -> App {
        App::new(&Config::default(), ThemeColors::dark())
    }

    #[test]
    fn test_menu_navigation_wraps() {
        let mut app = app();
        app.previous_tool();
        assert_eq!(app.menu_state.selected(), Some(1));
        app.next_tool();
        assert_eq!(app.menu_state.selected(), Some(0));
        app.open_selected_tool();
        assert_eq!(app.screen, Screen::Disc);
        app.back_to_menu();
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn test_answer_advances_cursor() {
        let mut app = app();
        app.answer_selected(4);
        assert_eq!(app.disc.answer(0), Some(4));
        assert_eq!(app.selected_question(), 1);
    }

    #[test]
    fn test_answer_last_question_keeps_cursor() {
        let mut app = app();
        app.previous_question();
        assert_eq!(app.selected_question(), 11);
        app.answer_selected(2);
        assert_eq!(app.selected_question(), 11);
    }

    #[test]
    fn test_result_only_when_complete() {
        let mut app = app();
        app.show_disc_result();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.flash_message.is_some());

        for _ in 0..12 {
            app.answer_selected(3);
        }
        assert!(app.disc.is_complete());
        app.show_disc_result();
        assert_eq!(app.input_mode, InputMode::DiscResult);
    }

    #[test]
    fn test_reset_starts_fresh_session() {
        let mut app = app();
        app.answer_selected(5);
        app.answer_selected(3);
        app.reset_disc();
        assert_eq!(app.disc.answered_count(), 0);
        assert_eq!(app.disc.totals().sum(), 0);
        assert_eq!(app.disc.question_count(), 12);
        assert_eq!(app.selected_question(), 0);
    }

    #[test]
    fn test_hidden_fields_skipped() {
        let mut app = app();
        assert_eq!(app.visible_fields().len(), 5);
        app.income_field = IncomeField::Family;
        app.next_field();
        assert_eq!(app.income_field, IncomeField::BreakImpact);

        app.income.profile.family = FamilyStatus::MarriedKids;
        assert_eq!(app.visible_fields().len(), 7);
        app.income_field = IncomeField::Family;
        app.next_field();
        assert_eq!(app.income_field, IncomeField::Kids);
    }

    #[test]
    fn test_adjust_fields() {
        let mut app = app();
        app.income_field = IncomeField::WorkUntil;
        app.adjust_field(true);
        assert_eq!(app.income.profile.work_until, WorkUntil::Age65);
        app.adjust_field(true);
        assert_eq!(app.income.profile.work_until, WorkUntil::Uncertain);

        app.income_field = IncomeField::Age;
        app.adjust_field(false);
        assert_eq!(app.income.profile.age, 29);
        app.adjust_age_by(10);
        assert_eq!(app.income.profile.age, 39);
        app.adjust_age_by(-30);
        assert_eq!(app.income.profile.age, 18);
    }

    #[test]
    fn test_focus_moves_off_hidden_field() {
        let mut app = app();
        app.income.profile.family = FamilyStatus::MarriedKids;
        app.income_field = IncomeField::Kids;
        app.adjust_field(true);
        assert_eq!(app.income.profile.kids, Kids::Two);

        // Switching family away from children hides the kids question
        app.income_field = IncomeField::Family;
        app.adjust_field(true);
        assert_eq!(app.income.profile.family, FamilyStatus::Single);
        assert_eq!(app.income_field, IncomeField::Family);
    }

    #[test]
    fn test_contact_input_flow() {
        let mut app = app();
        app.start_contact_input();
        assert_eq!(app.input_mode, InputMode::ContactInput);
        app.contact_input.push_str("   ");
        app.confirm_contact_input();
        assert!(!app.income.contact.is_unlocked());

        app.start_contact_input();
        app.contact_input.push_str("me@example.com");
        app.confirm_contact_input();
        assert!(app.income.contact.is_unlocked());
        assert_eq!(app.input_mode, InputMode::Normal);

        app.start_contact_input();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
