use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use api_types::{
    category::Category,
    expense::{Expense, ExpenseNew},
};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    filter, ui,
};

mod delete;
pub use delete::DeleteFlow;

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Entry,
    Expenses,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "New expense",
            Self::Expenses => "Expenses",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Category,
    Establishment,
    Amount,
}

#[derive(Debug)]
pub struct EntryState {
    pub categories: Vec<Category>,
    /// Index into `categories`; `None` is the "no category" placeholder.
    pub selected_category: Option<usize>,
    pub establishment: String,
    pub amount: String,
    pub focus: EntryField,
    pub message: Option<String>,
}

impl Default for EntryState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            selected_category: None,
            establishment: String::new(),
            amount: String::new(),
            focus: EntryField::Category,
            message: None,
        }
    }
}

impl EntryState {
    fn select_next_category(&mut self) {
        if self.categories.is_empty() {
            return;
        }
        self.selected_category = match self.selected_category {
            None => Some(0),
            Some(idx) => Some((idx + 1).min(self.categories.len() - 1)),
        };
    }

    fn select_prev_category(&mut self) {
        self.selected_category = match self.selected_category {
            None | Some(0) => None,
            Some(idx) => Some(idx - 1),
        };
    }

    fn active_text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EntryField::Category => None,
            EntryField::Establishment => Some(&mut self.establishment),
            EntryField::Amount => Some(&mut self.amount),
        }
    }

    fn clear_form(&mut self) {
        self.selected_category = None;
        self.establishment.clear();
        self.amount.clear();
        self.focus = EntryField::Category;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpensesMode {
    List,
    Search,
}

#[derive(Debug)]
pub struct ExpensesState {
    pub items: Vec<Expense>,
    pub filtered: Vec<Expense>,
    pub query: String,
    pub selected: usize,
    pub mode: ExpensesMode,
    pub delete: DeleteFlow,
    pub error: Option<String>,
}

impl Default for ExpensesState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            selected: 0,
            mode: ExpensesMode::List,
            delete: DeleteFlow::default(),
            error: None,
        }
    }
}

impl ExpensesState {
    fn apply_filter(&mut self) {
        self.filtered = filter::filter_expenses(&self.query, &self.items);
        if self.selected >= self.filtered.len() {
            self.selected = self.filtered.len().saturating_sub(1);
        }
    }

    fn select_next(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.filtered.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.filtered.get(self.selected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub entry: EntryState,
    pub expenses: ExpensesState,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

pub struct App {
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state = AppState {
            screen: Screen::Entry,
            entry: EntryState::default(),
            expenses: ExpensesState::default(),
            toast: None,
            base_url: config.base_url,
        };

        Ok(Self {
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        // The entry screen is the landing screen; its picker needs the
        // category list before the first keystroke.
        self.load_categories().await;

        while !self.should_quit {
            self.expire_toast();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.state.toast
            && Instant::now() >= toast.expires_at
        {
            self.state.toast = None;
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match ui::keymap::map_key(key) {
            ui::keymap::AppAction::Quit => {
                self.should_quit = true;
                Ok(())
            }
            action => match self.state.screen {
                Screen::Entry => self.handle_entry_key(action).await,
                Screen::Expenses => self.handle_expenses_key(action).await,
            },
        }
    }

    async fn handle_entry_key(&mut self, action: ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Cancel => self.open_expenses().await,
            AppAction::NextField => {
                self.state.entry.focus = match self.state.entry.focus {
                    EntryField::Category => EntryField::Establishment,
                    EntryField::Establishment => EntryField::Amount,
                    EntryField::Amount => EntryField::Category,
                };
            }
            AppAction::Submit => self.submit_expense().await,
            AppAction::Backspace => {
                if let Some(field) = self.state.entry.active_text_field_mut() {
                    field.pop();
                }
            }
            AppAction::Up => {
                if self.state.entry.focus == EntryField::Category {
                    self.state.entry.select_prev_category();
                }
            }
            AppAction::Down => {
                if self.state.entry.focus == EntryField::Category {
                    self.state.entry.select_next_category();
                }
            }
            AppAction::Input(ch) => {
                if let Some(field) = self.state.entry.active_text_field_mut() {
                    field.push(ch);
                }
            }
            AppAction::Quit | AppAction::None => {}
        }

        Ok(())
    }

    async fn handle_expenses_key(&mut self, action: ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        // A staged deletion owns the keyboard until decided.
        if self.state.expenses.delete.pending_id().is_some() {
            match action {
                AppAction::Submit => self.confirm_delete().await,
                AppAction::Cancel => self.state.expenses.delete.cancel(),
                _ => {}
            }
            return Ok(());
        }

        if self.state.expenses.mode == ExpensesMode::Search {
            match action {
                AppAction::Input(ch) => {
                    self.state.expenses.query.push(ch);
                    self.state.expenses.apply_filter();
                }
                AppAction::Backspace => {
                    self.state.expenses.query.pop();
                    self.state.expenses.apply_filter();
                }
                AppAction::Submit | AppAction::Cancel => {
                    self.state.expenses.mode = ExpensesMode::List;
                }
                _ => {}
            }
            return Ok(());
        }

        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('/') => self.state.expenses.mode = ExpensesMode::Search,
            AppAction::Input('r') => self.load_expenses().await,
            AppAction::Input('n') => self.open_entry().await,
            AppAction::Input('d') => {
                if let Some(id) = self
                    .state
                    .expenses
                    .selected_expense()
                    .map(|expense| expense.id.clone())
                {
                    self.state.expenses.delete.stage(id);
                }
            }
            AppAction::Input('j') | AppAction::Down => self.state.expenses.select_next(),
            AppAction::Input('k') | AppAction::Up => self.state.expenses.select_prev(),
            AppAction::Cancel => self.open_entry().await,
            _ => {}
        }

        Ok(())
    }

    async fn open_entry(&mut self) {
        self.state.screen = Screen::Entry;
        if self.state.entry.categories.is_empty() {
            self.load_categories().await;
        }
    }

    async fn open_expenses(&mut self) {
        self.state.screen = Screen::Expenses;
        self.load_expenses().await;
    }

    async fn load_categories(&mut self) {
        match self.client.categories_list().await {
            Ok(categories) => {
                self.state.entry.categories = categories;
                self.state.entry.message = None;
            }
            Err(err) => {
                tracing::error!("failed to load categories: {err:?}");
                self.state.entry.message = Some(client_error_message(&err));
            }
        }
    }

    async fn load_expenses(&mut self) {
        match self.client.expenses_list().await {
            Ok(items) => {
                self.state.expenses.items = items;
                self.state.expenses.selected = 0;
                self.state.expenses.error = None;
                self.state.expenses.apply_filter();
            }
            Err(err) => {
                // The stale list stays on screen; the failure is surfaced
                // in the header instead of being swallowed.
                tracing::error!("failed to load expenses: {err:?}");
                self.state.expenses.error = Some(client_error_message(&err));
            }
        }
    }

    async fn submit_expense(&mut self) {
        let establishment = self.state.entry.establishment.trim().to_string();
        let amount = self.state.entry.amount.trim().to_string();
        let category = self
            .state
            .entry
            .selected_category
            .and_then(|idx| self.state.entry.categories.get(idx))
            .map(|category| category.name.clone());

        let Some(category) = category else {
            self.state.entry.message = Some("Preencha todos os campos.".to_string());
            return;
        };

        if establishment.is_empty() || amount.is_empty() {
            self.state.entry.message = Some("Preencha todos os campos.".to_string());
            return;
        }
        if !is_valid_amount(&amount) {
            self.state.entry.message = Some("Valor inválido.".to_string());
            return;
        }

        let request = ExpenseNew {
            category_name: category,
            establishment_name: establishment,
            amount,
        };

        match self.client.expense_create(&request).await {
            Ok(()) => {
                self.state.entry.clear_form();
                self.state.entry.message = None;
                self.toast(ToastLevel::Success, "Custo cadastrado com sucesso!");
            }
            Err(err) => {
                tracing::error!("failed to save expense: {err:?}");
                self.state.entry.message = Some("Ocorreu um erro ao salvar.".to_string());
            }
        }
    }

    async fn confirm_delete(&mut self) {
        let Some(id) = self.state.expenses.delete.confirm() else {
            return;
        };

        match self.client.expense_delete(&id).await {
            Ok(()) => {
                self.state.expenses.delete.finish();
                self.toast(ToastLevel::Success, "Custo excluído.");
                self.load_expenses().await;
            }
            Err(err) => {
                // No optimistic removal: the row is still there, so only
                // the failure is surfaced.
                self.state.expenses.delete.finish();
                tracing::error!("failed to delete expense {id}: {err:?}");
                self.toast(ToastLevel::Error, "Ocorreu um erro ao excluir.");
            }
        }
    }
}

fn is_valid_amount(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && value
            .parse::<f64>()
            .map(|parsed| parsed.is_finite())
            .unwrap_or(false)
}

fn client_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Status(status) => format!("Servidor recusou a operação ({status})."),
        ClientError::Transport(_) => "Servidor não acessível.".to_string(),
        ClientError::Decode(_) => "Resposta inválida do servidor.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, category: &str, establishment: &str) -> Expense {
        Expense {
            id: id.to_string(),
            category_name: category.to_string(),
            establishment_name: establishment.to_string(),
            amount: 10.0,
            create_dt: "2024-04-19T14:05:22.000Z".to_string(),
        }
    }

    #[test]
    fn amount_validation_requires_a_full_number() {
        assert!(is_valid_amount("12.50"));
        assert!(is_valid_amount(" 7 "));
        assert!(is_valid_amount("-3.2"));
        assert!(!is_valid_amount(""));
        assert!(!is_valid_amount("   "));
        assert!(!is_valid_amount("12abc"));
        assert!(!is_valid_amount("NaN"));
        assert!(!is_valid_amount("inf"));
    }

    #[test]
    fn apply_filter_clamps_selection() {
        let mut expenses = ExpensesState {
            items: vec![
                expense("1", "Food", "Padaria"),
                expense("2", "Transport", "Taxi"),
                expense("3", "Food", "Mercado"),
            ],
            selected: 2,
            ..ExpensesState::default()
        };
        expenses.apply_filter();
        assert_eq!(expenses.selected, 2);

        expenses.query = "taxi".to_string();
        expenses.apply_filter();
        assert_eq!(expenses.filtered.len(), 1);
        assert_eq!(expenses.selected, 0);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut expenses = ExpensesState::default();
        expenses.select_next();
        expenses.select_prev();
        assert_eq!(expenses.selected, 0);

        expenses.items = vec![expense("1", "Food", "Padaria"), expense("2", "Food", "Bar")];
        expenses.apply_filter();
        expenses.select_next();
        expenses.select_next();
        assert_eq!(expenses.selected, 1);
    }

    #[test]
    fn category_picker_walks_from_placeholder() {
        let mut entry = EntryState {
            categories: vec![
                Category {
                    id: 1,
                    name: "Alimentação".to_string(),
                },
                Category {
                    id: 2,
                    name: "Transporte".to_string(),
                },
            ],
            ..EntryState::default()
        };

        assert_eq!(entry.selected_category, None);
        entry.select_next_category();
        assert_eq!(entry.selected_category, Some(0));
        entry.select_next_category();
        entry.select_next_category();
        assert_eq!(entry.selected_category, Some(1));
        entry.select_prev_category();
        entry.select_prev_category();
        assert_eq!(entry.selected_category, None);
    }
}
