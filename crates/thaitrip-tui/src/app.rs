//! Application state for the catalog TUI.
//!
//! `App` owns the service clients, the public read views, the advisor
//! transcript, the contact form and the admin state machine. Every network
//! call runs on a spawned task and reports back through one channel that
//! the main loop drains between frames.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use thaitrip_core::admin::{
    AdminState, DestinationForm, Editable, EntityForm, HotelForm, PackageForm,
};
use thaitrip_core::advisor::{AdvisorClient, Transcript};
use thaitrip_core::api::{MemoryStore, RemoteStore, RestStore, StoreError};
use thaitrip_core::auth::AdminSession;
use thaitrip_core::cache::CacheManager;
use thaitrip_core::catalog::{
    filter_packages, load_from_cache, load_or_defaults, Catalog, CatalogEntity, CatalogSnapshot,
    CatalogSource, CatalogView, EntityKind,
};
use thaitrip_core::config::Config;
use thaitrip_core::lead::{LeadClient, LeadError, LEAD_SUCCESS};
use thaitrip_core::models::{Destination, Hotel, LeadRequest, Package, TripFilter};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

const MAX_LOGIN_LENGTH: usize = 64;

/// Form fields, contact fields and the sort order input
const MAX_FIELD_LENGTH: usize = 500;

const MAX_CHAT_LENGTH: usize = 1000;

/// Contact form fields in display order. Index 3 is the traveller type
/// selector; the rest are free text.
pub const LEAD_LABELS: [&str; 7] = [
    "שם מלא",
    "טלפון",
    "אימייל",
    "סוג מטיילים",
    "תאריכים משוערים",
    "תקציב משוער",
    "הערות",
];

pub const LEAD_TYPE_FIELD: usize = 3;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Home,
    Packages,
    Hotels,
    Destinations,
    Advisor,
    Contact,
    Admin,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Home,
        Tab::Packages,
        Tab::Hotels,
        Tab::Destinations,
        Tab::Advisor,
        Tab::Contact,
        Tab::Admin,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "בית",
            Tab::Packages => "חבילות",
            Tab::Hotels => "מלונות",
            Tab::Destinations => "יעדים",
            Tab::Advisor => "יועץ AI",
            Tab::Contact => "צור קשר",
            Tab::Admin => "ניהול",
        }
    }

    /// Tab for a number key, 1-based
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)? as usize;
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Home => Tab::Packages,
            Tab::Packages => Tab::Hotels,
            Tab::Hotels => Tab::Destinations,
            Tab::Destinations => Tab::Advisor,
            Tab::Advisor => Tab::Contact,
            Tab::Contact => Tab::Admin,
            Tab::Admin => Tab::Home,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Home => Tab::Admin,
            Tab::Packages => Tab::Home,
            Tab::Hotels => Tab::Packages,
            Tab::Destinations => Tab::Hotels,
            Tab::Advisor => Tab::Destinations,
            Tab::Contact => Tab::Advisor,
            Tab::Admin => Tab::Contact,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    LoggingIn,
    ConfirmingQuit,
    ConfirmingReset,
    /// Typing into the admin create form
    EditingForm,
    /// Typing a new sort order for the selected admin row
    EditingSort,
    EditingContact,
    Chatting,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Outcome of the last contact form submission
#[derive(Debug, Clone, PartialEq)]
pub enum LeadStatus {
    Sent,
    Failed(String),
}

impl LeadStatus {
    pub fn text(&self) -> &str {
        match self {
            LeadStatus::Sent => LEAD_SUCCESS,
            LeadStatus::Failed(message) => message,
        }
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Store answer to one admin action
pub enum AdminResult<E> {
    Created(Result<E, StoreError>),
    Deleted(String, Result<(), StoreError>),
    Reset(Result<Vec<E>, StoreError>),
    OrderSaved(String, i64, Result<E, StoreError>),
}

/// Results sent from spawned tasks back to the main loop.
pub enum TaskResult {
    Packages(CatalogView<Package>),
    Hotels(CatalogView<Hotel>),
    AdvisorReply(String),
    LeadSent(Result<(), LeadError>),
    AdminLoaded(Result<CatalogSnapshot, StoreError>),
    AdminPackage(AdminResult<Package>),
    AdminHotel(AdminResult<Hotel>),
    AdminDestination(AdminResult<Destination>),
}

/// An admin-managed kind whose results can travel over the task channel.
pub trait AdminKind: Editable {
    fn wrap(result: AdminResult<Self>) -> TaskResult;
}

impl AdminKind for Package {
    fn wrap(result: AdminResult<Self>) -> TaskResult {
        TaskResult::AdminPackage(result)
    }
}

impl AdminKind for Hotel {
    fn wrap(result: AdminResult<Self>) -> TaskResult {
        TaskResult::AdminHotel(result)
    }
}

impl AdminKind for Destination {
    fn wrap(result: AdminResult<Self>) -> TaskResult {
        TaskResult::AdminDestination(result)
    }
}

/// Run a generic method for the entity kind selected on the admin tab.
macro_rules! with_admin_kind {
    ($app:expr, $method:ident ( $($arg:expr),* )) => {
        match $app.admin_kind {
            EntityKind::Package => $app.$method::<Package>($($arg),*),
            EntityKind::Hotel => $app.$method::<Hotel>($($arg),*),
            EntityKind::Destination => $app.$method::<Destination>($($arg),*),
        }
    };
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub cache: CacheManager,
    catalog: Catalog,
    lead_client: LeadClient,
    advisor: AdvisorClient,
    /// No store credentials: the catalog lives in memory for this run
    pub demo_mode: bool,

    // UI State
    pub state: AppState,
    pub current_tab: Tab,

    // Public read views
    pub packages: CatalogView<Package>,
    pub hotels: CatalogView<Hotel>,
    pub destinations: CatalogView<Destination>,
    pub packages_loading: bool,
    pub hotels_loading: bool,
    pub package_filter: TripFilter,

    // Selection indices
    pub package_selection: usize,
    pub hotel_selection: usize,
    pub destination_selection: usize,
    pub faq_selection: usize,

    // Advisor
    pub transcript: Transcript,
    pub advisor_input: String,

    // Contact form
    pub lead: LeadRequest,
    pub lead_field: usize,
    pub lead_sending: bool,
    pub lead_status: Option<LeadStatus>,

    // Admin
    pub admin: AdminState,
    pub admin_kind: EntityKind,
    pub admin_selection: usize,
    pub form_field: usize,
    pub sort_input: String,
    /// Row whose sort order is being typed, fixed when the edit starts
    sort_target: Option<String>,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Background task channel
    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,

    pub status_message: Option<String>,
}

fn empty_view<E>(source: CatalogSource) -> CatalogView<E> {
    CatalogView {
        items: Vec::new(),
        source,
        notice: None,
    }
}

impl App {
    pub fn new() -> Result<Self> {
        let mut config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };
        if !Config::exists() {
            // Leave an editable template behind on first run
            if let Err(e) = config.save() {
                warn!(error = %e, "Failed to write config template");
            }
        }
        config.apply_env();

        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        debug!(?cache_dir, "Cache directory configured");

        let (store, demo_mode): (Arc<dyn RemoteStore>, bool) = match config.store_endpoint() {
            Some((url, key)) => (Arc::new(RestStore::new(url, key)?), false),
            None => {
                info!("No store configured, running on an in-memory catalog");
                (Arc::new(MemoryStore::new()), true)
            }
        };

        Self::with_store(&config, cache_dir, store, demo_mode)
    }

    /// Build the app over an already chosen store
    pub fn with_store(
        config: &Config,
        cache_dir: PathBuf,
        store: Arc<dyn RemoteStore>,
        demo_mode: bool,
    ) -> Result<Self> {
        let cache = CacheManager::new(cache_dir.clone())?;

        let lead_client = LeadClient::new(config.webhook().map(str::to_string))?;
        let advisor = AdvisorClient::new(config.advisor_key().map(str::to_string))?;

        let mut session = AdminSession::new(cache_dir);
        if let Err(e) = session.load() {
            warn!(error = %e, "Ignoring unreadable admin session");
        }
        let admin = AdminState::new(session, config.admin_credentials());

        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            cache,
            catalog: Catalog::new(store),
            lead_client,
            advisor,
            demo_mode,

            state: AppState::Normal,
            current_tab: Tab::Home,

            packages: empty_view(CatalogSource::Remote),
            hotels: empty_view(CatalogSource::Remote),
            destinations: empty_view(CatalogSource::LocalCache),
            packages_loading: false,
            hotels_loading: false,
            package_filter: TripFilter::All,

            package_selection: 0,
            hotel_selection: 0,
            destination_selection: 0,
            faq_selection: 0,

            transcript: Transcript::default(),
            advisor_input: String::new(),

            lead: LeadRequest::default(),
            lead_field: 0,
            lead_sending: false,
            lead_status: None,

            admin,
            admin_kind: EntityKind::Package,
            admin_selection: 0,
            form_field: 0,
            sort_input: String::new(),
            sort_target: None,

            login_username: String::new(),
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,

            task_rx,
            task_tx,

            status_message: None,
        })
    }

    /// Kick off the initial loads
    pub fn start(&mut self) {
        self.refresh_catalog();
        if self.admin.is_authenticated() {
            self.admin_load();
        }
    }

    /// Helper to send task results, logging any channel errors
    async fn send_result(tx: &mpsc::Sender<TaskResult>, result: TaskResult) {
        if let Err(e) = tx.send(result).await {
            error!(error = %e, "Failed to send task result - channel closed");
        }
    }

    // ========================================================================
    // Public Catalog
    // ========================================================================

    /// Reload the public views. Packages and hotels come from the store;
    /// destinations come from the local cache.
    pub fn refresh_catalog(&mut self) {
        if !self.packages_loading {
            self.packages_loading = true;
            let catalog = self.catalog.clone();
            let tx = self.task_tx.clone();
            tokio::spawn(async move {
                let view = load_or_defaults::<Package>(&catalog).await;
                Self::send_result(&tx, TaskResult::Packages(view)).await;
            });
        }

        if !self.hotels_loading {
            self.hotels_loading = true;
            let catalog = self.catalog.clone();
            let tx = self.task_tx.clone();
            tokio::spawn(async move {
                let view = load_or_defaults::<Hotel>(&catalog).await;
                Self::send_result(&tx, TaskResult::Hotels(view)).await;
            });
        }

        self.destinations = load_from_cache(&self.cache);
        self.destination_selection =
            clamp_selection(self.destination_selection, self.destinations.items.len());
    }

    pub fn visible_packages(&self) -> Vec<&Package> {
        filter_packages(&self.packages.items, self.package_filter)
    }

    pub fn selected_package(&self) -> Option<&Package> {
        self.visible_packages().get(self.package_selection).copied()
    }

    pub fn set_package_filter(&mut self, filter: TripFilter) {
        self.package_filter = filter;
        self.package_selection = 0;
    }

    /// Cache age shown in the status bar
    pub fn cache_age(&self) -> Option<String> {
        self.cache.collection_age(EntityKind::Destination)
    }

    // ========================================================================
    // Advisor
    // ========================================================================

    pub fn send_advisor_message(&mut self) {
        let Some(prompt) = self.transcript.begin_send(&self.advisor_input) else {
            return;
        };
        self.advisor_input.clear();

        let advisor = self.advisor.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let reply = advisor.ask(&prompt).await;
            Self::send_result(&tx, TaskResult::AdvisorReply(reply)).await;
        });
    }

    // ========================================================================
    // Contact Form
    // ========================================================================

    pub fn lead_text(&self, index: usize) -> Option<&str> {
        let lead = &self.lead;
        match index {
            0 => Some(&lead.name),
            1 => Some(&lead.phone),
            2 => Some(&lead.email),
            4 => Some(&lead.dates),
            5 => Some(&lead.budget),
            6 => Some(&lead.notes),
            _ => None,
        }
    }

    pub fn lead_text_mut(&mut self, index: usize) -> Option<&mut String> {
        let lead = &mut self.lead;
        match index {
            0 => Some(&mut lead.name),
            1 => Some(&mut lead.phone),
            2 => Some(&mut lead.email),
            4 => Some(&mut lead.dates),
            5 => Some(&mut lead.budget),
            6 => Some(&mut lead.notes),
            _ => None,
        }
    }

    /// Send the contact form. The form is kept until the webhook accepts it.
    pub fn submit_lead(&mut self) {
        if self.lead_sending {
            return;
        }
        self.lead_sending = true;
        self.lead_status = None;

        let client = self.lead_client.clone();
        let lead = self.lead.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = client.submit(&lead).await;
            Self::send_result(&tx, TaskResult::LeadSent(result)).await;
        });
    }

    // ========================================================================
    // Admin Login
    // ========================================================================

    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = LoginFocus::Username;
        self.login_password.clear();
        self.login_error = None;
    }

    pub fn attempt_login(&mut self) {
        match self.admin.login(&self.login_username, &self.login_password) {
            Ok(()) => {
                self.login_password.clear();
                self.login_error = None;
                self.state = AppState::Normal;
                self.admin_load();
            }
            Err(e) => {
                self.login_error = Some(e.to_string());
                self.login_focus = LoginFocus::Password;
            }
        }
    }

    pub fn logout(&mut self) {
        self.admin.logout();
        self.login_username.clear();
        self.admin_selection = 0;
        self.status_message = Some("התנתקת מממשק הניהול".to_string());
    }

    // ========================================================================
    // Admin Actions
    // ========================================================================

    pub fn admin_load(&mut self) {
        if !self.admin.begin_load() {
            return;
        }
        let catalog = self.catalog.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = catalog.fetch_all().await;
            Self::send_result(&tx, TaskResult::AdminLoaded(result)).await;
        });
    }

    pub fn admin_len(&self) -> usize {
        with_admin_kind!(self, kind_len())
    }

    fn kind_len<E: AdminKind>(&self) -> usize {
        self.admin.kind::<E>().collection.len()
    }

    pub fn selected_admin_id(&self) -> Option<String> {
        with_admin_kind!(self, kind_selected_id())
    }

    fn kind_selected_id<E: AdminKind>(&self) -> Option<String> {
        self.admin
            .kind::<E>()
            .collection
            .items()
            .get(self.admin_selection)
            .map(|item| item.id().to_string())
    }

    pub fn admin_create(&mut self) {
        with_admin_kind!(self, spawn_create())
    }

    fn spawn_create<E: AdminKind>(&mut self) {
        let Some(draft) = self.admin.begin_create::<E>() else {
            return;
        };
        let catalog = self.catalog.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = catalog.add::<E>(&draft).await;
            Self::send_result(&tx, E::wrap(AdminResult::Created(result))).await;
        });
    }

    pub fn admin_delete_selected(&mut self) {
        if let Some(id) = self.selected_admin_id() {
            with_admin_kind!(self, spawn_delete(id))
        }
    }

    fn spawn_delete<E: AdminKind>(&mut self, id: String) {
        if !self.admin.begin_delete::<E>(&id) {
            return;
        }
        let catalog = self.catalog.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = catalog.delete::<E>(&id).await;
            Self::send_result(&tx, E::wrap(AdminResult::Deleted(id, result))).await;
        });
    }

    pub fn admin_reset(&mut self) {
        with_admin_kind!(self, spawn_reset())
    }

    fn spawn_reset<E: AdminKind>(&mut self) {
        if !self.admin.begin_reset::<E>() {
            return;
        }
        let catalog = self.catalog.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = catalog.reset::<E>().await;
            Self::send_result(&tx, E::wrap(AdminResult::Reset(result))).await;
        });
    }

    /// Save the pending sort order of the selected row
    pub fn admin_save_order(&mut self) {
        if let Some(id) = self.selected_admin_id() {
            with_admin_kind!(self, spawn_save_order(id))
        }
    }

    /// Save the row being edited, wherever it has moved to in the list
    pub fn commit_sort_edit(&mut self) {
        self.state = AppState::Normal;
        if let Some(id) = self.sort_target.take() {
            with_admin_kind!(self, spawn_save_order(id))
        }
    }

    /// Leave the input; the typed value stays as a pending edit
    pub fn cancel_sort_edit(&mut self) {
        self.state = AppState::Normal;
        self.sort_target = None;
    }

    fn spawn_save_order<E: AdminKind>(&mut self, id: String) {
        let Some(sort_order) = self.admin.begin_save_order::<E>(&id) else {
            return;
        };
        let catalog = self.catalog.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = catalog.update_order::<E>(&id, sort_order).await;
            Self::send_result(&tx, E::wrap(AdminResult::OrderSaved(id, sort_order, result))).await;
        });
    }

    // ===== Sort order input =====

    /// Start editing the selected row's sort order, seeded with the
    /// pending edit or the committed value.
    pub fn begin_sort_edit(&mut self) {
        let Some(id) = self.selected_admin_id() else {
            return;
        };
        self.sort_input = with_admin_kind!(self, current_sort_text(&id));
        self.sort_target = Some(id);
        self.state = AppState::EditingSort;
    }

    fn current_sort_text<E: AdminKind>(&self, id: &str) -> String {
        let collection = &self.admin.kind::<E>().collection;
        if let Some(pending) = collection.pending_edit(id) {
            return pending.to_string();
        }
        collection
            .get(id)
            .and_then(|item| item.sort_order())
            .map(|n| n.to_string())
            .unwrap_or_default()
    }

    /// Record the typed sort order as the edited row's pending edit
    pub fn sync_sort_edit(&mut self) {
        if let Some(id) = self.sort_target.clone() {
            let value = self.sort_input.clone();
            with_admin_kind!(self, store_sort_edit(&id, value))
        }
    }

    fn store_sort_edit<E: AdminKind>(&mut self, id: &str, value: String) {
        if self.admin.kind::<E>().collection.get(id).is_none() {
            debug!(id, "Edited row is gone, closing sort input");
            self.cancel_sort_edit();
            return;
        }
        self.admin.edit_sort_order::<E>(id, value);
    }

    // ===== Create form =====

    pub fn form_field_count(&self) -> usize {
        match self.admin_kind {
            EntityKind::Package => PackageForm::LABELS.len(),
            EntityKind::Hotel => HotelForm::LABELS.len(),
            EntityKind::Destination => DestinationForm::LABELS.len(),
        }
    }

    pub fn form_push_char(&mut self, c: char) {
        let field = self.form_field;
        with_admin_kind!(self, kind_form_push(field, c))
    }

    fn kind_form_push<E: AdminKind>(&mut self, field: usize, c: char) {
        let form = &mut self.admin.kind_mut::<E>().form;
        let len = form.text(field).map(|t| t.chars().count()).unwrap_or(0);
        if can_add_text_char(len, c) {
            form.push_char(field, c);
        }
    }

    pub fn form_backspace(&mut self) {
        let field = self.form_field;
        with_admin_kind!(self, kind_form_backspace(field))
    }

    fn kind_form_backspace<E: AdminKind>(&mut self, field: usize) {
        self.admin.kind_mut::<E>().form.backspace(field);
    }

    pub fn form_cycle(&mut self) {
        let field = self.form_field;
        with_admin_kind!(self, kind_form_cycle(field))
    }

    fn kind_form_cycle<E: AdminKind>(&mut self, field: usize) {
        self.admin.kind_mut::<E>().form.cycle(field);
    }

    pub fn set_admin_kind(&mut self, kind: EntityKind) {
        if self.admin_kind != kind {
            self.admin_kind = kind;
            self.admin_selection = 0;
            self.form_field = 0;
        }
    }

    // ========================================================================
    // Background Results
    // ========================================================================

    /// Drain completed background tasks and apply their results
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Packages(view) => {
                debug!(count = view.items.len(), source = ?view.source, "Packages loaded");
                self.packages_loading = false;
                self.packages = view;
                self.package_selection =
                    clamp_selection(self.package_selection, self.visible_packages().len());
            }
            TaskResult::Hotels(view) => {
                debug!(count = view.items.len(), source = ?view.source, "Hotels loaded");
                self.hotels_loading = false;
                self.hotels = view;
                self.hotel_selection = clamp_selection(self.hotel_selection, self.hotels.items.len());
            }
            TaskResult::AdvisorReply(reply) => {
                self.transcript.finish(reply);
            }
            TaskResult::LeadSent(result) => {
                self.lead_sending = false;
                match result {
                    Ok(()) => {
                        self.lead = LeadRequest::default();
                        self.lead_field = 0;
                        self.lead_status = Some(LeadStatus::Sent);
                    }
                    Err(e) => {
                        warn!(error = %e, "Lead submission failed");
                        self.lead_status = Some(LeadStatus::Failed(e.user_message()));
                    }
                }
            }
            TaskResult::AdminLoaded(result) => {
                self.admin.finish_load(result);
                self.admin_selection = clamp_selection(self.admin_selection, self.admin_len());
            }
            TaskResult::AdminPackage(result) => self.apply_admin_result(result),
            TaskResult::AdminHotel(result) => self.apply_admin_result(result),
            TaskResult::AdminDestination(result) => self.apply_admin_result(result),
        }
    }

    fn apply_admin_result<E: AdminKind>(&mut self, result: AdminResult<E>) {
        let reload = matches!(&result, AdminResult::Reset(Err(e)) if e.rows_written());
        match result {
            AdminResult::Created(result) => self.admin.finish_create(result),
            AdminResult::Deleted(id, result) => self.admin.finish_delete::<E>(&id, result),
            AdminResult::Reset(result) => self.admin.finish_reset(result),
            AdminResult::OrderSaved(id, sort_order, result) => {
                self.admin.finish_save_order(&id, sort_order, result)
            }
        }
        self.admin_selection = clamp_selection(self.admin_selection, self.admin_len());
        if reload {
            self.admin_load();
        }

        // Public views reflect accepted changes on their next fetch
        if self.admin.banner.as_ref().is_some_and(|b| !b.is_error())
            && E::KIND != EntityKind::Destination
        {
            self.refresh_catalog();
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Keep a selection index inside a list of `len` items
pub fn clamp_selection(selection: usize, len: usize) -> usize {
    selection.min(len.saturating_sub(1))
}

/// Move a selection by `delta`, clamped to the list
pub fn step_selection(selection: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = selection.saturating_add_signed(delta);
    moved.min(len - 1)
}

/// Check if a character is valid for text input (not a control character)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a login character should be accepted
pub fn can_add_login_char(current_len: usize, c: char) -> bool {
    current_len < MAX_LOGIN_LENGTH && is_valid_input_char(c)
}

/// Check if a form, contact or sort order character should be accepted
pub fn can_add_text_char(current_len: usize, c: char) -> bool {
    current_len < MAX_FIELD_LENGTH && is_valid_input_char(c)
}

/// Check if an advisor message character should be accepted
pub fn can_add_chat_char(current_len: usize, c: char) -> bool {
    current_len < MAX_CHAT_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tab Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tab_next() {
        assert_eq!(Tab::Home.next(), Tab::Packages);
        assert_eq!(Tab::Packages.next(), Tab::Hotels);
        assert_eq!(Tab::Hotels.next(), Tab::Destinations);
        assert_eq!(Tab::Destinations.next(), Tab::Advisor);
        assert_eq!(Tab::Advisor.next(), Tab::Contact);
        assert_eq!(Tab::Contact.next(), Tab::Admin);
        assert_eq!(Tab::Admin.next(), Tab::Home); // Wraps around
    }

    #[test]
    fn test_tab_prev() {
        assert_eq!(Tab::Home.prev(), Tab::Admin); // Wraps around
        for tab in Tab::ALL {
            assert_eq!(tab.next().prev(), tab);
        }
    }

    #[test]
    fn test_tab_from_digit() {
        assert_eq!(Tab::from_digit('1'), Some(Tab::Home));
        assert_eq!(Tab::from_digit('7'), Some(Tab::Admin));
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('8'), None);
        assert_eq!(Tab::from_digit('x'), None);
    }

    // -------------------------------------------------------------------------
    // Selection Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_step_selection() {
        assert_eq!(step_selection(0, -1, 3), 0);
        assert_eq!(step_selection(1, 1, 3), 2);
        assert_eq!(step_selection(2, 1, 3), 2);
        assert_eq!(step_selection(5, 10, 0), 0);
        assert_eq!(clamp_selection(4, 2), 1);
        assert_eq!(clamp_selection(4, 0), 0);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_login_char() {
        assert!(can_add_login_char(0, 'a'));
        assert!(can_add_login_char(63, 'ש'));
        assert!(!can_add_login_char(64, 'a'));
        assert!(!can_add_login_char(0, '\x00'));
        assert!(!can_add_login_char(0, '\n'));
        assert!(!can_add_login_char(0, '\t'));
    }

    #[test]
    fn test_can_add_text_and_chat_char() {
        assert!(can_add_text_char(499, 'א'));
        assert!(!can_add_text_char(500, 'א'));
        assert!(can_add_chat_char(999, '?'));
        assert!(!can_add_chat_char(1000, '?'));
        assert!(!can_add_chat_char(0, '\r'));
    }

    // -------------------------------------------------------------------------
    // Sort Edit Tests
    // -------------------------------------------------------------------------

    async fn signed_in_app(dir: &tempfile::TempDir) -> App {
        let store: Arc<dyn RemoteStore> = Arc::new(MemoryStore::new());
        let mut app =
            App::with_store(&Config::default(), dir.path().to_path_buf(), store, true).unwrap();
        app.catalog.reset::<Package>().await.unwrap();
        app.admin.login("admin", "admin123").unwrap();
        app.admin_load();
        settle_admin(&mut app).await;
        app
    }

    /// Process results until the next admin result has been applied
    async fn settle_admin(app: &mut App) {
        loop {
            let result = app.task_rx.recv().await.unwrap();
            let is_admin = !matches!(result, TaskResult::Packages(_) | TaskResult::Hotels(_));
            app.process_task_result(result);
            if is_admin {
                return;
            }
        }
    }

    fn package_order(app: &App, id: &str) -> Option<i64> {
        app.admin
            .kind::<Package>()
            .collection
            .get(id)
            .and_then(|p| p.sort_order)
    }

    #[tokio::test]
    async fn test_sort_edit_stays_on_its_row_when_list_reorders() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_in_app(&dir).await;
        let ids: Vec<String> = app
            .admin
            .kind::<Package>()
            .collection
            .items()
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids.len(), 3);

        // Move the first row to the end
        app.admin_selection = 0;
        app.begin_sort_edit();
        app.sort_input = "10".to_string();
        app.sync_sort_edit();
        app.commit_sort_edit();

        // Start editing the second row before that save lands
        app.admin_selection = 1;
        app.begin_sort_edit();
        assert_eq!(app.sort_input, "2");
        settle_admin(&mut app).await;
        assert_eq!(package_order(&app, &ids[0]), Some(10));

        // The list shifted under the cursor; typing still targets the same row
        app.sort_input.push('5');
        app.sync_sort_edit();
        app.commit_sort_edit();
        assert_eq!(app.state, AppState::Normal);
        settle_admin(&mut app).await;

        assert_eq!(package_order(&app, &ids[1]), Some(25));
        assert_eq!(package_order(&app, &ids[2]), Some(3));
        assert!(app.admin.kind::<Package>().collection.pending_edit(&ids[2]).is_none());
    }

    #[tokio::test]
    async fn test_sort_edit_closes_when_row_is_deleted() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = signed_in_app(&dir).await;
        let target = app.selected_admin_id().unwrap();

        app.begin_sort_edit();
        app.admin_delete_selected();
        settle_admin(&mut app).await;

        app.sort_input.push('7');
        app.sync_sort_edit();
        assert_eq!(app.state, AppState::Normal);
        assert!(app.admin.kind::<Package>().collection.get(&target).is_none());
        assert!(!app.admin.kind::<Package>().collection.has_pending_edits());
    }

    #[test]
    fn test_lead_status_text() {
        assert_eq!(LeadStatus::Sent.text(), LEAD_SUCCESS);
        assert_eq!(LeadStatus::Failed("x".into()).text(), "x");
        assert_eq!(LEAD_LABELS[LEAD_TYPE_FIELD], "סוג מטיילים");
    }
}
