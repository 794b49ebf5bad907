//! Admin screen state machine.
//!
//! Every store-backed action is split in two: `begin_*` checks the guard
//! conditions and marks the action pending, `finish_*` applies the store's
//! answer. The TUI runs the store call in between on a background task;
//! `AdminPanel` chains the three steps for callers that can simply await.

use std::collections::HashSet;

use tracing::{info, warn};

use super::collection::{Collection, Patch};
use super::forms::{parse_sort_edit, DestinationForm, EntityForm, HotelForm, PackageForm};
use super::messages::{error_message, success_message, AdminAction, LOAD_ERROR, RESET_PARTIAL_SUFFIX,
    RESET_RELOAD_SUFFIX,
};
use crate::api::StoreError;
use crate::auth::{AdminCredentials, AdminSession, AuthState, LoginError};
use crate::catalog::{Catalog, CatalogEntity, CatalogSnapshot};
use crate::models::{Destination, Hotel, Package};

/// Banner shown above the admin lists until dismissed or replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Success(text) | Banner::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }
}

/// Per-kind admin state: committed list, create form and pending flags.
#[derive(Debug)]
pub struct KindState<E: Editable> {
    pub collection: Collection<E>,
    pub form: E::Form,
    pub creating: bool,
    pub resetting: bool,
    /// Ids with a delete or reorder save in flight
    pub busy: HashSet<String>,
}

impl<E: Editable> Default for KindState<E> {
    fn default() -> Self {
        Self {
            collection: Collection::default(),
            form: E::Form::default(),
            creating: false,
            resetting: false,
            busy: HashSet::new(),
        }
    }
}

/// A catalog entity the admin screen can create and manage.
pub trait Editable: CatalogEntity {
    type Form: EntityForm<Draft = Self::Draft>;

    fn slot(state: &AdminState) -> &KindState<Self>;
    fn slot_mut(state: &mut AdminState) -> &mut KindState<Self>;
}

impl Editable for Package {
    type Form = PackageForm;

    fn slot(state: &AdminState) -> &KindState<Self> {
        &state.packages
    }

    fn slot_mut(state: &mut AdminState) -> &mut KindState<Self> {
        &mut state.packages
    }
}

impl Editable for Hotel {
    type Form = HotelForm;

    fn slot(state: &AdminState) -> &KindState<Self> {
        &state.hotels
    }

    fn slot_mut(state: &mut AdminState) -> &mut KindState<Self> {
        &mut state.hotels
    }
}

impl Editable for Destination {
    type Form = DestinationForm;

    fn slot(state: &AdminState) -> &KindState<Self> {
        &state.destinations
    }

    fn slot_mut(state: &mut AdminState) -> &mut KindState<Self> {
        &mut state.destinations
    }
}

pub struct AdminState {
    session: AdminSession,
    credentials: AdminCredentials,
    pub packages: KindState<Package>,
    pub hotels: KindState<Hotel>,
    pub destinations: KindState<Destination>,
    pub banner: Option<Banner>,
    pub loading: bool,
}

impl AdminState {
    pub fn new(session: AdminSession, credentials: AdminCredentials) -> Self {
        Self {
            session,
            credentials,
            packages: KindState::default(),
            hotels: KindState::default(),
            destinations: KindState::default(),
            banner: None,
            loading: false,
        }
    }

    pub fn kind<E: Editable>(&self) -> &KindState<E> {
        E::slot(self)
    }

    pub fn kind_mut<E: Editable>(&mut self) -> &mut KindState<E> {
        E::slot_mut(self)
    }

    // ===== Auth =====

    pub fn auth_state(&self) -> AuthState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn username(&self) -> Option<&str> {
        self.session.username()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), LoginError> {
        self.session.login(&self.credentials, username, password)
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.banner = None;
    }

    // ===== Banner =====

    fn succeed(&mut self, text: &str) {
        self.banner = Some(Banner::Success(text.to_string()));
    }

    fn fail(&mut self, text: impl Into<String>) {
        self.banner = Some(Banner::Error(text.into()));
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    // ===== Load =====

    pub fn begin_load(&mut self) -> bool {
        if self.loading || !self.is_authenticated() {
            return false;
        }
        self.loading = true;
        if self.banner.as_ref().is_some_and(Banner::is_error) {
            self.banner = None;
        }
        true
    }

    /// Replace every list with the fetched rows. On failure the lists are
    /// left as they were.
    pub fn finish_load(&mut self, result: Result<CatalogSnapshot, StoreError>) {
        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.packages.collection.apply(Patch::Replace(snapshot.packages));
                self.hotels.collection.apply(Patch::Replace(snapshot.hotels));
                self.destinations.collection.apply(Patch::Replace(snapshot.destinations));
            }
            Err(e) => {
                warn!(error = %e, "Admin load failed");
                self.fail(LOAD_ERROR);
            }
        }
    }

    // ===== Create =====

    /// Validate the form and mark the create pending. Returns the draft to
    /// submit, or None when nothing should be sent.
    pub fn begin_create<E: Editable>(&mut self) -> Option<E::Draft> {
        if !self.is_authenticated() || self.kind::<E>().creating {
            return None;
        }
        match self.kind::<E>().form.to_draft() {
            Ok(draft) => {
                self.kind_mut::<E>().creating = true;
                Some(draft)
            }
            Err(e) => {
                self.fail(e.to_string());
                None
            }
        }
    }

    /// The form is cleared only when the store accepted the entity.
    pub fn finish_create<E: Editable>(&mut self, result: Result<E, StoreError>) {
        let slot = self.kind_mut::<E>();
        slot.creating = false;
        match result {
            Ok(created) => {
                info!(table = E::KIND.table(), id = created.id(), "Admin created entity");
                slot.collection.apply(Patch::Insert(created));
                slot.form = E::Form::default();
                self.succeed(success_message(E::KIND, AdminAction::Create));
            }
            Err(_) => self.fail(error_message(E::KIND, AdminAction::Create)),
        }
    }

    // ===== Delete =====

    pub fn begin_delete<E: Editable>(&mut self, id: &str) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        self.kind_mut::<E>().busy.insert(id.to_string())
    }

    pub fn finish_delete<E: Editable>(&mut self, id: &str, result: Result<(), StoreError>) {
        let slot = self.kind_mut::<E>();
        slot.busy.remove(id);
        match result {
            Ok(()) => {
                slot.collection.apply(Patch::Remove(id.to_string()));
                self.succeed(success_message(E::KIND, AdminAction::Delete));
            }
            Err(_) => self.fail(error_message(E::KIND, AdminAction::Delete)),
        }
    }

    // ===== Reset =====

    pub fn begin_reset<E: Editable>(&mut self) -> bool {
        if !self.is_authenticated() || self.kind::<E>().resetting {
            return false;
        }
        self.kind_mut::<E>().resetting = true;
        true
    }

    /// On failure the list is kept as it was, even when the store table may
    /// already be empty; the banner says so. A reset whose rows were written
    /// but not read back is reported as done, with a reload hint.
    pub fn finish_reset<E: Editable>(&mut self, result: Result<Vec<E>, StoreError>) {
        let slot = self.kind_mut::<E>();
        slot.resetting = false;
        match result {
            Ok(fresh) => {
                slot.collection.apply(Patch::Replace(fresh));
                self.succeed(success_message(E::KIND, AdminAction::Reset));
            }
            Err(e) if e.rows_written() => {
                let text = format!(
                    "{} {}",
                    success_message(E::KIND, AdminAction::Reset),
                    RESET_RELOAD_SUFFIX
                );
                self.succeed(&text);
            }
            Err(e) if e.left_table_empty() => self.fail(format!(
                "{} {}",
                error_message(E::KIND, AdminAction::Reset),
                RESET_PARTIAL_SUFFIX
            )),
            Err(_) => self.fail(error_message(E::KIND, AdminAction::Reset)),
        }
    }

    // ===== Reorder =====

    pub fn edit_sort_order<E: Editable>(&mut self, id: &str, value: String) {
        self.kind_mut::<E>().collection.edit_sort_order(id, value);
    }

    /// The sort order to save for `id`, if a numeric edit is pending and no
    /// save for it is already in flight.
    pub fn begin_save_order<E: Editable>(&mut self, id: &str) -> Option<i64> {
        if !self.is_authenticated() {
            return None;
        }
        let slot = self.kind_mut::<E>();
        let sort_order = slot.collection.pending_edit(id).and_then(parse_sort_edit)?;
        if !slot.busy.insert(id.to_string()) {
            return None;
        }
        Some(sort_order)
    }

    /// On failure the list and the pending edit are both kept.
    pub fn finish_save_order<E: Editable>(
        &mut self,
        id: &str,
        sort_order: i64,
        result: Result<E, StoreError>,
    ) {
        let slot = self.kind_mut::<E>();
        slot.busy.remove(id);
        match result {
            Ok(_) => {
                slot.collection.apply(Patch::SetSortOrder {
                    id: id.to_string(),
                    sort_order,
                });
                self.succeed(success_message(E::KIND, AdminAction::SaveOrder));
            }
            Err(_) => self.fail(error_message(E::KIND, AdminAction::SaveOrder)),
        }
    }
}

/// Admin state bound to a catalog, for callers that await each action.
pub struct AdminPanel {
    catalog: Catalog,
    pub state: AdminState,
}

impl AdminPanel {
    pub fn new(catalog: Catalog, state: AdminState) -> Self {
        Self { catalog, state }
    }

    pub async fn load_all(&mut self) {
        if self.state.begin_load() {
            let result = self.catalog.fetch_all().await;
            self.state.finish_load(result);
        }
    }

    pub async fn create<E: Editable>(&mut self) {
        if let Some(draft) = self.state.begin_create::<E>() {
            let result = self.catalog.add::<E>(&draft).await;
            self.state.finish_create(result);
        }
    }

    pub async fn delete<E: Editable>(&mut self, id: &str) {
        if self.state.begin_delete::<E>(id) {
            let result = self.catalog.delete::<E>(id).await;
            self.state.finish_delete::<E>(id, result);
        }
    }

    pub async fn reset<E: Editable>(&mut self) {
        if self.state.begin_reset::<E>() {
            let result = self.catalog.reset::<E>().await;
            self.state.finish_reset(result);
        }
    }

    pub async fn save_order<E: Editable>(&mut self, id: &str) {
        if let Some(sort_order) = self.state.begin_save_order::<E>(id) {
            let result = self.catalog.update_order::<E>(id, sort_order).await;
            self.state.finish_save_order(id, sort_order, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::admin::forms::HIGHLIGHTS_PLACEHOLDER;
    use crate::api::{MemoryStore, StoreOp};

    struct Fixture {
        _dir: tempfile::TempDir,
        store: Arc<MemoryStore>,
        panel: AdminPanel,
    }

    async fn signed_in() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(MemoryStore::new());
        let catalog = Catalog::new(store.clone());
        let state = AdminState::new(
            AdminSession::new(dir.path().to_path_buf()),
            AdminCredentials::default(),
        );
        let mut panel = AdminPanel::new(catalog, state);
        panel.state.login("admin", "admin123").unwrap();
        Fixture {
            _dir: dir,
            store,
            panel,
        }
    }

    fn titles(state: &AdminState) -> Vec<&str> {
        state
            .packages
            .collection
            .items()
            .iter()
            .map(|p| p.title.as_str())
            .collect()
    }

    #[tokio::test]
    async fn test_actions_ignored_until_signed_in() {
        let mut fx = signed_in().await;
        fx.panel.state.logout();
        assert_eq!(fx.panel.state.auth_state(), AuthState::Unauthenticated);

        fx.panel.reset::<Package>().await;
        assert_eq!(fx.store.row_count("packages"), 0);
        assert!(fx.panel.state.begin_create::<Package>().is_none());
    }

    #[tokio::test]
    async fn test_create_package_with_defaults_lands_last() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Package>().await;

        let form = &mut fx.panel.state.packages.form;
        form.title = "Test Package".into();
        form.description = "בדיקה".into();
        form.price_start = "0".into();
        form.sort_order = String::new();
        fx.panel.create::<Package>().await;

        let state = &fx.panel.state;
        let created = state.packages.collection.items().last().unwrap();
        assert_eq!(created.title, "Test Package");
        assert_eq!(created.sort_order, Some(999));
        assert_eq!(created.highlights, vec![HIGHLIGHTS_PLACEHOLDER]);
        assert_eq!(state.packages.form, PackageForm::default());
        assert_eq!(
            state.banner,
            Some(Banner::Success("חבילה נוספה בהצלחה".into()))
        );
    }

    #[tokio::test]
    async fn test_create_hotel_clamps_stars() {
        let mut fx = signed_in().await;

        for (input, expected) in [("0", 1), ("7", 5)] {
            let form = &mut fx.panel.state.hotels.form;
            form.name = format!("Hotel {}", input);
            form.stars = input.into();
            fx.panel.create::<Hotel>().await;

            let name = format!("Hotel {}", input);
            let hotel = fx
                .panel
                .state
                .hotels
                .collection
                .items()
                .iter()
                .find(|h| h.name == name)
                .cloned()
                .unwrap();
            assert_eq!(hotel.stars, expected);
        }
    }

    #[tokio::test]
    async fn test_validation_error_never_reaches_store() {
        let mut fx = signed_in().await;
        fx.store.fail(StoreOp::Insert);

        fx.panel.create::<Destination>().await;
        let state = &fx.panel.state;
        assert!(state.banner.as_ref().unwrap().is_error());
        assert!(!state.destinations.creating);
        assert_eq!(fx.store.row_count("destinations"), 0);
    }

    #[tokio::test]
    async fn test_failed_create_keeps_form() {
        let mut fx = signed_in().await;
        fx.store.fail(StoreOp::Insert);

        fx.panel.state.destinations.form.name = "קרבי".into();
        fx.panel.state.destinations.form.description = "צוקים".into();
        fx.panel.create::<Destination>().await;

        let state = &fx.panel.state;
        assert_eq!(state.destinations.form.name, "קרבי");
        assert_eq!(state.banner, Some(Banner::Error("שגיאה בהוספת יעד.".into())));
        assert!(state.destinations.collection.is_empty());
    }

    #[tokio::test]
    async fn test_two_saves_keep_last_value_and_clear_edit() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Package>().await;
        let id = fx.panel.state.packages.collection.items()[2].id.clone();

        fx.panel.state.edit_sort_order::<Package>(&id, "3".into());
        fx.panel.save_order::<Package>(&id).await;
        fx.panel.state.edit_sort_order::<Package>(&id, "1".into());
        fx.panel.save_order::<Package>(&id).await;

        let state = &fx.panel.state;
        assert_eq!(state.packages.collection.get(&id).unwrap().sort_order, Some(1));
        assert_eq!(state.packages.collection.pending_edit(&id), None);
        assert_eq!(state.banner, Some(Banner::Success("סדר עודכן".into())));
    }

    #[tokio::test]
    async fn test_save_for_missing_id_leaves_list_unchanged() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Hotel>().await;
        let before = fx.panel.state.hotels.collection.items().to_vec();

        fx.panel.state.edit_sort_order::<Hotel>("ghost", "1".into());
        fx.panel.save_order::<Hotel>("ghost").await;

        let state = &fx.panel.state;
        assert_eq!(state.hotels.collection.items(), before.as_slice());
        assert_eq!(state.hotels.collection.pending_edit("ghost"), Some("1"));
        assert!(state.banner.as_ref().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_non_numeric_edit_is_not_sent() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Package>().await;
        let id = fx.panel.state.packages.collection.items()[0].id.clone();
        fx.panel.state.dismiss_banner();

        fx.panel.state.edit_sort_order::<Package>(&id, "abc".into());
        fx.panel.save_order::<Package>(&id).await;
        assert_eq!(fx.panel.state.banner, None);
        assert_eq!(fx.panel.state.packages.collection.get(&id).unwrap().sort_order, Some(1));
    }

    #[tokio::test]
    async fn test_delete_removes_item_and_edit() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Package>().await;
        let id = fx.panel.state.packages.collection.items()[0].id.clone();
        fx.panel.state.edit_sort_order::<Package>(&id, "5".into());

        fx.panel.delete::<Package>(&id).await;
        let state = &fx.panel.state;
        assert!(state.packages.collection.get(&id).is_none());
        assert_eq!(state.packages.collection.pending_edit(&id), None);
        assert!(state.packages.busy.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_submissions_blocked_while_pending() {
        let mut fx = signed_in().await;
        let state = &mut fx.panel.state;
        state.hotels.form.name = "Amari".into();

        assert!(state.begin_create::<Hotel>().is_some());
        assert!(state.begin_create::<Hotel>().is_none());
        assert!(state.begin_reset::<Hotel>());
        assert!(!state.begin_reset::<Hotel>());
        assert!(state.begin_delete::<Hotel>("h1"));
        assert!(!state.begin_delete::<Hotel>("h1"));
    }

    #[tokio::test]
    async fn test_order_after_mixed_mutations() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Package>().await;

        fx.panel.state.packages.form.title = "Early".into();
        fx.panel.state.packages.form.description = "d".into();
        fx.panel.state.packages.form.sort_order = "2".into();
        fx.panel.create::<Package>().await;

        assert_eq!(
            titles(&fx.panel.state),
            ["ירח דבש רומנטי", "תאילנד למשפחות", "Early", "פול מון ואדרנלין"]
        );

        let last = fx.panel.state.packages.collection.items()[3].id.clone();
        fx.panel.state.edit_sort_order::<Package>(&last, "-1".into());
        fx.panel.save_order::<Package>(&last).await;
        assert_eq!(titles(&fx.panel.state)[0], "פול מון ואדרנלין");
    }

    #[tokio::test]
    async fn test_partial_reset_keeps_list_and_warns() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Destination>().await;
        let before = fx.panel.state.destinations.collection.items().to_vec();

        fx.store.fail(StoreOp::Insert);
        fx.panel.reset::<Destination>().await;

        let state = &fx.panel.state;
        assert_eq!(state.destinations.collection.items(), before.as_slice());
        let banner = state.banner.as_ref().unwrap();
        assert!(banner.is_error());
        assert!(banner.text().contains(RESET_PARTIAL_SUFFIX));
    }

    #[tokio::test]
    async fn test_unconfirmed_reset_is_not_reported_as_failure() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Hotel>().await;
        let before = fx.panel.state.hotels.collection.items().to_vec();

        assert!(fx.panel.state.begin_reset::<Hotel>());
        fx.panel.state.finish_reset::<Hotel>(Err(StoreError::ResetUnconfirmed {
            table: "hotels",
            source: Box::new(StoreError::InvalidResponse("missing id".into())),
        }));

        let state = &fx.panel.state;
        assert!(!state.hotels.resetting);
        assert_eq!(state.hotels.collection.items(), before.as_slice());
        let banner = state.banner.as_ref().unwrap();
        assert!(!banner.is_error());
        assert!(banner.text().contains(RESET_RELOAD_SUFFIX));
    }

    #[tokio::test]
    async fn test_load_failure_shows_error_and_keeps_lists() {
        let mut fx = signed_in().await;
        fx.panel.reset::<Hotel>().await;
        fx.store.fail(StoreOp::Select);

        fx.panel.load_all().await;
        let state = &fx.panel.state;
        assert_eq!(state.banner, Some(Banner::Error(LOAD_ERROR.into())));
        assert_eq!(state.hotels.collection.len(), 3);
        assert!(!state.loading);

        fx.store.recover(StoreOp::Select);
        fx.panel.load_all().await;
        assert_eq!(fx.panel.state.banner, None);
    }
}
