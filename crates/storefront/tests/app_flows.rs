//! End-to-end flow tests: a full `App` over in-memory storage and
//! recording view fakes standing in for the page.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tienda_core::{Money, ProductId};
use tienda_storefront::app::App;
use tienda_storefront::config::StorefrontConfig;
use tienda_storefront::models::{Product, Theme};
use tienda_storefront::storage::{KeyValue, MemoryStore, Storage, StorageError, keys};
use tienda_storefront::views::{
    AuthAffordance, AuthPort, Bindings, CartPanelPort, CartPanelView, CheckoutPort, CheckoutView,
    DniFeedback, ProfilePort, ThemePort,
};

/// Records every port call the flows make.
#[derive(Default)]
struct FakePage {
    themes: RefCell<Vec<Theme>>,
    affordances: RefCell<Vec<AuthAffordance>>,
    login_errors: RefCell<Vec<String>>,
    modal_open: Cell<bool>,
    cart_renders: RefCell<Vec<CartPanelView>>,
    cart_visible: Cell<bool>,
    checkout_renders: RefCell<Vec<CheckoutView>>,
    emails: RefCell<Vec<String>>,
    avatars: RefCell<Vec<String>>,
    dni_feedback: RefCell<Vec<DniFeedback>>,
    warnings: RefCell<Vec<String>>,
    redirects: Cell<u32>,
}

impl FakePage {
    fn last_cart(&self) -> CartPanelView {
        self.cart_renders.borrow().last().unwrap().clone()
    }

    fn last_affordance(&self) -> AuthAffordance {
        self.affordances.borrow().last().unwrap().clone()
    }
}

impl ThemePort for FakePage {
    fn apply(&self, theme: Theme) {
        self.themes.borrow_mut().push(theme);
    }
}

impl AuthPort for FakePage {
    fn apply(&self, affordance: &AuthAffordance) {
        self.affordances.borrow_mut().push(affordance.clone());
    }

    fn show_login_modal(&self) {
        self.modal_open.set(true);
    }

    fn hide_login_modal(&self) {
        self.modal_open.set(false);
    }

    fn show_login_error(&self, message: &str) {
        self.login_errors.borrow_mut().push(message.to_owned());
    }
}

impl CartPanelPort for FakePage {
    fn render(&self, view: &CartPanelView) {
        self.cart_renders.borrow_mut().push(view.clone());
    }

    fn set_visible(&self, visible: bool) {
        self.cart_visible.set(visible);
    }

    fn is_visible(&self) -> bool {
        self.cart_visible.get()
    }
}

impl CheckoutPort for FakePage {
    fn render(&self, view: &CheckoutView) {
        self.checkout_renders.borrow_mut().push(view.clone());
    }
}

impl ProfilePort for FakePage {
    fn show_email(&self, email: &str) {
        self.emails.borrow_mut().push(email.to_owned());
    }

    fn show_avatar(&self, data_url: &str) {
        self.avatars.borrow_mut().push(data_url.to_owned());
    }

    fn show_dni_feedback(&self, feedback: &DniFeedback) {
        self.dni_feedback.borrow_mut().push(feedback.clone());
    }

    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_owned());
    }

    fn redirect_to_home(&self) {
        self.redirects.set(self.redirects.get() + 1);
    }
}

fn all_bindings(page: &Rc<FakePage>) -> Bindings {
    Bindings {
        theme: Some(page.clone()),
        auth: Some(page.clone()),
        cart: Some(page.clone()),
        checkout: Some(page.clone()),
        profile: Some(page.clone()),
    }
}

fn app_on(storage: &Storage, page: &Rc<FakePage>) -> App {
    App::new(
        &StorefrontConfig::default(),
        storage.clone(),
        all_bindings(page),
        None,
    )
}

fn product(id: &str, cents: i64) -> Product {
    Product::new(id, format!("Producto {id}"), Money::from_cents(cents), None)
}

#[test]
fn startup_renders_empty_cart_and_logged_out_control() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    let cart = page.last_cart();
    assert!(cart.lines.is_empty());
    assert!(cart.placeholder.is_some());
    assert_eq!(cart.total, "0.00");

    let affordance = page.last_affordance();
    assert_eq!(affordance.label, "Login");
    assert!(!affordance.logged_in);

    assert_eq!(page.themes.borrow().as_slice(), &[Theme::Light]);
}

#[test]
fn adding_twice_merges_lines_and_opens_panel() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    app.cart().add(product("p1", 1000)).unwrap();
    app.cart().add(product("p1", 1000)).unwrap();

    let cart = page.last_cart();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].quantity, 2);
    assert_eq!(cart.count, 2);
    assert_eq!(cart.total, "20.00");
    assert!(cart.trigger_active);
    assert!(page.cart_visible.get());
}

#[test]
fn cart_survives_restart_through_snapshot() {
    let storage = Storage::in_memory();
    {
        let page = Rc::new(FakePage::default());
        let app = app_on(&storage, &page);
        app.start();
        app.cart().add(product("p1", 550)).unwrap();
        app.cart().add(product("p2", 1000)).unwrap();
    }

    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.start();

    let cart = page.last_cart();
    assert_eq!(cart.lines.len(), 2);
    assert_eq!(cart.lines[0].id, ProductId::new("p1"));
    assert_eq!(cart.total, "15.50");
}

#[test]
fn decrementing_to_zero_removes_the_line() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    app.cart().add(product("p1", 1000)).unwrap();
    app.cart().increase(&ProductId::new("p1")).unwrap();
    app.cart().decrease(&ProductId::new("p1")).unwrap();
    app.cart().decrease(&ProductId::new("p1")).unwrap();

    let cart = page.last_cart();
    assert!(cart.lines.is_empty());
    assert!(cart.placeholder.is_some());
    assert!(!cart.trigger_active);
}

#[test]
fn panel_toggle_follows_reported_visibility() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    assert!(!page.cart_visible.get());
    app.cart().toggle();
    assert!(page.cart_visible.get());
    app.cart().toggle();
    assert!(!page.cart_visible.get());
}

#[test]
fn theme_toggle_twice_returns_to_persisted_original() {
    let storage = Storage::in_memory();
    storage.durable().set(keys::THEME, "dark").unwrap();

    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.start();
    assert_eq!(app.theme().current(), Theme::Dark);

    app.theme().toggle();
    app.theme().toggle();
    assert_eq!(app.theme().current(), Theme::Dark);
    assert_eq!(storage.durable().get(keys::THEME).unwrap(), "dark");
    assert_eq!(
        page.themes.borrow().as_slice(),
        &[Theme::Dark, Theme::Light, Theme::Dark]
    );
}

#[test]
fn login_flips_affordance_and_closes_modal() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    app.auth().open_login();
    assert!(page.modal_open.get());

    app.auth().submit_login("ana@example.com", "x").unwrap();
    assert!(!page.modal_open.get());

    let affordance = page.last_affordance();
    assert_eq!(affordance.label, "Hola, ana");
    assert!(affordance.logged_in);

    app.auth().logout();
    assert_eq!(page.last_affordance().label, "Login");
}

#[test]
fn failed_login_shows_generic_error_only() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    assert!(app.auth().submit_login("ana@example.com", "").is_err());
    assert!(app.auth().submit_login("not-an-email", "pw").is_err());

    let errors = page.login_errors.borrow();
    assert_eq!(errors.len(), 2);
    // bad format and bad credentials are indistinguishable
    assert_eq!(errors[0], errors[1]);
    assert_eq!(page.last_affordance().label, "Login");
}

#[test]
fn checkout_uses_snapshot_at_open_not_live_cart() {
    let storage = Storage::in_memory();
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.start();

    app.cart().add(product("p1", 1000)).unwrap();
    app.cart().increase(&ProductId::new("p1")).unwrap();
    app.checkout().open();

    let summary = page.checkout_renders.borrow().last().unwrap().clone();
    assert_eq!(summary.subtotal, "20.00");
    assert_eq!(summary.tax, "4.20");
    assert_eq!(summary.total, "24.20");

    // A later mutation does not touch the already-rendered summary.
    app.cart().add(product("p2", 9999)).unwrap();
    let unchanged = page.checkout_renders.borrow().last().unwrap().clone();
    assert_eq!(unchanged.total, "24.20");
}

#[test]
fn profile_gate_redirects_when_logged_out() {
    let page = Rc::new(FakePage::default());
    let app = app_on(&Storage::in_memory(), &page);
    app.start();

    assert_eq!(page.redirects.get(), 1);
    assert!(page.emails.borrow().is_empty());
}

#[test]
fn profile_shows_email_and_validates_dni() {
    let storage = Storage::in_memory();
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.auth().submit_login("ana@example.com", "x").unwrap();
    app.start();

    assert_eq!(page.emails.borrow().as_slice(), &["ana@example.com"]);

    let ok = app.profile().validate_dni("00000023T");
    assert!(ok.valid);
    let bad = app.profile().validate_dni("00000023X");
    assert!(!bad.valid);
    assert!(bad.text.contains("'T'"));
    assert_eq!(page.dni_feedback.borrow().len(), 2);
}

#[test]
fn avatar_persists_across_restart_and_logout() {
    use tienda_storefront::flows::AvatarUpload;

    let storage = Storage::in_memory();
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.auth().submit_login("ana@example.com", "x").unwrap();
    app.start();

    let upload = AvatarUpload {
        content_type: "image/png".to_owned(),
        bytes: vec![0, 1, 2],
    };
    let data_url = app.profile().update_avatar(&upload).unwrap();
    assert_eq!(page.avatars.borrow().last().unwrap(), &data_url);

    // Logout clears the session keys but not the avatar.
    app.profile().logout();
    assert!(storage.session().get(keys::USER_LOGGED_IN).is_none());
    assert_eq!(storage.durable().get(keys::PROFILE_PIC).unwrap(), data_url);

    // A fresh logged-in session still sees it.
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.auth().submit_login("ana@example.com", "x").unwrap();
    app.start();
    assert_eq!(page.avatars.borrow().as_slice(), &[data_url]);
}

#[test]
fn non_image_avatar_warns_and_keeps_previous() {
    use tienda_storefront::flows::AvatarUpload;

    let storage = Storage::in_memory();
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.auth().submit_login("ana@example.com", "x").unwrap();
    app.start();

    let upload = AvatarUpload {
        content_type: "text/plain".to_owned(),
        bytes: vec![0],
    };
    assert!(app.profile().update_avatar(&upload).is_err());
    assert_eq!(page.warnings.borrow().len(), 1);
    assert!(storage.durable().get(keys::PROFILE_PIC).is_none());
}

/// Durable store whose writes always fail, for the degraded-persistence
/// contract.
struct ReadOnlyStore(MemoryStore);

impl KeyValue for ReadOnlyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, key: &str) {
        self.0.remove(key);
    }
}

#[test]
fn failed_cart_write_is_reported_but_memory_stays_valid() {
    let storage = Storage::new(
        Rc::new(ReadOnlyStore(MemoryStore::new())),
        Rc::new(MemoryStore::new()),
    );
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.start();

    assert!(app.cart().add(product("p1", 1000)).is_err());
    // The in-memory cart still holds the line and renders it.
    let cart = page.last_cart();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.count, 1);
}

#[test]
fn failed_theme_write_degrades_to_in_memory() {
    let storage = Storage::new(
        Rc::new(ReadOnlyStore(MemoryStore::new())),
        Rc::new(MemoryStore::new()),
    );
    let page = Rc::new(FakePage::default());
    let app = app_on(&storage, &page);
    app.start();

    app.theme().toggle();
    assert_eq!(app.theme().current(), Theme::Dark);
    assert_eq!(page.themes.borrow().last().unwrap(), &Theme::Dark);
    assert!(storage.durable().get(keys::THEME).is_none());
}

#[test]
fn missing_ports_skip_features_without_panicking() {
    let app = App::new(
        &StorefrontConfig::default(),
        Storage::in_memory(),
        Bindings::default(),
        None,
    );
    app.start();

    // Mutations still work against the store even with nothing bound.
    app.cart().add(product("p1", 1000)).unwrap();
    app.cart().toggle();
    app.theme().toggle();
    assert!(!app.profile().open());
}
