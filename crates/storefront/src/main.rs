//! Tienda Storefront - console demo.
//!
//! Drives the storefront flows through a console view adapter: durable
//! storage lives in a JSON file, session storage in memory, and every view
//! port prints what a page would render. Running it twice shows the durable
//! keys (theme, cart, avatar) surviving while the session does not.

#![cfg_attr(not(test), forbid(unsafe_code))]
// A console demo renders by printing.
#![allow(clippy::print_stdout)]

use std::cell::Cell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;

use tienda_core::Money;
use tienda_storefront::app::App;
use tienda_storefront::config::StorefrontConfig;
use tienda_storefront::models::{Product, Theme};
use tienda_storefront::storage::{JsonFileStore, MemoryStore, Storage};
use tienda_storefront::views::{
    AuthAffordance, AuthPort, Bindings, CartPanelPort, CartPanelView, CheckoutPort, CheckoutView,
    DniFeedback, ProfilePort, ThemePort,
};

/// Console stand-in for the page: every port prints its render calls.
#[derive(Default)]
struct ConsolePage {
    cart_visible: Cell<bool>,
}

impl ThemePort for ConsolePage {
    fn apply(&self, theme: Theme) {
        println!("[tema] {theme}");
    }
}

impl AuthPort for ConsolePage {
    fn apply(&self, affordance: &AuthAffordance) {
        println!("[auth] «{}»", affordance.label);
    }

    fn show_login_modal(&self) {
        println!("[auth] modal abierto");
    }

    fn hide_login_modal(&self) {
        println!("[auth] modal cerrado");
    }

    fn show_login_error(&self, message: &str) {
        println!("[auth] error: {message}");
    }
}

impl CartPanelPort for ConsolePage {
    fn render(&self, view: &CartPanelView) {
        match &view.placeholder {
            Some(placeholder) => println!("[carrito] {placeholder}"),
            None => {
                for line in &view.lines {
                    println!(
                        "[carrito] {} x{} ({} €/ud)",
                        line.name, line.quantity, line.unit_price
                    );
                }
            }
        }
        println!("[carrito] {} artículos, total {} €", view.count, view.total);
    }

    fn set_visible(&self, visible: bool) {
        self.cart_visible.set(visible);
        println!("[carrito] panel {}", if visible { "visible" } else { "oculto" });
    }

    fn is_visible(&self) -> bool {
        self.cart_visible.get()
    }
}

impl CheckoutPort for ConsolePage {
    fn render(&self, view: &CheckoutView) {
        if let Some(placeholder) = &view.placeholder {
            println!("[checkout] {placeholder}");
        }
        for line in &view.lines {
            println!("[checkout] {} x{} = {} €", line.name, line.quantity, line.line_total);
        }
        println!(
            "[checkout] subtotal {} €, IVA {} €, total {} €",
            view.subtotal, view.tax, view.total
        );
    }
}

impl ProfilePort for ConsolePage {
    fn show_email(&self, email: &str) {
        println!("[perfil] {email}");
    }

    fn show_avatar(&self, data_url: &str) {
        println!("[perfil] avatar actualizado ({} bytes)", data_url.len());
    }

    fn show_dni_feedback(&self, feedback: &DniFeedback) {
        println!("[perfil] DNI: {}", feedback.text);
    }

    fn warn(&self, message: &str) {
        println!("[perfil] aviso: {message}");
    }

    fn redirect_to_home(&self) {
        println!("[perfil] redirigiendo a la portada");
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tienda_storefront=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = StorefrontConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "bad environment, using defaults");
        StorefrontConfig::default()
    });

    // Durable scope in a JSON file, session scope in memory. If the file
    // cannot be opened, degrade to in-memory-only for this run.
    let durable: Rc<dyn tienda_storefront::storage::KeyValue> =
        match JsonFileStore::open(&config.data_file) {
            Ok(store) => Rc::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "durable storage unavailable, staying in memory");
                Rc::new(MemoryStore::new())
            }
        };
    let storage = Storage::new(durable, Rc::new(MemoryStore::new()));

    let page = Rc::new(ConsolePage::default());
    let bindings = Bindings {
        theme: Some(page.clone()),
        auth: Some(page.clone()),
        cart: Some(page.clone()),
        checkout: Some(page.clone()),
        profile: Some(page),
    };

    let app = App::new(&config, storage, bindings, Some(Theme::Light));
    app.start();

    // A scripted walkthrough of the page's affordances.
    let _ = app.cart().add(Product::new(
        "camiseta",
        "Camiseta",
        Money::from_cents(1995),
        None,
    ));
    let _ = app
        .cart()
        .add(Product::new("taza", "Taza", Money::from_cents(850), None));
    let _ = app.cart().add(Product::new(
        "camiseta",
        "Camiseta",
        Money::from_cents(1995),
        None,
    ));

    app.theme().toggle();

    let _ = app.auth().submit_login("ana@example.com", "demo");
    app.profile().open();
    app.profile().validate_dni("00000023T");
    app.profile().validate_dni("00000023X");

    app.checkout().open();
}
