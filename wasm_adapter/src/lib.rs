//! WASM adapter exposing the quoting session to the browser form
#![allow(non_snake_case)]

use js_sys::Function;
use pricequote::{format_money, Currency, DiscountTier, QuoteError, QuoteSession, Selector};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

// The page is single threaded: one session, one listener.
thread_local! {
    static SESSION: RefCell<QuoteSession> = RefCell::new(QuoteSession::default());
    static TOTAL_LISTENER: RefCell<Option<Function>> = RefCell::new(None);
}

/// Quote result as the form script expects it
#[derive(Serialize)]
#[serde(untagged)]
enum QuoteReply {
    Ok {
        ok: bool,
        subtotal: f64,
        rate: f64,
        total: f64,
    },
    Err {
        ok: bool,
        message: String,
    },
}

impl From<Result<pricequote::Quote, QuoteError>> for QuoteReply {
    fn from(result: Result<pricequote::Quote, QuoteError>) -> Self {
        match result {
            Ok(quote) => QuoteReply::Ok {
                ok: true,
                subtotal: quote.subtotal(),
                rate: quote.rate(),
                total: quote.total(),
            },
            Err(e) => QuoteReply::Err {
                ok: false,
                message: e.to_string(),
            },
        }
    }
}

#[derive(Serialize)]
struct TierOption {
    key: &'static str,
    basisPoints: u32,
    discountPercent: u32,
}

#[derive(Serialize)]
struct Notes<'a> {
    main: &'a pricequote::NoteDisplay,
    cylinder: &'a pricequote::NoteDisplay,
    mainColor: Option<&'static str>,
    cylinderColor: Option<&'static str>,
}

fn js<T: Serialize>(value: &T) -> JsValue {
    to_value(value).unwrap_or(JsValue::NULL)
}

fn with_session<R>(f: impl FnOnce(&mut QuoteSession) -> R) -> R {
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

fn notify_total() {
    let total = with_session(|s| s.total_display().to_string());
    TOTAL_LISTENER.with(|l| {
        if let Some(cb) = &*l.borrow() {
            let _ = cb.call1(&JsValue::NULL, &JsValue::from_str(&total));
        }
    });
}

fn parse_selector(name: &str) -> Result<Selector, JsValue> {
    name.parse::<Selector>().map_err(|e| JsValue::from_str(&e))
}

/// Called with the formatted total whenever it changes
#[wasm_bindgen]
pub fn register_total_listener(cb: &Function) {
    TOTAL_LISTENER.with(|l| {
        *l.borrow_mut() = Some(cb.clone());
    });
}

/// Replace the loaded price list with the contents of an uploaded file
#[wasm_bindgen]
pub fn load_price_list(contents: &str) -> JsValue {
    with_session(|s| {
        s.load_text(contents);
        js(s.domains())
    })
}

/// Switch currency (`"USD"` or `"CAD"`); resets every selection
#[wasm_bindgen]
pub fn set_currency(code: &str) -> Result<(), JsValue> {
    let currency: Currency = code.parse().map_err(|e: String| JsValue::from_str(&e))?;
    with_session(|s| s.set_currency(currency));
    notify_total();
    Ok(())
}

/// Apply a selector change by name; returns the next selector's options
#[wasm_bindgen]
pub fn select(selector: &str, value: &str) -> Result<JsValue, JsValue> {
    let selector = parse_selector(selector)?;
    Ok(with_session(|s| js(&s.select(selector, value))))
}

#[wasm_bindgen]
pub fn select_size(value: &str) -> JsValue {
    with_session(|s| js(&s.select_size(value)))
}

#[wasm_bindgen]
pub fn select_series(value: &str) -> JsValue {
    with_session(|s| js(&s.select_series(value)))
}

#[wasm_bindgen]
pub fn select_material(value: &str) -> JsValue {
    with_session(|s| js(&s.select_material(value)))
}

/// Completes the main selection; returns the list price input text
#[wasm_bindgen]
pub fn select_seat(value: &str) -> String {
    with_session(|s| {
        s.select_seat(value);
        s.list_price().to_string()
    })
}

/// Returns the cylinder price input text
#[wasm_bindgen]
pub fn select_cylinder(value: &str) -> String {
    with_session(|s| {
        s.select_cylinder(value);
        s.cylinder_price().to_string()
    })
}

#[wasm_bindgen]
pub fn set_list_price(value: &str) {
    with_session(|s| s.set_list_price(value));
}

#[wasm_bindgen]
pub fn set_cylinder_price(value: &str) {
    with_session(|s| s.set_cylinder_price(value));
}

#[wasm_bindgen]
pub fn set_tier(key: &str) {
    with_session(|s| s.set_tier(key));
}

/// Append an adjustment row; returns its index
#[wasm_bindgen]
pub fn add_adjustment(amount: Option<f64>) -> usize {
    with_session(|s| s.add_adjustment(amount))
}

#[wasm_bindgen]
pub fn set_adjustment(index: usize, value: &str) -> bool {
    with_session(|s| s.set_adjustment(index, value))
}

#[wasm_bindgen]
pub fn remove_adjustment(index: usize) {
    let requoted = with_session(|s| s.remove_adjustment(index).is_some());
    if requoted {
        notify_total();
    }
}

#[wasm_bindgen]
pub fn adjustments_label() -> String {
    with_session(|s| s.adjustments_label())
}

/// Submit the form; returns `{ ok, subtotal, rate, total }` or `{ ok, message }`
#[wasm_bindgen]
pub fn submit() -> JsValue {
    let reply: QuoteReply = with_session(|s| s.submit()).into();
    if matches!(reply, QuoteReply::Ok { .. }) {
        notify_total();
    }
    js(&reply)
}

/// Price the current inputs without changing the display
#[wasm_bindgen]
pub fn calculate() -> JsValue {
    let reply: QuoteReply = with_session(|s| s.quote()).into();
    js(&reply)
}

#[wasm_bindgen]
pub fn reset_all() -> JsValue {
    with_session(|s| {
        s.reset_all();
        js(s.domains())
    })
}

#[wasm_bindgen]
pub fn reset_form() -> JsValue {
    let domains = with_session(|s| {
        s.reset_form();
        js(s.domains())
    });
    notify_total();
    domains
}

#[wasm_bindgen]
pub fn domains() -> JsValue {
    with_session(|s| js(s.domains()))
}

#[wasm_bindgen]
pub fn placeholder(selector: &str) -> Result<String, JsValue> {
    Ok(parse_selector(selector)?.placeholder().to_string())
}

#[wasm_bindgen]
pub fn notes() -> JsValue {
    with_session(|s| {
        js(&Notes {
            main: s.main_note(),
            cylinder: s.cylinder_note(),
            mainColor: s.main_note().color(),
            cylinderColor: s.cylinder_note().color(),
        })
    })
}

#[wasm_bindgen]
pub fn total_display() -> String {
    with_session(|s| s.total_display().to_string())
}

/// Format an amount in the session currency
#[wasm_bindgen(js_name = format_money)]
pub fn format_amount(amount: f64) -> String {
    with_session(|s| format_money(amount, s.currency()))
}

#[wasm_bindgen]
pub fn tiers() -> JsValue {
    let tiers: Vec<TierOption> = DiscountTier::ALL
        .iter()
        .map(|t| TierOption {
            key: t.key(),
            basisPoints: t.basis_points(),
            discountPercent: t.discount_percent(),
        })
        .collect();
    js(&tiers)
}
