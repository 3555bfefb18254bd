//! Browser front end
//!
//! The DOM-bound widget runs natively against [`MockDom`] so the browser
//! behavior is testable without a browser. The `wasm` feature adds the
//! wasm-bindgen entry point.

#[cfg(feature = "wasm")]
mod browser;
mod calculator;
pub mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, LocalStorageStore};
pub use calculator::WasmCalculator;
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
pub use keypad::{button_element, button_id, WasmKeypad};
