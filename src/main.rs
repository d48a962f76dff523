// Native test builds compile the logic modules without the frontend that calls them.
#![cfg_attr(all(test, not(target_arch = "wasm32")), allow(dead_code))]

#[cfg(any(target_arch = "wasm32", test))]
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod contact;
#[cfg(any(target_arch = "wasm32", test))]
mod content;
#[cfg(any(target_arch = "wasm32", test))]
mod embed;
#[cfg(any(target_arch = "wasm32", test))]
mod logging;
#[cfg(any(target_arch = "wasm32", test))]
mod modal;
#[cfg(any(target_arch = "wasm32", test))]
mod projects;
#[cfg(any(target_arch = "wasm32", test))]
mod toast;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
