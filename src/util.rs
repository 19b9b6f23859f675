// Console logging helpers shared by the game core.

#[cfg(target_arch = "wasm32")]
pub fn clog(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clog(msg: &str) {
    println!("{msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub fn cwarn(msg: &str) {
    eprintln!("{msg}");
}
