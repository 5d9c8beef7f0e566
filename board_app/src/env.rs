// Abstract environment (Time, Logging)
pub trait Environment {
    fn now_ms(&self) -> u64;
    fn log(&self, msg: String);
}

#[cfg(target_arch = "wasm32")]
pub struct WasmEnv {
    pub tag: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl Environment for WasmEnv {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn log(&self, msg: String) {
        web_sys::console::log_1(&format!("[{}] {}", self.tag, msg).into());
    }
}
