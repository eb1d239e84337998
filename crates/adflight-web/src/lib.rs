//! Browser bridge for the ad-flight engine.
//!
//! One `SceneRunner` lives in a `thread_local!`; the host page drives it
//! through the free functions below. Calls made before `scene_init` are
//! reported on the console and otherwise ignored.

pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use adflight_engine::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                web_sys::console::error_1(&"Scene not initialized. Call scene_init() first.".into());
                None
            }
        }
    })
}

fn to_js(err: adflight_engine::SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn not_initialized() -> JsValue {
    JsValue::from_str("scene not initialized")
}

/// Create the scene from a JSON config (empty string for defaults).
#[wasm_bindgen]
pub fn scene_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SceneRunner::from_json(config_json).map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("adflight: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn scene_set_viewport(width: f32, height: f32) {
    with_runner(|r| r.set_viewport(width, height));
}

#[wasm_bindgen]
pub fn scene_select_vehicle(descriptor_json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.select_vehicle_json(descriptor_json))
        .ok_or_else(not_initialized)?
        .map_err(to_js)
}

#[wasm_bindgen]
pub fn scene_load_manifest(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.load_manifest(json))
        .ok_or_else(not_initialized)?
        .map_err(to_js)
}

// ---- Lifecycle ----

#[wasm_bindgen]
pub fn scene_start() -> Result<bool, JsValue> {
    with_runner(|r| r.start()).ok_or_else(not_initialized)?.map_err(to_js)
}

#[wasm_bindgen]
pub fn scene_stop() -> bool {
    with_runner(|r| r.stop()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn scene_pause() -> bool {
    with_runner(|r| r.pause()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn scene_resume() -> bool {
    with_runner(|r| r.resume()).unwrap_or(false)
}

// ---- Frame loop and input ----

#[wasm_bindgen]
pub fn scene_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn scene_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn scene_snapshot_json() -> Result<String, JsValue> {
    with_runner(|r| r.snapshot_json()).ok_or_else(not_initialized)?.map_err(to_js)
}

#[wasm_bindgen]
pub fn scene_drain_events_json() -> Result<String, JsValue> {
    with_runner(|r| r.drain_events_json()).ok_or_else(not_initialized)?.map_err(to_js)
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}
