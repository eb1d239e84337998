use adflight_engine::{
    AssetManifest, InputEvent, InputQueue, RenderBuffer, Result, SceneConfig,
    SceneController, VehicleDescriptor,
};

/// Wires the scene controller to host input and the flat render buffer.
///
/// The web crate keeps one `SceneRunner` in a `thread_local!` and exports
/// free functions via `#[wasm_bindgen]`; everything here is plain Rust so it
/// runs natively under `cargo test`.
pub struct SceneRunner {
    scene: SceneController,
    input: InputQueue,
    render_buffer: RenderBuffer,
}

impl SceneRunner {
    pub fn new(config: SceneConfig) -> Result<Self> {
        Ok(Self {
            scene: SceneController::new(config)?,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
        })
    }

    /// Build from a host config document. An empty string means defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = if json.trim().is_empty() {
            SceneConfig::default()
        } else {
            SceneConfig::from_json(json)?
        };
        Self::new(config)
    }

    pub fn scene(&self) -> &SceneController {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneController {
        &mut self.scene
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.scene.set_viewport(width, height);
    }

    pub fn select_vehicle_json(&mut self, json: &str) -> Result<()> {
        let descriptor = VehicleDescriptor::from_json(json)?;
        self.scene.select_vehicle(descriptor);
        Ok(())
    }

    pub fn load_manifest(&mut self, json: &str) -> Result<()> {
        let manifest = AssetManifest::from_json(json)?;
        self.scene.load_manifest(&manifest);
        Ok(())
    }

    pub fn start(&mut self) -> Result<bool> {
        self.scene.start()
    }

    pub fn stop(&mut self) -> bool {
        self.scene.stop()
    }

    pub fn pause(&mut self) -> bool {
        self.scene.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.scene.resume()
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: route queued taps, advance the scene, rebuild the
    /// render buffer.
    pub fn tick(&mut self, dt: f32) {
        self.scene.handle_input(&mut self.input);
        self.scene.advance(dt);
        self.scene.render_into(&mut self.render_buffer);
    }

    pub fn snapshot_json(&self) -> Result<String> {
        Ok(self.scene.snapshot().to_json()?)
    }

    /// Events raised since the last call, as a JSON array.
    pub fn drain_events_json(&mut self) -> Result<String> {
        Ok(serde_json::to_string(&self.scene.drain_events())?)
    }

    // ---- Pointer accessors for host-side buffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }
}
