use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::EtherCore;

/// User agent of the hosting browser, if any
fn host_user_agent() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().and_then(|w| w.navigator().user_agent().ok())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

#[wasm_bindgen]
pub struct LiquidEther {
    core: EtherCore,
}

#[wasm_bindgen]
impl LiquidEther {
    /// Session with default settings for a `width` x `height` CSS-pixel surface
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32, now_ms: f64) -> Self {
        let ua = host_user_agent();
        Self {
            core: EtherCore::with_config(
                &Default::default(),
                width,
                height,
                device_pixel_ratio,
                now_ms,
                ua.as_deref(),
            ),
        }
    }

    /// Session from a JSON configuration object (camelCase keys, all optional)
    #[wasm_bindgen(js_name = withConfigJson)]
    pub fn with_config_json(
        json: &str,
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
        now_ms: f64,
    ) -> Result<LiquidEther, JsValue> {
        let ua = host_user_agent();
        let core = EtherCore::from_config_json(json, width, height, device_pixel_ratio, now_ms, ua.as_deref())
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    /// Start the loop; true when the host must call `requestAnimationFrame`
    pub fn start(&mut self) -> bool {
        self.core.start()
    }

    /// Frame callback. Returns true when another frame should be requested.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.core.frame(now_ms)
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.core.reset(now_ms);
    }

    /// Free the simulation buffers now instead of waiting for `free()`
    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        self.core.resize(width, height, device_pixel_ratio)
    }

    pub fn set_surface_rect(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.core.set_surface_rect(left, top, width, height);
    }

    pub fn set_document_hidden(&mut self, hidden: bool) -> bool {
        self.core.set_document_hidden(hidden)
    }

    pub fn set_intersecting(&mut self, intersecting: bool) -> bool {
        self.core.set_intersecting(intersecting)
    }

    // === Input ===

    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.core.pointer_move(x, y, now_ms)
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.core.pointer_down(x, y, now_ms)
    }

    /// `touch` is true for a `touchend` / touch-type `pointerup`
    pub fn pointer_up(&mut self, touch: bool) {
        self.core.pointer_up(touch);
    }

    pub fn pointer_leave(&mut self) {
        self.core.pointer_leave();
    }

    // === Settings ===

    pub fn set_mouse_force(&mut self, force: f32) {
        self.core.set_mouse_force(force);
    }

    pub fn set_cursor_size(&mut self, size: f32) {
        self.core.set_cursor_size(size);
    }

    pub fn set_viscous(&mut self, enabled: bool, viscosity: f32) {
        self.core.set_viscous(enabled, viscosity);
    }

    pub fn set_iterations(&mut self, viscous: u32, poisson: u32) {
        self.core.set_iterations(viscous, poisson);
    }

    #[wasm_bindgen(js_name = setBFECC)]
    pub fn set_bfecc(&mut self, enabled: bool) {
        self.core.set_bfecc(enabled);
    }

    pub fn set_resolution(&mut self, resolution: f32) {
        self.core.set_resolution(resolution);
    }

    pub fn set_auto_demo(&mut self, enabled: bool) {
        self.core.set_auto_demo(enabled);
    }

    pub fn set_auto_speed(&mut self, speed: f32) {
        self.core.set_auto_speed(speed);
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last frame perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === Output ===

    #[wasm_bindgen(getter)]
    pub fn grid_width(&self) -> u32 { self.core.grid_width() }

    #[wasm_bindgen(getter)]
    pub fn grid_height(&self) -> u32 { self.core.grid_height() }

    /// Canvas backing-store width in device pixels
    #[wasm_bindgen(getter)]
    pub fn backing_width(&self) -> u32 { self.core.viewport().backing_size().0 }

    #[wasm_bindgen(getter)]
    pub fn backing_height(&self) -> u32 { self.core.viewport().backing_size().1 }

    #[wasm_bindgen(getter)]
    pub fn frame_count(&self) -> u32 { self.core.frame_count().min(u32::MAX as u64) as u32 }

    #[wasm_bindgen(getter)]
    pub fn is_auto_active(&self) -> bool { self.core.pointer().is_auto_active() }

    /// Byte offset of the ABGR pixel buffer in wasm memory
    pub fn pixels_ptr(&self) -> u32 {
        self.core.pixels_ptr() as usize as u32
    }

    /// Pixel count; multiply by 4 for bytes
    pub fn pixels_len(&self) -> u32 {
        self.core.pixels_len() as u32
    }
}
