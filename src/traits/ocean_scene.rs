use winit::event::KeyEvent;

use crate::core::FrameInfo;

/// A renderable ocean variant driven once per frame by the app loop
pub trait OceanScene {
    /// Title shown on the scene's HUD panel
    fn name(&self) -> &'static str;

    /// Advance animation state and upload this frame's uniforms
    fn update(&mut self, queue: &wgpu::Queue, frame: &FrameInfo);

    /// Viewport changed; sizes are never zero
    fn resize(&mut self, queue: &wgpu::Queue, width: u32, height: u32);

    /// Record the scene's passes into `encoder`
    fn render(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView, depth: &wgpu::TextureView);

    fn handle_key(&mut self, _event: &KeyEvent) {}

    /// Parameter controls for the HUD
    fn ui(&mut self, _ui: &mut egui::Ui) {}
}
