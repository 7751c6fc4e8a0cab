use anyhow::{Context, Result};
use std::sync::Arc;
use winit::window::Window;

use crate::core::GpuContext;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// What happened when asking the surface for the next frame
pub enum FrameStatus {
    Ready(wgpu::SurfaceTexture),
    /// Surface was reconfigured; draw nothing this frame
    Skipped,
}

/// Window surface with its depth buffer
pub struct Renderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
}

impl Renderer {
    /// Create the surface, pick an adapter for it and configure both.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let instance = GpuContext::instance();
        let surface = instance
            .create_surface(window)
            .context("Failed to create window surface")?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let config = Self::create_surface_config(&surface, gpu.adapter(), size.width, size.height)?;
        surface.configure(gpu.device(), &config);
        let depth_view = Self::create_depth_view(gpu.device(), config.width, config.height);

        log::info!(
            "Surface configured: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            gpu,
            surface,
            config,
            depth_view,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Reconfigure for a new window size. Returns false for zero-sized
    /// windows, which keep the previous configuration.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(self.gpu.device(), &self.config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), width, height);
        log::debug!("Surface resized to {}x{}", width, height);
        true
    }

    /// Acquire the next surface texture.
    ///
    /// Lost and outdated surfaces are reconfigured and the frame skipped.
    /// Out-of-memory is returned as an error; anything else skips the frame.
    pub fn acquire(&mut self) -> Result<FrameStatus> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(FrameStatus::Ready(frame)),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(self.gpu.device(), &self.config);
                Ok(FrameStatus::Skipped)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err(anyhow::anyhow!("Surface out of memory")),
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                Ok(FrameStatus::Skipped)
            }
        }
    }

    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            })
    }

    pub fn submit(&self, encoder: wgpu::CommandEncoder, frame: wgpu::SurfaceTexture) {
        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}
