use web_sys::HtmlCanvasElement;
use wgpu::*;

pub struct WgpuContext {
    pub device: Device,
    pub queue: Queue,
    pub surface: Surface<'static>,
    pub config: SurfaceConfiguration,
}

/// Connect to the page's WebGPU adapter and configure `canvas` for drawing.
///
/// The road scene is one pipeline with one uniform and one instance buffer,
/// so WebGL2-level limits are plenty; the adapter's own texture limit is
/// kept so large or high-DPI canvases still fit.
pub async fn init_wgpu(canvas: HtmlCanvasElement) -> Result<WgpuContext, String> {
    let instance = Instance::new(&InstanceDescriptor {
        backends: Backends::BROWSER_WEBGPU,
        ..Default::default()
    });

    let width = canvas.width().max(1);
    let height = canvas.height().max(1);

    let surface = instance
        .create_surface(SurfaceTarget::Canvas(canvas))
        .map_err(|e| format!("Canvas has no WebGPU context: {e}"))?;

    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| "No WebGPU adapter; the lane runner needs WebGPU".to_string())?;

    let adapter_limits = adapter.limits();
    let required_limits = Limits {
        max_texture_dimension_2d: adapter_limits.max_texture_dimension_2d,
        ..Limits::downlevel_webgl2_defaults()
    };
    let (width, height) = fit_to_limit(width, height, required_limits.max_texture_dimension_2d);

    let (device, queue) = adapter
        .request_device(
            &DeviceDescriptor {
                label: Some("Lane Runner Device"),
                required_features: Features::empty(),
                required_limits,
                memory_hints: MemoryHints::Performance,
            },
            None,
        )
        .await
        .map_err(|e| format!("WebGPU device request failed: {e}"))?;

    let caps = surface.get_capabilities(&adapter);
    // The shader writes linear colours, so prefer an sRGB target
    let format = caps
        .formats
        .iter()
        .copied()
        .find(TextureFormat::is_srgb)
        .or_else(|| caps.formats.first().copied())
        .ok_or_else(|| "Surface reports no formats".to_string())?;
    let alpha_mode = if caps.alpha_modes.contains(&CompositeAlphaMode::Opaque) {
        CompositeAlphaMode::Opaque
    } else {
        CompositeAlphaMode::Auto
    };

    let config = SurfaceConfiguration {
        usage: TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: PresentMode::Fifo,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    tracing::info!(
        adapter = %adapter.get_info().name,
        ?format,
        width,
        height,
        "road renderer ready"
    );

    Ok(WgpuContext {
        device,
        queue,
        surface,
        config,
    })
}

/// Scale a canvas size down so neither side exceeds `max`
pub(super) fn fit_to_limit(width: u32, height: u32, max: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max {
        return (width, height);
    }
    let scale = max as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * scale) as u32).clamp(1, max);
    (fit(width), fit(height))
}
