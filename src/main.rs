use winit::{
    event::{
        Event,
        WindowEvent,
    },
    event_loop::ControlFlow,
    window::Window,
};
use bui::{
    rect,
    renderer,
    resolution_buffer::ResolutionBuffer,
    ellipse::*,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};
use std::{
    thread,
    time::Instant,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use star_field::*;

type RendererRef<'a> = &'a renderer::Renderer;
type ResolutionBufferRef<'a> = &'a mut ResolutionBuffer;
constrainer::create_constrainer!(Constrainer {
    dynamic resx f32
    dynamic resy f32
    external renderer RendererRef
    external resolution_buffer ResolutionBufferRef

    listener set_resolution_buffer (resx, resy, resolution_buffer, renderer) {
        resolution_buffer.set(&[resx, resy], renderer.queue());
    }

    opgenset (resx, resy)
});

/// Collects the field's circles as an ellipse batch for the GPU.
///
/// Pixel coordinates (origin top left, y down) are mapped to clip space.
struct EllipseSurface {
    width: f64,
    height: f64,
    fill: Color,
    ellipses: Vec<EllipseBuffer>,
}

impl EllipseSurface {
    fn new(width: f64, height: f64, capacity: usize) -> Self {
        Self {
            width,
            height,
            fill: DEFAULT_PALETTE[0],
            ellipses: Vec::with_capacity(capacity),
        }
    }

    fn upload(&self, ellipse_renderer: &mut EllipseRenderer, renderer: &renderer::Renderer) {
        ellipse_renderer.set_ellipse_buffer(renderer.queue(), self.ellipses.as_slice());
    }
}

impl DrawingSurface for EllipseSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    // The batch is redrawn from scratch each frame, so any clear empties it.
    fn clear_rect(&mut self, _x: f64, _y: f64, _width: f64, _height: f64) {
        self.ellipses.clear();
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let diameter = radius * 2.0;
        self.ellipses.push(EllipseDescriptor {
            sizing: rect::FillAspect {
                placement_area: rect::SizeAndCenter {
                    sx: (diameter / self.width * 2.0) as f32,
                    sy: (diameter / self.height * 2.0) as f32,
                    cx: (x / self.width * 2.0 - 1.0) as f32,
                    cy: (1.0 - y / self.height * 2.0) as f32,
                },
                centerx: 0.0,
                centery: 0.0,
                resx: self.width as f32,
                resy: self.height as f32,
                aspect: 1.0,
            }.into(),
            r: self.fill.r,
            g: self.fill.g,
            b: self.fill.b,
            a: 1.0,
        }.into());
    }
}

/// Frame scheduler backed by the window's redraw requests.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wgpu=error,star_field=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout).with_target(false))
        .init();
}

fn main() {
    setup_logging();
    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = if let Some(path) = std::env::args().nth(1) {
        path
    } else {
        info!("Defaulting to ./star_field.ron");
        "star_field.ron".to_string()
    };
    let config = FieldConfig::load_or_default(&config_path);

    let event_loop = winit::event_loop::EventLoop::new();
    let window = winit::window::WindowBuilder::new()
        .with_title("Star Field")
        .build(&event_loop)
        .map_err(|e| Error::SurfaceUnavailable(e.to_string()))?;
    let size = window.inner_size();
    let mut renderer = futures::executor::block_on(renderer::Renderer::new(&window));
    let mut resolution_buffer = ResolutionBuffer::new(renderer.device());
    let mut ellipse_renderer = EllipseRenderer::new(
        renderer.device(),
        renderer.config().format,
        &resolution_buffer,
        config.particle_count.max(1) as wgpu::BufferAddress,
    );

    let mut surface = EllipseSurface::new(size.width as f64, size.height as f64, config.particle_count);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut field = ParticleField::for_surface(config.particle_count, &surface, &config.palette, &mut rng)?;
    info!("Started star field with {} particles at {}x{}", field.len(), size.width, size.height);

    let mut constrainer = Constrainer::new(size.width as f32, size.height as f32, &renderer, &mut resolution_buffer);
    let mut pending_resize = Debounce::new(config.resize_debounce());
    let frame_budget = config.frame_budget();
    let background = wgpu::Color {
        r: config.background.r as f64,
        g: config.background.g as f64,
        b: config.background.b as f64,
        a: 1.0,
    };

    let mut last_frame_time = Instant::now();
    window.request_redraw();
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                *control_flow = ControlFlow::Exit
            },
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let new_size = match event {
                    WindowEvent::Resized(physical_size) => Some(*physical_size),
                    WindowEvent::ScaleFactorChanged {
                        new_inner_size,
                        ..
                    } => Some(**new_inner_size),
                    _ => None,
                };
                if let Some(new_size) = new_size {
                    renderer.resize(new_size);
                    constrainer.set_resx_resy(
                        new_size.width as f32,
                        new_size.height as f32,
                        &renderer,
                        &mut resolution_buffer,
                    );
                    surface.set_size(new_size.width as f64, new_size.height as f64);
                    pending_resize.push((new_size.width as f64, new_size.height as f64), Instant::now());
                    window.request_redraw();
                }
            },
            Event::RedrawRequested(_) => {
                if let Some((width, height)) = pending_resize.poll(Instant::now()) {
                    debug!("Applying resize to {}x{}", width, height);
                    field.resize(width, height);
                }

                match renderer.surface().get_current_texture() {
                    Ok(surface_texture) => {
                        let view = surface_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
                        let mut encoder = renderer.device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("Render encoder"),
                        });
                        if config.reduced_motion {
                            field.draw(&mut surface);
                        } else {
                            field.advance(&mut surface, &mut RedrawScheduler(&window));
                        }
                        surface.upload(&mut ellipse_renderer, &renderer);
                        ellipse_renderer.render_all(&mut encoder, &view, wgpu::LoadOp::Clear(background));
                        renderer.queue().submit(std::iter::once(encoder.finish()));
                        surface_texture.present();
                    },
                    Err(wgpu::SurfaceError::Lost) => {
                        warn!("Surface lost!");
                        renderer.reconfigure();
                        window.request_redraw();
                    },
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("Out of memory!");
                        *control_flow = ControlFlow::Exit;
                    },
                    Err(e) => {
                        warn!("Surface error: {:?}", e);
                        window.request_redraw();
                    },
                };

                // A still field only needs more frames until a held-back resize lands.
                if config.reduced_motion && pending_resize.is_pending() {
                    window.request_redraw();
                }
                thread::sleep(frame_budget.saturating_sub(last_frame_time.elapsed()));
                last_frame_time = Instant::now();
            },
            _ => ()
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinking_past_a_particle_leaves_no_trail() -> Result<()> {
        let p = Particle::new(90.0, 50.0, 2.0, DEFAULT_PALETTE[0], 0.5)?;
        let mut field = ParticleField::from_particles(vec![p], 100.0, 100.0)?;
        let mut surface = EllipseSurface::new(100.0, 100.0, field.len());
        let mut stepper = FrameStepper::primed();
        stepper.run(&mut field, &mut surface, 1);
        assert_eq!(surface.ellipses.len(), 1);

        surface.set_size(50.0, 100.0);
        field.resize(50.0, 100.0);
        for _ in 0..5 {
            stepper.run(&mut field, &mut surface, 1);
            assert_eq!(surface.ellipses.len(), field.len());
        }
        Ok(())
    }

    #[test]
    fn zero_area_surface_draws_nothing() -> Result<()> {
        let p = Particle::new(10.0, 10.0, 2.0, DEFAULT_PALETTE[1], 0.5)?;
        let mut field = ParticleField::from_particles(vec![p], 100.0, 100.0)?;
        let mut surface = EllipseSurface::new(0.0, 0.0, 1);
        FrameStepper::primed().run(&mut field, &mut surface, 3);
        assert!(surface.ellipses.is_empty());
        Ok(())
    }
}
