use anyhow::Context;
use clap::Parser;
use winit::{
    dpi::PhysicalSize,
    event::*,
    keyboard::PhysicalKey,
    window::WindowBuilder,
};
use normal_map_demo::{Args, DemoConfig, FrameSignal, State};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = DemoConfig::try_from(Args::parse())?;
    log::debug!("Configuration: {:?}", config);

    let event_loop = winit::event_loop::EventLoop::new()
        .context("Failed to create event loop")?;

    let window = WindowBuilder::new()
        .with_title("Normal Mapping")
        .with_inner_size(PhysicalSize::new(config.width, config.height))
        .with_visible(true)
        .build(&event_loop)
        .context("Failed to create window")?;

    let mut state = State::new(window, &config).context("Setup failed")?;
    let mut fatal: Option<anyhow::Error> = None;

    event_loop.run(|event, window_target| {
        match event {
            Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                match event {
                    WindowEvent::KeyboardInput {
                        event: KeyEvent {
                            physical_key: PhysicalKey::Code(key_code),
                            state: key_state,
                            ..
                        },
                        ..
                    } => {
                        state.scene.input.process_key(key_code, key_state == ElementState::Pressed);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let offset_y = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            // Roughly one line per 20 pixels of trackpad travel
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                        };
                        state.scene.input.process_wheel(offset_y);
                    }
                    WindowEvent::Focused(focused) => {
                        state.set_focused(focused);
                    }
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Err(e) = state.render() {
                            fatal = Some(anyhow::Error::new(e).context("Render failed"));
                            window_target.exit();
                        }
                    }
                    _ => {}
                }
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } if state.scene.input.is_focused() => {
                state.scene.input.process_mouse_motion(delta.0 as f32, delta.1 as f32);
            }
            Event::AboutToWait => match state.update() {
                Ok(FrameSignal::CloseRequested) => window_target.exit(),
                Ok(FrameSignal::Continue) => state.window().request_redraw(),
                Err(e) => {
                    fatal = Some(anyhow::Error::new(e).context("Update failed"));
                    window_target.exit();
                }
            },
            Event::LoopExiting => {
                state.dispose();
            }
            _ => {}
        }
    })?;

    match fatal {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
