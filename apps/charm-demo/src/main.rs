mod host;

use std::rc::Rc;

use anyhow::Context;
use charm_foundation::PointerEvent;
use charm_runtime_std::StdRuntime;
use charm_ui::{exclusivity, Charm, CharmHost, EdgePlacement, ParentContent};

use host::{Page, Screen, Toolbar, TouchSurface};

const PANEL_WIDTH: f32 = 320.0;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let runtime = StdRuntime::new();
    let charm = Charm::new(runtime.runtime_handle(), EdgePlacement::Left, PANEL_WIDTH)
        .context("creating the charm")?;
    let page = Rc::new(Page::new());
    charm.apply_template(
        CharmHost::new()
            .with_chrome(Rc::new(Toolbar::new()))
            .with_insets(Rc::new(Screen {
                status_bar: 24.0,
                height: 720.0,
            }))
            .with_capture(Rc::new(TouchSurface))
            .with_default_parent(page.clone()),
    );
    charm.on_loaded().context("loading the charm")?;

    println!("=== Charm panel demo ===");

    charm.handle_pointer_event(&PointerEvent::down(0.0, 300.0));
    for step in 1..=8 {
        charm.handle_pointer_event(&PointerEvent::moved(step as f32 * 50.0, 300.0));
        report("drag", &charm, page.as_ref());
    }
    charm.handle_pointer_event(&PointerEvent::up(400.0, 300.0));
    let frames = runtime.run_until_idle();
    report(&format!("settled open after {frames} frames"), &charm, page.as_ref());
    println!("  exclusivity holder: {:?}", exclusivity::holder());

    charm.on_cover_tapped();
    let frames = runtime.run_until_idle();
    report(&format!("closed after {frames} frames"), &charm, page.as_ref());

    charm.set_edge_placement(EdgePlacement::Right);
    charm.open();
    runtime.run_until_idle();
    report("opened from the right edge", &charm, page.as_ref());

    if let Err(err) = charm.set_panel_width(-1.0) {
        println!("  rejected resize: {err}");
    }
    Ok(())
}

fn report(label: &str, charm: &Charm, page: &dyn ParentContent) {
    println!(
        "{label:<32} offset {:>8.2}  open {:<5}  page opacity {:.3}  scale {:.4}",
        charm.offset(),
        charm.is_open(),
        page.opacity(),
        page.scale().unwrap_or(1.0)
    );
}
