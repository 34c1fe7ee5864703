use std::path::PathBuf;

use anyhow::Context;
use latticekit::{init_logging, AreaKind, Config, DesignCanvas, LatticeCoord, ScenePoint};
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load_or_default(config_path.as_deref())
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let mut canvas = DesignCanvas::new(&config)?;
    let dimer = [
        canvas.add_point(LatticeCoord::new(10, 10, 0))?,
        canvas.add_point(LatticeCoord::new(10, 10, 1))?,
    ];
    let blocker = canvas.add_point(LatticeCoord::new(14, 10, 0))?;
    let pad = canvas.add_area(
        AreaKind::Electrode,
        ScenePoint::new(600.0, 300.0),
        250.0,
        120.0,
    );
    let group = canvas.group(&[dimer[0], dimer[1], pad])?;
    info!("Canvas holds {} entities", canvas.store.len());

    let start = canvas
        .store
        .position(dimer[0])
        .context("dimer has no position")?;
    let cell = canvas.lattice.scale() * config.lattice.a1[0];
    canvas.begin_drag(&[group], start)?;

    // across the blocker first, then one cell short of it
    for cells in [4.0, 3.0] {
        let target = ScenePoint::new(start.x + cells * cell, start.y);
        let valid = canvas.drag_to(target)?;
        info!("Preview at {} is {}", target, if valid { "valid" } else { "blocked" });
    }

    let moved = canvas.commit()?;
    if moved.is_empty() {
        warn!("Move discarded");
    } else {
        info!("Moved {:?}", moved);
    }
    for id in dimer.iter().chain([&blocker]) {
        if let Some(site) = canvas.store.get(*id).and_then(|e| e.site()) {
            info!("Entity {} on site {}", id, site);
        }
    }

    Ok(())
}
