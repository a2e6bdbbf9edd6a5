use anyhow::{Context, Result};

use super::{ScenarioCtx, TestScenario};

pub fn media_scenarios() -> Vec<TestScenario> {
    vec![TestScenario::new(
        "slideshow",
        "Detail slideshow timing, pause, and image fallback",
        slideshow_expectation,
    )]
}

fn slideshow_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.session()?;
    let tour_id = session
        .data()
        .catalog
        .iter()
        .next()
        .map(|tour| tour.id.clone())
        .context("catalog is empty")?;
    session.select_tour(&tour_id)?;
    let interval = session.data().config.detail_slideshow_interval_ms;

    let show = session.slideshow_mut();
    anyhow::ensure!(show.is_playing(), "detail slideshow auto-plays");
    anyhow::ensure!(show.len() > 1, "detail slideshow needs several slides");
    let ticks = ctx.iteration % show.len() + 1;
    let advanced = show.tick(interval * u32::try_from(ticks).unwrap_or(1));
    anyhow::ensure!(advanced == ticks, "advanced {advanced} slides, expected {ticks}");
    anyhow::ensure!(show.index() == ticks % show.len(), "slideshow should wrap");

    show.toggle_play();
    anyhow::ensure!(show.tick(interval * 10) == 0, "paused slideshow must hold");
    show.toggle_play();
    anyhow::ensure!(show.tick(interval - 1) == 0, "resuming restarts the interval");

    // A fresh tour visit starts the show over.
    session.select_tour(&tour_id)?;
    anyhow::ensure!(session.slideshow().index() == 0, "slideshow restarts per tour");

    let mut gallery = session.data().gallery_slideshow();
    anyhow::ensure!(gallery.counter_label().starts_with("1 of "), "counter label");
    let gallery_interval = session.data().config.slideshow_interval_ms;
    anyhow::ensure!(gallery.tick(gallery_interval) == 1, "gallery uses its own interval");

    let mut image = session.data().image("https://images.invalid/missing.jpg");
    image.mark_failed();
    anyhow::ensure!(
        image.resolve() == session.data().config.fallback_image,
        "failed images fall back to the placeholder"
    );
    Ok(())
}
