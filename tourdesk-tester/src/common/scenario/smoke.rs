use anyhow::{Context, Result};
use tourdesk_core::{Page, TicketKind};

use super::booking::first_open_day;
use super::{ScenarioCtx, TestScenario};

pub fn smoke_scenario() -> TestScenario {
    TestScenario::new(
        "smoke",
        "Load embedded data and complete one booking end to end",
        smoke_expectation,
    )
}

fn smoke_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut engine = ctx.engine();
    let mut session = engine.create_session(ctx.today)?;
    anyhow::ensure!(session.page() == Page::Catalog, "session should open on the catalog");
    anyhow::ensure!(
        !session.visible_tours().is_empty(),
        "catalog should list tours"
    );

    let tour_id = session
        .visible_tours()
        .first()
        .map(|tour| tour.id.clone())
        .context("no tour to open")?;
    session.select_tour(&tour_id)?;
    let day = first_open_day(&session)?;
    session.pick_date(day)?;
    let slot = session
        .time_slots()
        .iter()
        .find(|slot| slot.bookable)
        .map(|slot| slot.time.clone())
        .context("no bookable time slot")?;
    session.pick_time(&slot)?;
    session.increment_ticket(TicketKind::Youth);

    let request = engine.checkout(&session)?;
    if ctx.verbose {
        println!(
            "     ↳ booked {} on {} at {} for {}",
            request.tour_title,
            request.date,
            request.time,
            request.total_label()
        );
    }
    anyhow::ensure!(request.tour_id == tour_id, "checkout should carry the open tour");
    anyhow::ensure!(
        engine.checkout_handler().requests().len() == 1,
        "exactly one handoff expected"
    );
    Ok(())
}
