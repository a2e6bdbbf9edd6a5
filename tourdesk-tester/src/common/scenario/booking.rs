use anyhow::{Context, Result};
use tourdesk_core::{
    BookingError, BookingSession, BookingStage, CheckoutError, TicketCounts, TicketKind,
};

use super::{ScenarioCtx, TestScenario};

pub fn booking_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "date-availability",
            "Only bookable, non-past days of the priced month are selectable",
            date_availability_expectation,
        ),
        TestScenario::new(
            "time-slots",
            "Time picking requires a date and skips closed slots",
            time_slots_expectation,
        ),
        TestScenario::new(
            "ticket-clamping",
            "Ticket counters never drop below zero",
            ticket_clamping_expectation,
        ),
        TestScenario::new(
            "booking-totals",
            "Line items and totals follow the date price",
            booking_totals_expectation,
        ),
        TestScenario::new(
            "tour-switch-reset",
            "Opening any tour resets tickets, date, and time",
            tour_switch_reset_expectation,
        ),
        TestScenario::new(
            "checkout-gate",
            "Checkout stays disabled until the booking is complete",
            checkout_gate_expectation,
        ),
    ]
}

/// First selectable day of the displayed month.
pub fn first_open_day(session: &BookingSession) -> Result<u32> {
    session
        .calendar_cells()
        .iter()
        .find(|cell| cell.selectable)
        .map(|cell| cell.day)
        .with_context(|| {
            format!(
                "no selectable day in {} as of {}",
                session.month().label(),
                session.today()
            )
        })
}

fn open_first_tour(ctx: &ScenarioCtx) -> Result<BookingSession> {
    let mut session = ctx.session()?;
    let index = ctx.iteration % session.data().catalog.len().max(1);
    let tour_id = session
        .data()
        .catalog
        .iter()
        .nth(index)
        .map(|tour| tour.id.clone())
        .context("catalog is empty")?;
    session.select_tour(&tour_id)?;
    Ok(session)
}

fn date_availability_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = open_first_tour(ctx)?;
    let today = session.today();
    let month = session.month();

    for cell in session.calendar_cells() {
        let result = session.clone().pick_date(cell.day);
        anyhow::ensure!(
            result.is_ok() == cell.selectable,
            "day {} selectable={} but pick returned {result:?}",
            cell.day,
            cell.selectable
        );
        if cell.selectable {
            anyhow::ensure!(cell.date >= today, "day {} is in the past", cell.day);
            anyhow::ensure!(
                cell.display_price_cents().is_some(),
                "selectable day {} shows no price",
                cell.day
            );
        } else {
            anyhow::ensure!(
                cell.display_price_cents().is_none(),
                "unselectable day {} shows a price",
                cell.day
            );
        }
    }

    let past_bookable = session
        .calendar_cells()
        .into_iter()
        .find(|cell| cell.date < today && cell.availability.is_some_and(|a| a.bookable));
    if let Some(cell) = past_bookable {
        let outcome = session.pick_date(cell.day);
        anyhow::ensure!(
            matches!(outcome, Err(BookingError::DateInPast { .. })),
            "past day {} returned {outcome:?}",
            cell.day
        );
    }

    // The day table carries over to whichever month is on screen.
    session.next_month();
    for cell in session.calendar_cells() {
        let expected = cell.availability.is_some_and(|a| a.bookable) && cell.date >= today;
        anyhow::ensure!(
            cell.selectable == expected,
            "{} day {} selectable={}",
            session.month().label(),
            cell.day,
            cell.selectable
        );
        if let Some(price) = cell.display_price_cents() {
            let picked = session.clone().pick_date(cell.day)?;
            anyhow::ensure!(picked.price_cents == price, "day {} price drifted", cell.day);
        }
    }
    session.prev_month();
    anyhow::ensure!(session.month() == month, "navigation should return to {}", month.label());

    // Moving the clock past the first open day closes it.
    let first = first_open_day(&session)?;
    if let Some(later) = month.date(first).and_then(|date| date.succ_opt()) {
        session.set_today(later);
        let outcome = session.pick_date(first);
        anyhow::ensure!(
            matches!(outcome, Err(BookingError::DateInPast { .. })),
            "day {first} still open after today moved to {later}: {outcome:?}"
        );
    }
    Ok(())
}

fn time_slots_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = open_first_tour(ctx)?;
    let first_slot = session
        .time_slots()
        .first()
        .map(|slot| slot.time.clone())
        .context("no time slots")?;
    anyhow::ensure!(
        session.pick_time(&first_slot) == Err(BookingError::DateRequired),
        "time pick before a date must be refused"
    );

    let day = first_open_day(&session)?;
    session.pick_date(day)?;
    anyhow::ensure!(session.stage() == BookingStage::ChooseTime, "date pick advances the stage");

    let slots = session.time_slots().to_vec();
    for slot in &slots {
        let picked = session.pick_time(&slot.time);
        anyhow::ensure!(
            picked.is_ok() == slot.bookable,
            "slot {} bookable={} but pick returned {picked:?}",
            slot.time,
            slot.bookable
        );
    }
    let last_open = slots
        .iter()
        .rev()
        .find(|slot| slot.bookable)
        .context("no bookable slot")?;
    anyhow::ensure!(
        session.selection().time.as_deref() == Some(last_open.time.as_str()),
        "closed slots must not replace the chosen time"
    );

    session.back_to_dates();
    session.pick_date(day)?;
    anyhow::ensure!(session.selection().time.is_none(), "re-picking a date clears the time");
    Ok(())
}

fn ticket_clamping_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = open_first_tour(ctx)?;
    let extra = u32::try_from(ctx.iteration % 4).unwrap_or(0) + 1;

    for kind in TicketKind::ALL {
        let start = session.tickets().count(kind);
        for _ in 0..start + extra {
            session.decrement_ticket(kind);
        }
        anyhow::ensure!(session.tickets().count(kind) == 0, "{kind} went below zero");
        for _ in 0..extra {
            session.increment_ticket(kind);
        }
        anyhow::ensure!(
            session.tickets().count(kind) == extra,
            "{kind} should count {extra}"
        );
    }
    anyhow::ensure!(
        session.tickets().total() == extra * 3,
        "total guests mismatch"
    );
    Ok(())
}

fn booking_totals_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = open_first_tour(ctx)?;
    let tour_price = session.current_tour().context("tour should be open")?.price_cents;
    anyhow::ensure!(
        session.summary().total_cents == tour_price * 2,
        "pre-date total should use the tour price for two adults"
    );

    let day = first_open_day(&session)?;
    let picked = session.pick_date(day)?;
    let youth = u32::try_from(ctx.iteration % 3).unwrap_or(0);
    for _ in 0..youth {
        session.increment_ticket(TicketKind::Youth);
    }
    session.increment_ticket(TicketKind::Child);

    let summary = session.summary();
    let prices = session.price_schedule();
    let expected = 2 * picked.price_cents + i64::from(youth) * prices.youth_cents;
    anyhow::ensure!(
        summary.total_cents == expected,
        "total {} != expected {}",
        summary.total_cents,
        expected
    );
    anyhow::ensure!(summary.subtotal_cents == summary.total_cents, "no fees are modeled");
    let child = summary.line(TicketKind::Child).context("child line")?;
    anyhow::ensure!(child.total_cents == 0, "children ride free");
    anyhow::ensure!(
        summary.visible_lines().count() == if youth > 0 { 3 } else { 2 },
        "zero-count lines are hidden"
    );
    Ok(())
}

fn tour_switch_reset_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.session()?;
    let ids: Vec<String> = session
        .data()
        .catalog
        .iter()
        .map(|tour| tour.id.clone())
        .collect();
    let first = ids.first().context("catalog is empty")?;
    let target = &ids[ctx.iteration % ids.len()];

    session.select_tour(first)?;
    session.increment_ticket(TicketKind::Youth);
    session.decrement_ticket(TicketKind::Adult);
    let day = first_open_day(&session)?;
    session.pick_date(day)?;
    if let Some(slot) = session.time_slots().iter().find(|s| s.bookable).cloned() {
        session.pick_time(&slot.time)?;
    }
    session.back_to_catalog();
    anyhow::ensure!(
        session.selection().date.is_some(),
        "returning to the catalog keeps the selection"
    );

    session.select_tour(target)?;
    let selection = session.selection();
    anyhow::ensure!(
        selection.tickets == TicketCounts::new(2, 0, 0),
        "tickets should reset to two adults, got {:?}",
        selection.tickets
    );
    anyhow::ensure!(selection.date.is_none(), "date should be cleared");
    anyhow::ensure!(selection.time.is_none(), "time should be cleared");
    anyhow::ensure!(session.stage() == BookingStage::ChooseDate, "stage should reset");
    Ok(())
}

fn checkout_gate_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut engine = ctx.engine();
    let mut session = engine.create_session(ctx.today)?;
    anyhow::ensure!(
        matches!(
            engine.checkout(&session),
            Err(CheckoutError::Booking(BookingError::NoTourSelected))
        ),
        "checkout needs an open tour"
    );

    let tour_id = session
        .data()
        .catalog
        .iter()
        .next()
        .map(|tour| tour.id.clone())
        .context("catalog is empty")?;
    session.select_tour(&tour_id)?;
    let day = first_open_day(&session)?;
    session.pick_date(day)?;
    anyhow::ensure!(!session.summary().complete, "missing time keeps checkout disabled");
    anyhow::ensure!(
        session.summary().checkout_label() == "Complete Booking Details",
        "incomplete label expected"
    );

    let slot = session
        .time_slots()
        .iter()
        .find(|s| s.bookable)
        .map(|s| s.time.clone())
        .context("no bookable slot")?;
    session.pick_time(&slot)?;
    for kind in TicketKind::ALL {
        while session.tickets().count(kind) > 0 {
            session.decrement_ticket(kind);
        }
    }
    anyhow::ensure!(
        engine.checkout(&session).is_err(),
        "zero guests keeps checkout disabled"
    );

    session.increment_ticket(TicketKind::Adult);
    anyhow::ensure!(session.summary().checkout_label() == "Checkout", "complete label expected");
    let request = engine.checkout(&session)?;
    anyhow::ensure!(request.tickets.total() == 1, "one guest booked");
    anyhow::ensure!(
        engine.checkout_handler().requests().len() == 1,
        "only the complete attempt reaches the handler"
    );
    Ok(())
}
