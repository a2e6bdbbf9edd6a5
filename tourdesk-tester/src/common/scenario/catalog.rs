use anyhow::Result;
use tourdesk_core::{
    Catalog, Category, Difficulty, DurationBucket, Filter, GroupSizeBucket, SortKey, Tour,
};

use super::{ScenarioCtx, TestScenario};

pub fn catalog_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "catalog-filters",
            "Search, category, difficulty, and sort combinations",
            catalog_filters_expectation,
        ),
        TestScenario::new(
            "filter-panel",
            "Checkbox buckets and the price slider narrow the listing",
            filter_panel_expectation,
        ),
    ]
}

fn ids(tours: &[&Tour]) -> Vec<String> {
    tours.iter().map(|tour| tour.id.clone()).collect()
}

fn catalog_filters_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.session()?;
    let total = session.data().catalog.len();

    for sort in [SortKey::Popular, SortKey::PriceLow, SortKey::PriceHigh] {
        session.query_mut().sort = sort;
        let listed = session.visible_tours();
        anyhow::ensure!(listed.len() == total, "sorting must not drop tours");
        let ordered = match sort {
            SortKey::Popular => listed.windows(2).all(|w| w[0].popular >= w[1].popular),
            SortKey::PriceLow => listed.windows(2).all(|w| w[0].price_cents <= w[1].price_cents),
            SortKey::PriceHigh => listed.windows(2).all(|w| w[0].price_cents >= w[1].price_cents),
        };
        anyhow::ensure!(ordered, "listing not ordered by {}", sort.as_str());
    }

    for category in Catalog::categories() {
        for difficulty in Catalog::difficulties() {
            session.query_mut().category = category;
            session.query_mut().difficulty = difficulty;
            for tour in session.visible_tours() {
                anyhow::ensure!(
                    category.admits(&tour.category) && difficulty.admits(&tour.difficulty),
                    "tour {} leaked through {category}/{difficulty}",
                    tour.id
                );
            }
        }
    }

    session.query_mut().clear_filters();
    session.query_mut().search = "KAYAK".to_string();
    let kayak = ids(&session.visible_tours());
    anyhow::ensure!(kayak == ["4"], "case-insensitive search found {kayak:?}");

    session.query_mut().search = "no such tour".to_string();
    anyhow::ensure!(
        session.visible_tours().is_empty(),
        "unmatched search should list nothing"
    );

    session.query_mut().clear_filters();
    session.query_mut().category = Filter::Only(Category::FoodAndCulture);
    session.query_mut().difficulty = Filter::Only(Difficulty::Challenging);
    anyhow::ensure!(
        session.visible_tours().is_empty(),
        "no challenging food tour exists"
    );
    Ok(())
}

fn filter_panel_expectation(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.session()?;
    let total = session.data().catalog.len();

    session
        .filters_mut()
        .toggle_duration(DurationBucket::FullDay, true);
    let full_day = ids(&session.visible_tours());
    anyhow::ensure!(full_day == ["2"], "full-day filter listed {full_day:?}");

    session
        .filters_mut()
        .toggle_group_size(GroupSizeBucket::Intimate, true);
    anyhow::ensure!(
        session.visible_tours().is_empty(),
        "no full-day tour is also intimate"
    );
    anyhow::ensure!(session.filters().active_count() == 2, "two checkboxes are on");

    session.filters_mut().clear_all();
    anyhow::ensure!(session.visible_tours().len() == total, "cleared panel lists everything");

    // Slider positions step with the iteration so repeated runs sweep the range.
    let upper = u32::try_from(ctx.iteration % 19).unwrap_or(0) * 5 + 5;
    session.filters_mut().set_price_range(0, upper);
    for tour in session.visible_tours() {
        anyhow::ensure!(
            tour.price_cents <= i64::from(upper) * 100,
            "tour {} above ${upper} slipped through",
            tour.id
        );
    }
    Ok(())
}
