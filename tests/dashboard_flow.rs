use regionviz::dashboard::EventOutcome;
use regionviz::models::{ChartPoint, Dataset};
use regionviz::tooltip::{DefaultAction, TooltipLines};
use regionviz::{ButtonAction, ChartConfig, Dashboard, PointerInput, Selection, UiEvent};

fn dataset() -> Dataset {
    Dataset::from_entries([
        ("2023-01-01", ChartPoint::new("Gangnam", 12345.0, 678.0)),
        ("2023-01-02", ChartPoint::new("Nowon", 900.0, 60.0)),
        ("2023-01-03", ChartPoint::new("Gangnam", 4321.0, 1234.5)),
        ("2023-01-04", ChartPoint::new("Jongno", 50.0, 5.0)),
    ])
    .unwrap()
}

fn dashboard() -> Dashboard {
    Dashboard::new(dataset(), ChartConfig::default()).unwrap()
}

fn highlighted_ids(d: &Dashboard) -> Vec<String> {
    d.scene()
        .unwrap()
        .bars
        .iter()
        .filter(|b| b.highlighted)
        .map(|b| b.point.id.clone())
        .collect()
}

#[test]
fn initial_state_draws_once_with_nothing_highlighted() {
    let d = dashboard();
    assert_eq!(d.draw_count(), 1);
    assert_eq!(*d.selection(), Selection::Unselected);
    assert_eq!(d.highlighted_region(), "");
    assert!(highlighted_ids(&d).is_empty());
    assert!(d.tooltip().is_none());
}

#[test]
fn buttons_are_reset_then_regions() {
    let d = dashboard();
    let buttons = d.buttons();
    let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Reset", "Gangnam", "Nowon", "Jongno"]);
    assert_eq!(buttons[0].action, ButtonAction::Reset);
    assert!(buttons.iter().all(|b| !b.primary));
    assert_eq!(buttons[1].class_name(), "size-medium color-secondary");
}

#[test]
fn region_button_highlights_bars_and_marks_button_primary() {
    let mut d = dashboard();
    let outcome = d.select_region("Gangnam").unwrap();
    assert!(outcome.redrawn);
    assert_eq!(d.draw_count(), 2);
    assert_eq!(highlighted_ids(&d), vec!["Gangnam", "Gangnam"]);

    let primary: Vec<String> = d
        .buttons()
        .into_iter()
        .filter(|b| b.primary)
        .map(|b| b.label)
        .collect();
    assert_eq!(primary, vec!["Gangnam"]);
    let active = d.buttons().into_iter().find(|b| b.primary).unwrap();
    assert_eq!(active.class_name(), "size-medium color-primary");
}

#[test]
fn clicking_a_bar_matches_clicking_its_button() {
    let mut via_bar = dashboard();
    let mut via_button = dashboard();

    via_bar.click_bar(1).unwrap();
    via_button
        .handle(UiEvent::Button(ButtonAction::Region("Nowon".into())))
        .unwrap();

    assert_eq!(via_bar.highlighted_region(), "Nowon");
    assert_eq!(via_bar.highlighted_region(), via_button.highlighted_region());
    assert_eq!(
        via_bar.scene().unwrap().bar_fills(),
        via_button.scene().unwrap().bar_fills()
    );
    assert_eq!(via_bar.buttons(), via_button.buttons());
}

#[test]
fn click_outside_bars_changes_nothing() {
    let mut d = dashboard();
    let outcome = d
        .handle(UiEvent::Click(PointerInput::new((1.0, 1.0), (1.0, 1.0))))
        .unwrap();
    assert!(!outcome.redrawn);
    assert_eq!(d.highlighted_region(), "");
}

#[test]
fn reset_clears_highlight() {
    let mut d = dashboard();
    d.select_region("Jongno").unwrap();
    assert_eq!(highlighted_ids(&d), vec!["Jongno"]);
    d.reset().unwrap();
    assert_eq!(*d.selection(), Selection::Unselected);
    assert!(highlighted_ids(&d).is_empty());
    assert!(d.buttons().iter().all(|b| !b.primary));
}

#[test]
fn reselecting_keeps_selection_and_skips_redraw() {
    let mut d = dashboard();
    d.select_region("Nowon").unwrap();
    let count = d.draw_count();
    let outcome = d.select_region("Nowon").unwrap();
    assert_eq!(
        outcome,
        EventOutcome {
            default_action: DefaultAction::Allow,
            redrawn: false
        }
    );
    assert_eq!(d.draw_count(), count);
    assert_eq!(*d.selection(), Selection::Selected("Nowon".into()));
}

#[test]
fn unknown_region_highlights_nothing() {
    let mut d = dashboard();
    d.select_region("Mapo").unwrap();
    assert_eq!(d.highlighted_region(), "Mapo");
    assert!(highlighted_ids(&d).is_empty());
    assert!(d.buttons().iter().all(|b| !b.primary));
}

#[test]
fn hover_shows_formatted_tooltip_at_offset() {
    let mut d = dashboard();
    d.hover_bar(0, (500.0, 400.0)).unwrap();
    let tip = d.tooltip().unwrap();
    assert_eq!(tip.index, 0);
    assert_eq!(tip.label, "2023-01-01");
    let pos = tip.position.unwrap();
    assert_eq!((pos.x, pos.y), (480.0, 290.0));

    let lines = TooltipLines::for_point(&tip.point, "en");
    assert_eq!(lines.title, "id: Gangnam");
    assert_eq!(lines.bar, "bar: 12,345");
    assert_eq!(lines.area, "area: 678");

    d.hover_bar(2, (600.0, 400.0)).unwrap();
    let lines = TooltipLines::for_point(&d.tooltip().unwrap().point, "en");
    assert_eq!(lines.area, "area: 1,234.5");
}

#[test]
fn leaving_hides_tooltip() {
    let mut d = dashboard();
    d.hover_bar(1, (10.0, 10.0)).unwrap();
    assert!(d.tooltip().is_some());
    d.unhover().unwrap();
    assert!(d.tooltip().is_none());

    // Moving off the bars behaves like leaving.
    d.hover_bar(1, (10.0, 10.0)).unwrap();
    d.handle(UiEvent::PointerMove(PointerInput::new((1.0, 1.0), (1.0, 1.0))))
        .unwrap();
    assert!(d.tooltip().is_none());
}

#[test]
fn hover_does_not_redraw() {
    let mut d = dashboard();
    let before = d.draw_count();
    d.hover_bar(0, (1.0, 1.0)).unwrap();
    d.unhover().unwrap();
    assert_eq!(d.draw_count(), before);
}

#[test]
fn touch_on_bar_prevents_default() {
    let mut d = dashboard();
    let (cx, cy) = d.scene().unwrap().bar_center(3).unwrap();
    let outcome = d
        .handle(UiEvent::TouchStart(PointerInput::new((cx, cy), (cx, cy))))
        .unwrap();
    assert_eq!(outcome.default_action, DefaultAction::Prevent);

    let outcome = d
        .handle(UiEvent::TouchStart(PointerInput::new((1.0, 1.0), (1.0, 1.0))))
        .unwrap();
    assert_eq!(outcome.default_action, DefaultAction::Allow);
}

#[test]
fn unknown_bar_index_is_an_error() {
    let mut d = dashboard();
    assert!(d.click_bar(99).is_err());
    assert!(d.hover_bar(99, (0.0, 0.0)).is_err());
}

#[test]
fn replacing_dataset_rebuilds_regions_and_redraws() {
    let mut d = dashboard();
    d.select_region("Gangnam").unwrap();
    d.hover_bar(0, (1.0, 1.0)).unwrap();
    let next = Dataset::from_entries([
        ("x", ChartPoint::new("Mapo", 1.0, 1.0)),
        ("y", ChartPoint::new("Gangnam", 2.0, 2.0)),
    ])
    .unwrap();
    assert!(d.set_dataset(next).unwrap());
    assert_eq!(d.regions(), ["Mapo", "Gangnam"]);
    assert_eq!(d.scene().unwrap().bars.len(), 2);
    assert_eq!(highlighted_ids(&d), vec!["Gangnam"]);
    assert!(d.tooltip().is_none());
}

#[test]
fn empty_dataset_renders_reset_only() {
    let d = Dashboard::new(Dataset::new(), ChartConfig::default()).unwrap();
    assert_eq!(d.buttons().len(), 1);
    assert!(d.scene().unwrap().bars.is_empty());
}

#[test]
fn negative_bar_can_be_clicked_and_hovered() {
    let ds = Dataset::from_entries([
        ("t1", ChartPoint::new("Dobong", -500.0, 10.0)),
        ("t2", ChartPoint::new("Nowon", 1000.0, 20.0)),
    ])
    .unwrap();
    let mut d = Dashboard::new(ds, ChartConfig::default()).unwrap();
    assert!(d.scene().unwrap().bars.iter().all(|b| b.rect.height >= 0.0));

    let outcome = d.click_bar(0).unwrap();
    assert!(outcome.redrawn);
    assert_eq!(d.highlighted_region(), "Dobong");

    d.hover_bar(0, (100.0, 200.0)).unwrap();
    let lines = TooltipLines::for_point(&d.tooltip().unwrap().point, "en");
    assert_eq!(lines.bar, "bar: -500");
}
