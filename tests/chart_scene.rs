use regionviz::ChartConfig;
use regionviz::models::ChartPoint;
use regionviz::viz::{Role, Scene};

fn sample(n: usize) -> (Vec<String>, Vec<ChartPoint>) {
    let regions = ["Gangnam", "Nowon", "Jongno"];
    let labels = (0..n).map(|i| format!("t{:02}", i)).collect();
    let points = (0..n)
        .map(|i| {
            ChartPoint::new(
                regions[i % regions.len()],
                100.0 * (i + 1) as f64,
                10.0 * (i + 1) as f64,
            )
        })
        .collect();
    (labels, points)
}

#[test]
fn one_bar_per_entry_and_a_single_area() {
    let (labels, points) = sample(25);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    assert_eq!(scene.bars.len(), 25);
    assert_eq!(scene.area.top.len(), 25);
    assert!(scene.area.path_data().starts_with('M'));
    for role in [Role::XAxis, Role::YAxisBar, Role::YAxisArea] {
        assert!(scene.axis(role).is_some(), "missing {:?}", role);
    }
    for (bar, label) in scene.bars.iter().zip(&labels) {
        assert_eq!(&bar.label, label);
    }
}

#[test]
fn canvas_and_margins_follow_config() {
    let (labels, points) = sample(3);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    assert_eq!((scene.width, scene.height), (1440, 760));
    assert_eq!(scene.origin, (70.0, 70.0));
    assert_eq!(scene.chart_width, 1300.0);
    assert_eq!(scene.chart_height, 620.0);

    let wide = Scene::compose(&labels, &points, "", &ChartConfig::wide()).unwrap();
    assert_eq!(wide.width, 1800);
    assert_eq!(wide.chart_width, 1660.0);
}

#[test]
fn bars_scale_from_zero_to_max() {
    let (labels, points) = sample(4);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    let tallest = &scene.bars[3];
    assert!(tallest.rect.y.abs() < 1e-9);
    assert!((tallest.rect.height - scene.chart_height).abs() < 1e-9);
    let first = &scene.bars[0];
    assert!((first.rect.height - scene.chart_height / 4.0).abs() < 1e-9);

    // Bars do not overlap and keep x order.
    for pair in scene.bars.windows(2) {
        assert!(pair[0].rect.x + pair[0].rect.width < pair[1].rect.x);
    }
}

#[test]
fn area_domain_has_headroom() {
    let (labels, points) = sample(4);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    let (_, y_max) = scene.area.top[3];
    assert!((y_max - scene.chart_height / 2.0).abs() < 1e-9);
    assert!((scene.area.baseline - scene.chart_height).abs() < 1e-9);
}

#[test]
fn x_ticks_are_sparsified() {
    let (labels, points) = sample(25);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    let texts: Vec<&str> = scene
        .axis(Role::XAxis)
        .unwrap()
        .ticks
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["t10", "t20"]);
}

#[test]
fn y_ticks_use_thousands_separators() {
    let labels = vec!["a".to_string(), "b".to_string()];
    let points = vec![
        ChartPoint::new("X", 12345.0, 1.0),
        ChartPoint::new("Y", 500.0, 2.0),
    ];
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    let bar_axis = scene.axis(Role::YAxisBar).unwrap();
    assert_eq!(bar_axis.ticks.first().unwrap().text, "0");
    assert!(bar_axis.ticks.iter().any(|t| t.text == "10,000"));
    assert_eq!(bar_axis.title.as_ref().unwrap().text, "bar");
    assert_eq!(scene.axis(Role::YAxisArea).unwrap().title.as_ref().unwrap().text, "area");
}

#[test]
fn highlight_matches_region_only() {
    let (labels, points) = sample(6);
    let cfg = ChartConfig::default();
    let scene = Scene::compose(&labels, &points, "Nowon", &cfg).unwrap();
    for bar in &scene.bars {
        assert_eq!(bar.highlighted, bar.point.id == "Nowon");
        let expected = if bar.highlighted { "#4472C4" } else { "#70AD47" };
        assert_eq!(bar.fill.to_hex(), expected);
    }

    let none = Scene::compose(&labels, &points, "Unknown", &cfg).unwrap();
    assert!(none.bars.iter().all(|b| !b.highlighted));
}

#[test]
fn empty_dataset_draws_nothing_without_error() {
    let scene = Scene::compose(&[], &[], "", &ChartConfig::default()).unwrap();
    assert!(scene.bars.is_empty());
    assert_eq!(scene.area.path_data(), "");
    assert!(scene.axis(Role::XAxis).unwrap().ticks.is_empty());
}

#[test]
fn single_entry_dataset() {
    let (labels, points) = sample(1);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    assert_eq!(scene.bars.len(), 1);
    assert!(!scene.area.path_data().is_empty());
    assert!(scene.bars[0].rect.width > 0.0);
}

#[test]
fn all_zero_values_give_flat_bars() {
    let labels = vec!["a".to_string(), "b".to_string()];
    let points = vec![ChartPoint::new("X", 0.0, 0.0), ChartPoint::new("Y", 0.0, 0.0)];
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    assert!(scene.bars.iter().all(|b| b.rect.height == 0.0));
}

#[test]
fn hit_testing_uses_canvas_coordinates() {
    let (labels, points) = sample(5);
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    let (cx, cy) = scene.bar_center(2).unwrap();
    assert_eq!(scene.bar_at(cx, cy).unwrap().index, 2);
    assert!(scene.bar_at(1.0, 1.0).is_none());
    assert!(scene.bar_center(5).is_none());
}

#[test]
fn bad_color_is_reported() {
    let (labels, points) = sample(2);
    let cfg = ChartConfig {
        bar_color: "green".into(),
        ..ChartConfig::default()
    };
    assert!(Scene::compose(&labels, &points, "", &cfg).is_err());
}

#[test]
fn negative_bars_hang_from_the_zero_line() {
    let labels = vec!["a".to_string(), "b".to_string()];
    let points = vec![
        ChartPoint::new("Down", -500.0, 1.0),
        ChartPoint::new("Up", 1000.0, 2.0),
    ];
    let scene = Scene::compose(&labels, &points, "", &ChartConfig::default()).unwrap();
    let zero = scene.chart_height * 1000.0 / 1500.0;
    let down = &scene.bars[0].rect;
    let up = &scene.bars[1].rect;
    assert!(down.height > 0.0 && up.height > 0.0);
    assert!((down.y - zero).abs() < 1e-9);
    assert!((down.y + down.height - scene.chart_height).abs() < 1e-9);
    assert!((up.y + up.height - zero).abs() < 1e-9);

    let svg = regionviz::viz::render_svg(&scene);
    assert!(!svg.contains(r#"height="-"#));
}
