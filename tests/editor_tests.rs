use approx::assert_relative_eq;
use stat_charts::api::{ChartEditor, EditorConfig};
use stat_charts::core::{AlignmentCorner, AlignmentWeights, Point};
use stat_charts::interaction::DragMode;
use stat_charts::render::NullRenderer;
use stat_charts::store::{ChartKind, ChartStore, MemoryPersistence};

fn setup(kind: ChartKind) -> (ChartEditor, ChartStore<MemoryPersistence>, String) {
    let mut store = ChartStore::open(MemoryPersistence::new());
    let mut editor = ChartEditor::new(EditorConfig::default().with_chart_size(400.0)).expect("editor");
    let id = editor.add_chart(&mut store, kind);
    (editor, store, id)
}

fn radar_values(store: &ChartStore<MemoryPersistence>) -> Vec<f64> {
    store
        .active_chart()
        .and_then(|c| c.as_radar())
        .map(|d| d.stats().iter().map(|s| s.value).collect())
        .unwrap_or_default()
}

#[test]
fn editing_without_active_chart_is_a_no_op() {
    let mut store = ChartStore::open(MemoryPersistence::new());
    let editor = ChartEditor::default();

    assert!(!editor.rename_chart(&mut store, "Nobody"));
    assert!(editor.add_stat(&mut store).is_none());
    assert_eq!(editor.build_active_frame(&store).expect("frame"), None);
    assert_eq!(store.persistence().save_count(), 0);
}

#[test]
fn envelope_edits_reach_the_store() {
    let (editor, mut store, id) = setup(ChartKind::Radar);

    assert!(editor.rename_chart(&mut store, "Aria"));
    assert!(editor.set_description(&mut store, "Bard, level 4"));
    assert!(editor.set_color(&mut store, "#aa3300"));
    assert!(!editor.set_color(&mut store, "orange"));

    let chart = store.chart(&id).expect("chart");
    assert_eq!(chart.name, "Aria");
    assert_eq!(chart.description, "Bard, level 4");
    assert_eq!(chart.as_radar().map(|d| d.color()), Some("#aa3300"));
}

#[test]
fn stat_edits_on_active_radar_chart() {
    let (editor, mut store, _) = setup(ChartKind::Radar);
    let stat_id = store.active_chart().and_then(|c| c.as_radar()).expect("radar").stats()[0]
        .id
        .clone();

    assert!(editor.set_stat_value(&mut store, &stat_id, 80.0));
    assert!(editor.rename_stat(&mut store, &stat_id, "Might"));
    assert!(editor.set_stat_notes(&mut store, &stat_id, "Carries the party"));

    let data = store.active_chart().and_then(|c| c.as_radar()).expect("radar");
    let stat = data.stat(&stat_id).expect("stat");
    assert_eq!(stat.value, 80.0);
    assert_eq!(stat.label, "Might");
    assert_eq!(stat.notes.as_deref(), Some("Carries the party"));
}

#[test]
fn add_and_remove_stats_respect_the_floor() {
    let (mut editor, mut store, _) = setup(ChartKind::Radar);
    let added = editor.add_stat(&mut store).expect("added");
    assert_eq!(radar_values(&store).len(), 6);

    assert!(editor.remove_stat(&mut store, &added));
    let ids: Vec<String> = store
        .active_chart()
        .and_then(|c| c.as_radar())
        .expect("radar")
        .stats()
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert!(editor.remove_stat(&mut store, &ids[0]));
    assert!(editor.remove_stat(&mut store, &ids[1]));
    assert!(!editor.remove_stat(&mut store, &ids[2]));
    assert_eq!(radar_values(&store).len(), 3);
}

#[test]
fn full_mark_editing_paths() {
    let (editor, mut store, _) = setup(ChartKind::Radar);

    assert!(editor.set_full_mark(&mut store, 20.0));
    assert_eq!(radar_values(&store), vec![20.0; 5]);

    assert!(editor.step_full_mark(&mut store, 1));
    assert!(editor.set_full_mark_text(&mut store, "not a number"));
    let max = store
        .active_chart()
        .and_then(|c| c.as_radar())
        .map(|d| d.shared_full_mark());
    assert_eq!(max, Some(100.0));
    assert_eq!(radar_values(&store), vec![20.0; 5]);
}

#[test]
fn radar_edits_do_not_apply_to_alignment_charts() {
    let (editor, mut store, _) = setup(ChartKind::Alignment);
    assert!(!editor.set_full_mark(&mut store, 10.0));
    assert!(editor.add_stat(&mut store).is_none());
    assert!(!editor.set_color(&mut store, "#000000"));
}

#[test]
fn radar_drag_writes_values_through_the_store() {
    let (mut editor, mut store, _) = setup(ChartKind::Radar);
    let stat_id = store.active_chart().and_then(|c| c.as_radar()).expect("radar").stats()[0]
        .id
        .clone();
    let layout = editor.radar_layout();

    assert!(editor.radar_pointer_down(&store, &stat_id));
    assert_eq!(editor.radar_drag().mode(), DragMode::Dragging);

    let top = Point::new(layout.center.x, layout.center.y - layout.radius);
    assert_eq!(editor.radar_pointer_move(&mut store, top), Some(100.0));
    assert_eq!(radar_values(&store)[0], 100.0);

    let below = Point::new(layout.center.x, layout.center.y + 30.0);
    assert_eq!(editor.radar_pointer_move(&mut store, below), Some(0.0));
    assert_eq!(radar_values(&store)[0], 0.0);

    editor.radar_pointer_up();
    assert_eq!(editor.radar_pointer_move(&mut store, top), None);
    assert_eq!(radar_values(&store)[0], 0.0);
}

#[test]
fn radar_press_on_unknown_stat_is_ignored() {
    let (mut editor, store, _) = setup(ChartKind::Radar);
    assert!(!editor.radar_pointer_down(&store, "missing"));
    assert_eq!(editor.radar_drag().mode(), DragMode::Idle);
}

#[test]
fn readonly_editor_ignores_pointer_input() {
    let mut store = ChartStore::open(MemoryPersistence::new());
    let mut editor =
        ChartEditor::new(EditorConfig::default().with_readonly(true)).expect("editor");
    editor.add_chart(&mut store, ChartKind::Alignment);

    let top = editor.alignment_triangle().top;
    assert!(editor.alignment_pointer_down(&mut store, top).is_none());
    assert_eq!(editor.alignment_drag_mode(), DragMode::Idle);
}

#[test]
fn alignment_drag_updates_all_three_weights() {
    let (mut editor, mut store, _) = setup(ChartKind::Alignment);
    let triangle = editor.alignment_triangle();

    let pressed = editor.alignment_pointer_down(&mut store, triangle.right).expect("weights");
    assert_eq!(pressed.b, 100.0);
    assert_eq!(editor.alignment_drag_mode(), DragMode::Dragging);

    let moved = editor
        .alignment_pointer_move(&mut store, triangle.centroid())
        .expect("weights");
    let stored = store
        .active_chart()
        .and_then(|c| c.as_alignment())
        .map(|d| d.values())
        .expect("alignment");
    assert_relative_eq!(stored.a, moved.a, epsilon = 1e-9);
    assert_relative_eq!(stored.b, moved.b, epsilon = 1e-9);
    assert_relative_eq!(stored.c, moved.c, epsilon = 1e-9);
    assert!((stored.sum() - 100.0).abs() < 1e-9);

    editor.alignment_pointer_up();
    assert!(editor.alignment_pointer_move(&mut store, triangle.top).is_none());
}

#[test]
fn alignment_labels_and_weights() {
    let (editor, mut store, _) = setup(ChartKind::Alignment);
    assert!(editor.rename_alignment_label(&mut store, AlignmentCorner::Left, "Spirit"));
    assert!(editor.set_alignment_weights(&mut store, AlignmentWeights::new(50.0, 25.0, 25.0)));

    let data = store.active_chart().and_then(|c| c.as_alignment()).expect("alignment");
    assert_eq!(data.label(AlignmentCorner::Left), "Spirit");
    assert_eq!(data.values(), AlignmentWeights::new(50.0, 25.0, 25.0));
}

#[test]
fn selecting_another_chart_ends_drags() {
    let (mut editor, mut store, first) = setup(ChartKind::Radar);
    let stat_id = store.active_chart().and_then(|c| c.as_radar()).expect("radar").stats()[0]
        .id
        .clone();
    editor.radar_pointer_down(&store, &stat_id);

    editor.add_chart(&mut store, ChartKind::Alignment);
    assert_eq!(editor.radar_drag().mode(), DragMode::Idle);

    editor.select_chart(&mut store, Some(&first));
    assert_eq!(store.active_chart_id(), Some(first.as_str()));
}

#[test]
fn deleting_active_chart_clears_selection() {
    let (mut editor, mut store, _) = setup(ChartKind::Radar);
    assert!(editor.delete_active_chart(&mut store));
    assert!(store.charts().is_empty());
    assert!(store.active_chart_id().is_none());
    assert!(!editor.delete_active_chart(&mut store));
}

#[test]
fn render_active_chart_through_renderer() {
    let (editor, store, _) = setup(ChartKind::Radar);
    let mut renderer = NullRenderer::default();

    assert!(editor.render_active(&store, &mut renderer).expect("render"));
    assert_eq!(renderer.last_line_count, 5);
    assert_eq!(renderer.last_circle_count, 5);
}

#[test]
fn narrow_windows_shrink_the_chart() {
    let mut editor = ChartEditor::default();
    editor.resize_window(500.0, 900.0);
    assert_eq!(editor.chart_size(), 460.0);

    editor.resize_window(1400.0, 900.0);
    assert_eq!(editor.chart_size(), 650.0);
}

#[test]
fn tiny_windows_keep_a_usable_chart() {
    let mut store = ChartStore::open(MemoryPersistence::new());
    let mut editor = ChartEditor::default();
    editor.add_chart(&mut store, ChartKind::Radar);
    let min_size = editor.config().min_chart_size();

    editor.resize_window(300.0, 150.0);
    assert_eq!(editor.chart_size(), min_size);
    assert!(editor.build_active_frame(&store).expect("frame").is_some());

    editor.resize_window(300.0, 300.0);
    assert_eq!(editor.chart_size(), min_size);
    let layout = editor.radar_layout();
    assert!(layout.radius > 0.0);

    let stat_id = store.active_chart().and_then(|c| c.as_radar()).expect("radar").stats()[0]
        .id
        .clone();
    assert!(editor.radar_pointer_down(&store, &stat_id));
    let top = Point::new(layout.center.x, layout.center.y - layout.radius);
    assert_eq!(editor.radar_pointer_move(&mut store, top), Some(100.0));
    assert_eq!(radar_values(&store)[0], 100.0);
}
