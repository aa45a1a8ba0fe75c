//! End-to-end tests: files on disk → derived data and recorded figures.

mod common;

use ndarray::s;
use replica_viewer::color::Color;
use replica_viewer::figure::Series;
use replica_viewer::{
    aggregate, ConfigError, Derived, FigureHandle, FigureSet, KindSpec, Outputs, PlotOptions,
    ReplicaError, Scale,
};

fn code(c: &str) -> KindSpec {
    KindSpec::Code(c.to_string())
}

#[test]
fn defaults_superimpose_raw_data_in_one_figure() {
    let dir = common::default_runs("defaults");
    let mut figures = FigureSet::new();
    let result = aggregate(&dir, "stats*.txt", &PlotOptions::default(), &mut figures).unwrap();

    assert_eq!(result.outputs, vec!["o1", "o2"]);
    assert_eq!(result.figures, vec![FigureHandle(0)]);
    assert_eq!(figures.len(), 1);
    assert_eq!(result.data.shape(), vec![2, 10, 3]);

    let Derived::Superimposed { values } = &result.data else {
        panic!("expected superimposed data, got {:?}", result.data);
    };
    for o in 0..2 {
        for i in 0..10 {
            for r in 0..3 {
                assert_eq!(values[[o, i, r]], common::value(r, i, o));
            }
        }
    }

    let figure = figures.get(FigureHandle(0)).unwrap();
    assert!(figure.grid && figure.hold);
    assert_eq!(figure.x_limits, Some((0.0, 10.0)));
    assert_eq!(figure.legend, vec!["o1", "o2"]);
    assert_eq!(figure.x_label, "Iterations");
    assert_eq!(figure.y_label, "Value");
    // one line per replication and output
    assert_eq!(figure.series.len(), 6);
    assert_eq!(figure.series[0].color(), Color::BLUE);
    assert_eq!(figure.series[1].color(), Color::RED);
}

#[test]
fn filled_mode_returns_min_and_max() {
    let dir = common::default_runs("filled");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_kind(code("f"));
    let result = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap();

    assert_eq!(result.data.shape(), vec![2, 10, 2]);
    let Derived::Filled { values } = &result.data else {
        panic!("expected filled data");
    };

    for o in 0..2 {
        for i in 0..10 {
            let reps: Vec<f64> = (0..3).map(|r| common::value(r, i, o)).collect();
            let (lo, hi) = (values[[o, i, 0]], values[[o, i, 1]]);
            assert!(lo <= hi);
            assert!(reps.contains(&lo) && reps.contains(&hi));
            assert!(reps.iter().all(|&v| lo <= v && v <= hi));
        }
    }

    let expected_min: Vec<f64> = (0..10)
        .map(|i| (0..3).map(|r| common::value(r, i, 0)).fold(f64::INFINITY, f64::min))
        .collect();
    assert_eq!(values.slice(s![0, .., 0]).to_vec(), expected_min);

    let figure = figures.get(result.figures[0]).unwrap();
    assert_eq!(figure.series.len(), 2);
    assert!(figure.series.iter().all(|s| matches!(s, Series::Band(_))));
}

#[test]
fn moving_average_of_replication_mean() {
    let dir = common::default_runs("moving_average");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_kind(KindSpec::Window(2));
    let result = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap();

    assert_eq!(result.data.shape(), vec![2, 8]);
    let Derived::MovingAverage { window, values } = &result.data else {
        panic!("expected moving average");
    };
    assert_eq!(*window, 2);

    let mean = |o: usize, i: usize| (0..3).map(|r| common::value(r, i, o)).sum::<f64>() / 3.0;
    for o in 0..2 {
        for j in 0..8 {
            let expected = (mean(o, j + 1) + mean(o, j + 2)) / 2.0;
            assert!((values[[o, j]] - expected).abs() < 1e-12);
        }
    }

    let figure = figures.get(result.figures[0]).unwrap();
    let Series::Line(line) = &figure.series[0] else {
        panic!("expected a line");
    };
    assert_eq!(line.points.len(), 8);
    assert_eq!(line.points[0][0], 3.0);
    assert_eq!(line.points[7][0], 10.0);
}

#[test]
fn no_matching_files_fails_before_plotting() {
    let dir = common::temp_dir("empty");
    let mut figures = FigureSet::new();
    let err = aggregate(&dir, "stats*.txt", &PlotOptions::default(), &mut figures).unwrap_err();
    assert!(matches!(err, ReplicaError::NoFilesFound { .. }));
    assert!(figures.is_empty());
}

#[test]
fn unknown_type_fails_after_figures_exist() {
    let dir = common::default_runs("unknown_type");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_kind(code("z"));
    let err = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap_err();
    assert!(matches!(
        err,
        ReplicaError::Config(ConfigError::UnknownType(ref t)) if t == "z"
    ));
    assert_eq!(figures.len(), 1);
    assert!(figures.get(FigureHandle(0)).unwrap().series.is_empty());
}

#[test]
fn negative_window_is_an_unknown_type() {
    let dir = common::default_runs("negative_window");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_kind(KindSpec::Window(-3));
    let err = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap_err();
    assert!(matches!(err, ReplicaError::Config(ConfigError::UnknownType(_))));
}

#[test]
fn layout_splits_outputs_across_figures() {
    let dir = common::write_runs("layout", 2, 5, 3);
    let mut figures = FigureSet::new();
    let options = PlotOptions::new()
        .with_outputs(Outputs::Named(vec!["pop".into(), "energy".into(), "age".into()]))
        .with_layout(vec![1, 2]);
    let result = aggregate(&dir, "*.txt", &options, &mut figures).unwrap();

    assert_eq!(result.figures, vec![FigureHandle(0), FigureHandle(1)]);
    assert_eq!(figures.len(), 2);

    let first = figures.get(FigureHandle(0)).unwrap();
    let second = figures.get(FigureHandle(1)).unwrap();
    assert_eq!(first.legend, vec!["pop"]);
    assert_eq!(second.legend, vec!["energy", "age"]);
    assert_eq!(first.series.len(), 2);
    assert_eq!(second.series.len(), 4);
    // colors restart at each figure
    assert_eq!(first.series[0].color(), Color::BLUE);
    assert_eq!(second.series[0].color(), Color::BLUE);
    assert_eq!(second.series[1].color(), Color::RED);
}

#[test]
fn bad_layout_is_rejected_before_figures() {
    let dir = common::default_runs("bad_layout");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_layout(vec![3]);
    let err = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap_err();
    assert!(matches!(
        err,
        ReplicaError::Config(ConfigError::LayoutSum { sum: 3, outputs: 2 })
    ));
    assert!(figures.is_empty());
}

#[test]
fn scale_applies_to_plot_not_data() {
    let dir = common::default_runs("scale");
    let mut scalar = FigureSet::new();
    let mut vector = FigureSet::new();
    let a = aggregate(
        &dir,
        "stats*.txt",
        &PlotOptions::new().with_scale(Scale::Uniform(3.0)),
        &mut scalar,
    )
    .unwrap();
    let b = aggregate(
        &dir,
        "stats*.txt",
        &PlotOptions::new().with_scale(Scale::PerOutput(vec![3.0, 3.0])),
        &mut vector,
    )
    .unwrap();

    assert_eq!(a.data, b.data);
    assert_eq!(scalar.get(FigureHandle(0)), vector.get(FigureHandle(0)));

    let Series::Line(line) = &scalar.get(FigureHandle(0)).unwrap().series[0] else {
        panic!("expected a line");
    };
    assert_eq!(line.points[4], [5.0, 3.0 * common::value(0, 4, 0)]);
}

#[test]
fn iters_truncates_every_file() {
    let dir = common::default_runs("iters");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_iters(4);
    let result = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap();
    assert_eq!(result.data.shape(), vec![2, 4, 3]);
    assert_eq!(figures.get(FigureHandle(0)).unwrap().x_limits, Some((0.0, 4.0)));
}

#[test]
fn short_later_file_is_a_bounds_error() {
    let dir = common::default_runs("short_file");
    std::fs::write(dir.join("stats9.txt"), "1,2\n3,4\n").unwrap();
    let mut figures = FigureSet::new();
    let err = aggregate(&dir, "stats*.txt", &PlotOptions::default(), &mut figures).unwrap_err();
    match err {
        ReplicaError::Bounds { path, .. } => assert!(path.ends_with("stats9.txt")),
        other => panic!("expected bounds error, got {other:?}"),
    }
}

#[test]
fn iters_beyond_first_file_is_a_bounds_error() {
    let dir = common::default_runs("iters_too_large");
    let options = PlotOptions::default().with_iters(11);
    let mut figures = FigureSet::new();
    let err = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap_err();
    match err {
        ReplicaError::Bounds { path, .. } => assert!(path.ends_with("stats1.txt")),
        other => panic!("expected bounds error, got {other:?}"),
    }
    assert!(figures.is_empty());
}

#[test]
fn more_names_than_columns_is_a_bounds_error() {
    let dir = common::default_runs("too_many_names");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_outputs(Outputs::Count(3));
    let err = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap_err();
    assert!(matches!(err, ReplicaError::Bounds { .. }));
}

#[test]
fn custom_palette_cycles_within_a_figure() {
    let dir = common::write_runs("palette", 1, 3, 3);
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_colors(vec![Color::BLACK, Color::MAGENTA]);
    aggregate(&dir, "*.txt", &options, &mut figures).unwrap();
    let colors: Vec<Color> = figures
        .get(FigureHandle(0))
        .unwrap()
        .series
        .iter()
        .map(Series::color)
        .collect();
    assert_eq!(colors, vec![Color::BLACK, Color::MAGENTA, Color::BLACK]);
}

#[test]
fn derived_data_exports_as_json() {
    let dir = common::default_runs("export");
    let mut figures = FigureSet::new();
    let options = PlotOptions::new().with_kind(KindSpec::Window(2));
    let result = aggregate(&dir, "stats*.txt", &options, &mut figures).unwrap();
    let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
    assert_eq!(json["data"]["mode"], "moving_average");
    assert_eq!(json["data"]["window"], 2);
    assert_eq!(json["outputs"][1], "o2");
    assert_eq!(json["figures"].as_array().unwrap().len(), 1);
}

#[test]
fn fixture_directories_are_removed_on_drop() {
    let dir = common::default_runs("cleanup");
    let path = dir.to_path_buf();
    assert!(path.join("stats1.txt").exists());
    drop(dir);
    assert!(!path.exists());
}
