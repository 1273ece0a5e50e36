use mvaperf_core::{
    Binning, ClassifierResult, EventClass, MetricSet, ResponsePair, ResultSet, Selector,
    Structure, TrainingEvents, Weights,
};
use mvaperf_viz::{
    BarSummarySpec, OverlayLabel, OverlaySort, OverlaySpec, SidewaysSpec, SummaryAxis,
    SummaryMetric, bar_summary_artifact, response_artifact, roc_artifact, roc_overlay_artifact,
    sideways_summary_artifact,
};
use mvaperf_viz_render::config::{VizConfig, resolve_config};
use mvaperf_viz_render::{KINDS, RenderError, render_svg, render_to_bytes, render_to_file};

fn evaluated(
    features: &str,
    title: &str,
    l: u32,
    n: u32,
    events: &str,
    t: f64,
) -> (ClassifierResult, ResponsePair) {
    let mut pair = ResponsePair::new(Binning::new(20, -0.5, 1.5).unwrap());
    let shift = l as f64 * 0.01;
    for i in 0..200 {
        let u = i as f64 / 200.0;
        pair.fill(0.3 + shift + 0.9 * u, EventClass::Signal).unwrap();
        pair.fill(-0.4 + 0.9 * u, EventClass::Background).unwrap();
    }
    let scan = pair.scan(&Weights::default(), MetricSet::Yields).unwrap();

    let mut r = ClassifierResult::new(
        "neurobgd",
        format!("{features}_{l}x{n}_{events}"),
        "NeuroBGD",
        features,
        title,
    );
    r.structure = Some(Structure { layers: l, nodes: n });
    r.training_events = Some(TrainingEvents::parse(events).unwrap());
    r.training_time_s = Some(t);
    r.record_scan(&scan, pair.signal.integral(), pair.background.integral());
    (r, pair)
}

fn result_set() -> (ResultSet, ResponsePair) {
    let mut set = ResultSet::new();
    let mut last = None;
    for (f, title, l, n, ev, t) in [
        ("AF", "All Features", 2, 15, "1K", 3.0),
        ("AF", "All Features", 2, 15, "338K", 900.0),
        ("AF", "All Features", 5, 300, "338K", 4000.0),
        ("BF", "Basic Features", 2, 15, "338K", 700.0),
    ] {
        let (r, pair) = evaluated(f, title, l, n, ev, t);
        let scan = pair.scan(&Weights::default(), MetricSet::Yields).unwrap();
        set.push(r, scan.points);
        last = Some(pair);
    }
    (set, last.unwrap())
}

fn artifact_json(kind: &str) -> String {
    let (set, pair) = result_set();
    let entry = &set.entries()[0];
    let results = set.results();
    match kind {
        "response" => serde_json::to_string(&response_artifact(&pair, &entry.result)).unwrap(),
        "roc" => serde_json::to_string(&roc_artifact(&entry.curve, &entry.result)).unwrap(),
        "roc_overlay" => {
            let spec = OverlaySpec {
                name: "SampleSize".into(),
                header: Some("Training Events".into()),
                sort: OverlaySort::TrainingEvents,
                label: OverlayLabel::TrainingEvents,
                select: Selector { features: Some("AF".into()), ..Default::default() },
            };
            serde_json::to_string(&roc_overlay_artifact(&set, &spec)).unwrap()
        }
        "bar_summary" => {
            let spec = BarSummarySpec {
                name: "AUC_AF".into(),
                metric: SummaryMetric::Auc,
                features_title: "All Features".into(),
                categories: SummaryAxis::Structure,
                series: SummaryAxis::TrainingEvents,
                category_order: None,
                series_order: None,
                y_range: None,
                log_y: None,
                select: Selector::default(),
            };
            serde_json::to_string(&bar_summary_artifact(&results, &spec).unwrap()).unwrap()
        }
        "sideways_summary" => {
            let spec: SidewaysSpec = serde_json::from_str(
                r#"{"features_titles": ["Basic Features", "All Features"]}"#,
            )
            .unwrap();
            serde_json::to_string(&sideways_summary_artifact(&results, &spec).unwrap()).unwrap()
        }
        other => panic!("no fixture for {other}"),
    }
}

#[test]
fn every_kind_renders_svg() {
    let config = VizConfig::default();
    for kind in KINDS {
        let svg = render_svg(&artifact_json(kind), kind, &config)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert!(svg.starts_with("<svg"), "{kind} output is not SVG");
        assert!(svg.trim_end().ends_with("</svg>"), "{kind} output is not closed");
    }
}

#[test]
fn roc_plot_carries_auc_and_diagonal() {
    let svg = render_svg(&artifact_json("roc"), "roc", &VizConfig::default()).unwrap();
    assert!(svg.contains("AUC = "));
    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains("NeuroBGD 2\u{00D7}15"));
}

#[test]
fn response_plot_uses_configured_labels() {
    let config = resolve_config(Some(
        "response:\n  signal_label: ttH Signal\n  background_label: tt Background\n",
    ))
    .unwrap();
    let svg = render_svg(&artifact_json("response"), "response", &config).unwrap();
    assert!(svg.contains("ttH Signal"));
    assert!(svg.contains("tt Background"));
    assert!(svg.contains("Test Data"));
}

#[test]
fn overlay_legend_lists_each_curve() {
    let svg =
        render_svg(&artifact_json("roc_overlay"), "roc_overlay", &VizConfig::default()).unwrap();
    assert!(svg.contains("1K (AUC="));
    assert!(svg.contains("338K (AUC="));
}

#[test]
fn sideways_summary_shows_section_titles() {
    let json = artifact_json("sideways_summary");
    let svg = render_svg(&json, "sideways_summary", &VizConfig::default()).unwrap();
    assert!(svg.contains("Basic Features"));
    assert!(svg.contains("All Features"));
    assert!(svg.contains("Training Time [s]"));
}

#[test]
fn unknown_kind_is_rejected() {
    let err = render_svg("{}", "pulls", &VizConfig::default()).unwrap_err();
    assert!(matches!(err, RenderError::UnknownKind(k) if k == "pulls"));
}

#[test]
fn malformed_artifact_is_a_deserialize_error() {
    let err = render_svg("{\"name\": 1}", "bar_summary", &VizConfig::default()).unwrap_err();
    assert!(matches!(err, RenderError::Deserialize(_)));
}

#[test]
fn unknown_format_is_rejected() {
    let err = render_to_bytes(&artifact_json("roc"), "roc", "gif", &VizConfig::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownFormat(f) if f == "gif"));
}

#[test]
fn render_to_file_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("mvaperf_render_{}", std::process::id()));
    let path = dir.join("plots").join("roc.svg");
    render_to_file(&artifact_json("roc"), "roc", &path, &VizConfig::default()).unwrap();
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    let _ = std::fs::remove_dir_all(&dir);
}
