use approx::assert_abs_diff_eq;
use mvaperf_core::{
    BestCut, ClassifierResult, RankingKey, ResultSet, RocPoint, Selector, Structure,
    TrainingEvents,
};
use mvaperf_viz::{
    BarSummarySpec, OverlayLabel, OverlaySort, OverlaySpec, SidewaysSpec, SummaryAxis,
    SummaryMetric, bar_summary_artifact, rankings_artifact, roc_overlay_artifact,
    sideways_summary_artifact,
};

fn nn(
    features: &str,
    title: &str,
    l: u32,
    n: u32,
    events: &str,
    auc: f64,
    t: f64,
) -> ClassifierResult {
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
    r.auc = auc;
    r
}

fn curve(auc: f64) -> Vec<RocPoint> {
    vec![
        RocPoint { bkg_eff: 0.0, sig_eff: 0.0 },
        RocPoint { bkg_eff: 1.0 - auc, sig_eff: auc },
        RocPoint { bkg_eff: 1.0, sig_eff: 1.0 },
    ]
}

fn fixture() -> ResultSet {
    let mut set = ResultSet::new();
    for r in [
        nn("AF", "All Features", 2, 15, "338K", 0.80, 900.0),
        nn("AF", "All Features", 2, 15, "1K", 0.62, 3.0),
        nn("AF", "All Features", 2, 15, "10K", 0.71, 30.0),
        nn("AF", "All Features", 11, 300, "338K", 0.78, 90000.0),
        nn("AF", "All Features", 2, 300, "338K", 0.79, 5000.0),
        nn("BF", "Basic Features", 2, 15, "338K", 0.74, 700.0),
    ] {
        let c = curve(r.auc);
        set.push(r, c);
    }
    set
}

#[test]
fn sample_size_overlay_sorted_by_training_events() {
    let set = fixture();
    let spec = OverlaySpec {
        name: "SampleSize".into(),
        header: Some("Training Events".into()),
        sort: OverlaySort::TrainingEvents,
        label: OverlayLabel::TrainingEvents,
        select: Selector {
            features: Some("AF".into()),
            layers: Some(2),
            nodes: Some(15),
            ..Default::default()
        },
    };
    let a = roc_overlay_artifact(&set, &spec);
    assert_eq!(a.schema_version, "mvaperf_roc_overlay_v0");
    let labels: Vec<&str> = a.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["1K (AUC=0.620)", "10K (AUC=0.710)", "338K (AUC=0.800)"]);
    assert_eq!(a.series[0].bkg_eff.len(), a.series[0].sig_eff.len());
}

#[test]
fn structure_overlay_sorted_by_complexity() {
    let set = fixture();
    let spec = OverlaySpec {
        name: "Structures".into(),
        header: None,
        sort: OverlaySort::Complexity,
        label: OverlayLabel::Structure,
        select: Selector {
            features: Some("AF".into()),
            training_events: Some("338K".into()),
            ..Default::default()
        },
    };
    let a = roc_overlay_artifact(&set, &spec);
    let names: Vec<&str> = a.series.iter().map(|s| s.config_name.as_str()).collect();
    assert_eq!(names, vec!["AF_2x15_338K", "AF_2x300_338K", "AF_11x300_338K"]);
    assert!(a.series[2].label.starts_with("11\u{00D7}300"));
}

#[test]
fn auc_overlay_is_descending() {
    let set = fixture();
    let spec = OverlaySpec {
        name: "Inputs".into(),
        header: None,
        sort: OverlaySort::Auc,
        label: OverlayLabel::Features,
        select: Selector { training_events: Some("338K".into()), ..Default::default() },
    };
    let a = roc_overlay_artifact(&set, &spec);
    for w in a.series.windows(2) {
        assert!(w[0].auc >= w[1].auc);
    }
}

#[test]
fn bar_summary_grid() {
    let results = fixture().results();
    let spec = BarSummarySpec {
        name: "AUCByTrainingEvents_AF".into(),
        metric: SummaryMetric::Auc,
        features_title: "All Features".into(),
        categories: SummaryAxis::TrainingEvents,
        series: SummaryAxis::Structure,
        category_order: None,
        series_order: None,
        y_range: Some([0.5, 0.9]),
        log_y: None,
        select: Selector::default(),
    };
    let a = bar_summary_artifact(&results, &spec).unwrap();
    assert_eq!(a.categories, vec!["1K", "10K", "338K"]);
    let labels: Vec<&str> = a.series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["2\u{00D7}15", "2\u{00D7}300", "11\u{00D7}300"]);
    assert_eq!(a.series[0].values, vec![Some(0.62), Some(0.71), Some(0.80)]);
    assert_eq!(a.series[2].values, vec![None, None, Some(0.78)]);
    assert!(!a.log_y);
    assert_eq!(a.y_label, "AUC");
}

#[test]
fn bar_summary_time_defaults_to_log_and_rejects_same_axes() {
    let results = fixture().results();
    let mut spec = BarSummarySpec {
        name: "TimeByTrainingEvents_AF".into(),
        metric: SummaryMetric::TrainingTime,
        features_title: "All Features".into(),
        categories: SummaryAxis::TrainingEvents,
        series: SummaryAxis::Structure,
        category_order: Some(vec!["1K".into(), "20K".into(), "338K".into()]),
        series_order: Some(vec!["2x15".into()]),
        y_range: None,
        log_y: None,
        select: Selector::default(),
    };
    let a = bar_summary_artifact(&results, &spec).unwrap();
    assert!(a.log_y);
    assert_eq!(a.series.len(), 1);
    assert_eq!(a.series[0].values, vec![Some(3.0), None, Some(900.0)]);

    spec.series = SummaryAxis::TrainingEvents;
    assert!(bar_summary_artifact(&results, &spec).is_err());
}

#[test]
fn sideways_rows_are_section_major() {
    let results = fixture().results();
    let spec = SidewaysSpec {
        name: "SidewaysSummary".into(),
        features_titles: vec!["Basic Features".into(), "All Features".into()],
        categories: Some(vec!["1K".into(), "338K".into()]),
        series: Some(vec!["2x15".into()]),
        auc_range: [0.5, 0.82],
        time_range: [0.1, 1.0e6],
        select: Selector::default(),
    };
    let a = sideways_summary_artifact(&results, &spec).unwrap();
    assert_eq!(a.n_rows(), 4);
    let s = &a.series[0];
    assert_eq!(s.auc, vec![None, Some(0.74), Some(0.62), Some(0.80)]);
    assert_eq!(s.training_time, vec![None, Some(700.0), Some(3.0), Some(900.0)]);
}

#[test]
fn sideways_rejects_non_positive_time_range() {
    let spec = SidewaysSpec {
        name: "S".into(),
        features_titles: vec!["All Features".into()],
        categories: None,
        series: None,
        auc_range: [0.5, 0.82],
        time_range: [0.0, 10.0],
        select: Selector::default(),
    };
    assert!(sideways_summary_artifact(&[], &spec).is_err());
}

#[test]
fn rankings_cover_every_key() {
    let mut results = fixture().results();
    results[0].maxima.s_over_b = Some(BestCut { value: 0.05, cut: 0.7 });
    results[3].maxima.s_over_b = Some(BestCut { value: 0.09, cut: 0.4 });
    let a = rankings_artifact(&results);
    assert_eq!(a.rankings.len(), RankingKey::ALL.len());

    let auc = &a.rankings[0];
    assert_eq!(auc.key, RankingKey::Auc);
    assert_eq!(auc.entries[0].config_name, "AF_2x15_338K");
    assert_eq!(auc.entries[0].rank, 1);

    let time = &a.rankings[1];
    assert_eq!(time.entries[0].config_name, "AF_11x300_338K");

    let sb = a.rankings.iter().find(|t| t.key == RankingKey::SOverB).unwrap();
    assert_eq!(sb.entries[0].config_name, "AF_11x300_338K");
    assert_abs_diff_eq!(sb.entries[0].cut.unwrap(), 0.4);
    assert_eq!(sb.entries[2].value, None);

    let text = a.to_text();
    assert!(text.contains("== AUC ranking =="));
    assert!(text.contains("max(S/B)"));
}

#[test]
fn artifacts_round_trip_through_json() {
    let results = fixture().results();
    let a = rankings_artifact(&results);
    let json = serde_json::to_string(&a).unwrap();
    let back: mvaperf_viz::RankingsArtifact = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
}
