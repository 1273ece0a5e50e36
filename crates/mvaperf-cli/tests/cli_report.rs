use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mvaperf"))
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let mut p = std::env::temp_dir();
    p.push(format!("mvaperf_cli_{}_{}_{}", std::process::id(), nanos, name));
    std::fs::create_dir_all(&p).unwrap();
    p
}

fn run(args: &[&str]) -> Output {
    Command::new(bin_path())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_slice(&std::fs::read(path).unwrap())
        .unwrap_or_else(|e| panic!("invalid JSON at {}: {}", path.display(), e))
}

/// Four events per class; `overlap` moves one signal event below the background.
fn split_halves(overlap: bool) -> String {
    let bkg = ["0.10", "0.20", "0.30", "0.40"];
    let sig = if overlap {
        ["0.15", "0.70", "0.80", "0.90"]
    } else {
        ["0.60", "0.70", "0.80", "0.90"]
    };
    let mut s = String::new();
    for v in bkg.iter().chain(sig.iter()) {
        s.push_str(v);
        s.push('\n');
    }
    s
}

const CONFIG: &str = r#"
out_dir: out
nbins: 100
sources:
  - name: neurobgd
    classifier: NeuroBGD
    format: { kind: split_halves, events_per_class: 4 }
    range: [-0.5, 1.5]
    directory: { path: scores, extension: csv }
    exclude:
      - { features: EF }
  - name: neurobayes
    classifier: NeuroBayes
    format: { kind: labelled }
    range: [-1.0, 1.0]
    files:
      - { path: nbexpert_Top10.txt, features: "10", features_title: Top 10 Features }
  - name: extra
    classifier: NeuroBGD
    format: { kind: split_halves, events_per_class: 4 }
    range: [-0.5, 1.5]
    directory: { path: not_there }
overlays:
  - name: SampleSize
    header: Training Events
    sort: training_events
    label: training_events
    select: { features: AF, layers: 2, nodes: 15 }
summaries:
  - name: AUC_AF
    metric: auc
    features_title: All Features
    categories: structure
    series: training_events
sideways:
  features_titles: [Basic Features, All Features]
"#;

fn write_fixture(root: &Path) -> PathBuf {
    let scores = root.join("scores");
    std::fs::create_dir_all(&scores).unwrap();
    std::fs::write(scores.join("AF_2x15_1K_3.5s.csv"), split_halves(true)).unwrap();
    std::fs::write(scores.join("AF_2x15_10K_30s.csv"), split_halves(false)).unwrap();
    std::fs::write(scores.join("AF_5x300_10K_400s.csv"), split_halves(false)).unwrap();
    std::fs::write(scores.join("BF_2x15_10K_25s.csv"), split_halves(true)).unwrap();
    std::fs::write(scores.join("EF_2x15_10K_25s.csv"), split_halves(true)).unwrap();
    std::fs::write(
        root.join("nbexpert_Top10.txt"),
        "# header\n# header\n0.9 1\n0.6 1\n-0.4 0\n-0.7 0\n",
    )
    .unwrap();
    let config = root.join("report.yaml");
    std::fs::write(&config, CONFIG).unwrap();
    config
}

#[test]
fn report_writes_results_rankings_and_plots() {
    let root = tmp_dir("report");
    let config = write_fixture(&root);

    let out = run(&["report", "--config", config.to_string_lossy().as_ref()]);
    assert!(
        out.status.success(),
        "report should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let out_dir = root.join("out");
    let results = read_json(&out_dir.join("results.json"));
    assert_eq!(results["schema_version"], "mvaperf_results_v0");
    let names: Vec<&str> = results["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["config_name"].as_str().unwrap())
        .collect();
    // directory files in sorted order, EF excluded, missing directory skipped
    assert_eq!(
        names,
        vec!["AF_2x15_10K", "AF_2x15_1K", "AF_5x300_10K", "BF_2x15_10K", "nbexpert_Top10"]
    );

    let rankings = read_json(&out_dir.join("rankings.json"));
    assert_eq!(rankings["schema_version"], "mvaperf_rankings_v0");
    let auc_table = &rankings["rankings"][0];
    assert_eq!(auc_table["key"], "auc");
    assert_eq!(auc_table["entries"].as_array().unwrap().len(), 5);
    let text = std::fs::read_to_string(out_dir.join("rankings.txt")).unwrap();
    assert!(text.contains("== AUC ranking =="));

    for plot in [
        "AF_2x15_1K_Output",
        "AF_2x15_1K_ROC",
        "nbexpert_Top10_ROC",
        "OverlayROC_SampleSize",
        "Summary_AUC_AF",
        "SidewaysSummary",
    ] {
        let svg = out_dir.join(format!("{plot}.svg"));
        assert!(svg.exists(), "missing plot: {}", svg.display());
        let artifact = out_dir.join("artifacts").join(format!("{plot}.json"));
        assert!(artifact.exists(), "missing artifact: {}", artifact.display());
    }

    let overlay = read_json(&out_dir.join("artifacts/OverlayROC_SampleSize.json"));
    assert_eq!(overlay["schema_version"], "mvaperf_roc_overlay_v0");
    let labels: Vec<&str> = overlay["series"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels.len(), 2);
    assert!(labels[0].starts_with("1K (AUC="));
    assert!(labels[1].starts_with("10K (AUC=1.000)"));

    let index = read_json(&out_dir.join("artifacts/index.json"));
    let kinds: Vec<&str> =
        index.as_array().unwrap().iter().map(|e| e["kind"].as_str().unwrap()).collect();
    assert!(kinds.contains(&"sideways_summary"));
    assert!(kinds.contains(&"bar_summary"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn report_out_dir_flag_overrides_config() {
    let root = tmp_dir("report_outdir");
    let config = write_fixture(&root);
    let elsewhere = root.join("elsewhere");

    let out = run(&[
        "report",
        "--config",
        config.to_string_lossy().as_ref(),
        "--out-dir",
        elsewhere.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    assert!(elsewhere.join("results.json").exists());
    assert!(!root.join("out").exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn report_rejects_unknown_format() {
    let root = tmp_dir("report_fmt");
    let config = write_fixture(&root);

    let out = run(&["report", "--config", config.to_string_lossy().as_ref(), "--format", "gif"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("gif"));

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn report_aborts_on_malformed_score_file() {
    let root = tmp_dir("report_bad");
    let config = write_fixture(&root);
    std::fs::write(root.join("scores/AF_2x15_1K_3.5s.csv"), "0.1\n0.2\nnan?\n").unwrap();

    let out = run(&["report", "--config", config.to_string_lossy().as_ref()]);
    assert!(!out.status.success(), "malformed input must abort the run");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Malformed line 3"), "stderr={stderr}");
    assert!(!root.join("out/results.json").exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn render_rerenders_an_artifact() {
    let root = tmp_dir("render");
    let config = write_fixture(&root);
    let out = run(&["report", "--config", config.to_string_lossy().as_ref()]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));

    let viz = root.join("viz.yaml");
    std::fs::write(&viz, "theme: root\nroc:\n  x_label: \"ttbar Background Eff.\"\n").unwrap();
    let artifact = root.join("out/artifacts/AF_2x15_10K_ROC.json");
    let target = root.join("rerender/roc.svg");
    let out = run(&[
        "render",
        "--input",
        artifact.to_string_lossy().as_ref(),
        "--kind",
        "roc",
        "--output",
        target.to_string_lossy().as_ref(),
        "--viz",
        viz.to_string_lossy().as_ref(),
    ]);
    assert!(out.status.success(), "stderr={}", String::from_utf8_lossy(&out.stderr));
    let svg = std::fs::read_to_string(&target).unwrap();
    assert!(svg.contains("ttbar Background Eff."));

    let out = run(&[
        "render",
        "--input",
        artifact.to_string_lossy().as_ref(),
        "--kind",
        "pulls",
        "--output",
        target.to_string_lossy().as_ref(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown artifact kind"));

    let _ = std::fs::remove_dir_all(&root);
}
