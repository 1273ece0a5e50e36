use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use mvaperf_core::{Binning, ResponsePair, Result};

use crate::format::{ScoreFormat, ScoreReader};

/// Drain `reader` into a fresh pair of histograms over `binning`.
pub fn fill_response(reader: &mut dyn ScoreReader, binning: Binning) -> Result<ResponsePair> {
    let mut pair = ResponsePair::new(binning);
    while let Some(ev) = reader.next_event()? {
        pair.fill(ev.score, ev.class)?;
    }
    Ok(pair)
}

/// Open `path`, read it as `format` and fill a response pair.
pub fn fill_file(path: &Path, format: &ScoreFormat, binning: Binning) -> Result<ResponsePair> {
    let file = File::open(path)?;
    let label = path.display().to_string();
    let mut reader = format.reader(BufReader::new(file), &label)?;
    let pair = fill_response(reader.as_mut(), binning)?;
    tracing::debug!(
        path = %label,
        format = format.kind(),
        n_signal = pair.signal.integral(),
        n_background = pair.background.integral(),
        "filled response"
    );
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mvaperf_core::{Error, MetricSet, Weights};
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir().join(format!("mvaperf-fill-{}-{}-{}", name, std::process::id(), nanos))
    }

    #[test]
    fn fill_counts_every_event() {
        let fmt = ScoreFormat::split_halves(3);
        let text = "0.1\n0.2\n0.3\n0.7\n0.8\n1.0\n";
        let mut r = fmt.reader(Cursor::new(text), "mem").unwrap();
        let pair = fill_response(r.as_mut(), Binning::new(10, 0.0, 1.0).unwrap()).unwrap();
        assert_relative_eq!(pair.signal.integral(), 3.0);
        assert_relative_eq!(pair.background.integral(), 3.0);
        // 1.0 is pulled into the last bin
        assert_relative_eq!(pair.signal.counts()[9], 1.0);
    }

    #[test]
    fn separated_file_gives_unit_auc() {
        let fmt = ScoreFormat::label_first_csv();
        let text = "0.0,0.1\n0.0,0.2\n1.0,0.8\n1.0,0.9\n";
        let mut r = fmt.reader(Cursor::new(text), "mem").unwrap();
        let pair = fill_response(r.as_mut(), Binning::new(100, -0.1, 1.1).unwrap()).unwrap();
        let scan = pair.scan(&Weights::default(), MetricSet::Full).unwrap();
        assert_relative_eq!(scan.auc, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn fill_file_reports_path_of_bad_line() {
        let p = tmp_path("bad.txt");
        std::fs::write(&p, "h\nh\n0.5 1\n0.5 x\n").unwrap();
        let err = fill_file(&p, &ScoreFormat::labelled(), Binning::new(10, -1.0, 1.0).unwrap())
            .unwrap_err();
        match err {
            Error::MalformedLine { path, line, .. } => {
                assert!(path.contains("mvaperf-fill-bad.txt"));
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let _ = std::fs::remove_file(&p);
    }

    #[test]
    fn fill_file_missing_is_io_error() {
        let p = tmp_path("missing.txt");
        let err = fill_file(&p, &ScoreFormat::labelled(), Binning::new(10, -1.0, 1.0).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
