use anyhow::{Context, bail};
use flate2::read::GzDecoder;
use log::info;
use mtlmon_core::{Formula, Interval, Time};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// JSON abstract syntax of a formula.
///
/// Intervals are given as `[begin, end]` pairs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum Property {
    Proposition(String),
    Negation(Box<Property>),
    #[serde(alias = "conjunction")]
    Or {
        lhs: Box<Property>,
        rhs: Box<Property>,
    },
    Previous {
        formula: Box<Property>,
        interval: (u32, u32),
    },
    Next {
        formula: Box<Property>,
        interval: (u32, u32),
    },
    Since {
        lhs: Box<Property>,
        rhs: Box<Property>,
        interval: (u32, u32),
    },
    Until {
        lhs: Box<Property>,
        rhs: Box<Property>,
        interval: (u32, u32),
    },
}

fn interval((begin, end): (u32, u32)) -> anyhow::Result<Interval> {
    if begin > end {
        bail!("malformed interval [{begin}-{end}]: lower bound exceeds upper bound");
    }
    Ok(Interval::new(begin, end))
}

impl Property {
    pub(crate) fn build(self) -> anyhow::Result<Formula<String>> {
        let formula = match self {
            Property::Proposition(symbol) => Formula::atom(symbol),
            Property::Negation(sub) => Formula::not(sub.build()?),
            Property::Or { lhs, rhs } => Formula::or(lhs.build()?, rhs.build()?),
            Property::Previous {
                formula,
                interval: bounds,
            } => Formula::previous(formula.build()?, interval(bounds)?),
            Property::Next {
                formula,
                interval: bounds,
            } => Formula::next(formula.build()?, interval(bounds)?),
            Property::Since {
                lhs,
                rhs,
                interval: bounds,
            } => Formula::since(lhs.build()?, rhs.build()?, interval(bounds)?),
            Property::Until {
                lhs,
                rhs,
                interval: bounds,
            } => Formula::until(lhs.build()?, rhs.build()?, interval(bounds)?),
        };
        Ok(formula)
    }
}

pub(crate) fn formula(path: &Path) -> anyhow::Result<Formula<String>> {
    info!(target: "parser", "parsing formula file '{}'", path.display());
    let file =
        File::open(path).with_context(|| format!("failed to open file '{}'", path.display()))?;
    let property: Property = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse formula in '{}'", path.display()))?;
    property
        .build()
        .with_context(|| format!("invalid formula in '{}'", path.display()))
}

fn observations<R: Read>(reader: R) -> anyhow::Result<Vec<(Time, String)>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<(Time, String)>()
        .enumerate()
        .map(|(idx, row)| row.with_context(|| format!("failed to read observation {}", idx + 1)))
        .collect()
}

/// Reads the observations of a trace from a CSV file of `timestamp,symbol` rows,
/// decompressing it first if it has the `.gz` extension.
pub(crate) fn trace(path: &Path) -> anyhow::Result<Vec<(Time, String)>> {
    let time = std::time::Instant::now();
    info!(target: "parser", "reading trace file '{}'", path.display());
    let file =
        File::open(path).with_context(|| format!("failed to open file '{}'", path.display()))?;
    let observations = if path.extension().is_some_and(|ext| ext == "gz") {
        observations(GzDecoder::new(file))
    } else {
        observations(file)
    }
    .with_context(|| format!("failed to read trace in '{}'", path.display()))?;
    info!(
        "read {} observations in {:?}",
        observations.len(),
        time.elapsed()
    );
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> anyhow::Result<Formula<String>> {
        serde_json::from_str::<Property>(json)?.build()
    }

    #[test]
    fn until() {
        let formula = parse(
            r#"{"until": {"lhs": {"proposition": "a"}, "rhs": {"proposition": "b"}, "interval": [0, 1]}}"#,
        )
        .expect("formula");
        assert_eq!(
            formula,
            Formula::until(
                Formula::atom("a".to_string()),
                Formula::atom("b".to_string()),
                Interval::new(0, 1)
            )
        );
    }

    #[test]
    fn nested() {
        let formula = parse(
            r#"{"negation": {"conjunction": {
                "lhs": {"previous": {"formula": {"proposition": "a"}, "interval": [1, 2]}},
                "rhs": {"next": {"formula": {"proposition": "b"}, "interval": [0, 0]}}
            }}}"#,
        )
        .expect("formula");
        assert_eq!(formula.to_string(), "NOT PREVIOUS x=a [1-2] OR NEXT x=b [0-0]");
    }

    #[test]
    fn malformed_interval() {
        let err = parse(
            r#"{"since": {"lhs": {"proposition": "a"}, "rhs": {"proposition": "b"}, "interval": [3, 1]}}"#,
        )
        .expect_err("malformed interval");
        assert!(err.to_string().contains("malformed interval"));
    }

    #[test]
    fn unknown_operator() {
        assert!(parse(r#"{"eventually": {"proposition": "a"}}"#).is_err());
    }

    #[test]
    fn csv_observations() {
        let csv = "# timestamp,symbol\n1,a\n2, a\n2,a\n3,b\n";
        let observations = observations(csv.as_bytes()).expect("observations");
        assert_eq!(
            observations,
            vec![
                (1, "a".to_string()),
                (2, "a".to_string()),
                (2, "a".to_string()),
                (3, "b".to_string()),
            ]
        );
    }

    #[test]
    fn gz_observations() {
        use flate2::{Compression, write::GzEncoder};
        use std::io::Write;

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"0,x\n5,y\n").expect("write");
        let bytes = encoder.finish().expect("compress");
        let observations = observations(GzDecoder::new(bytes.as_slice())).expect("observations");
        assert_eq!(observations, vec![(0, "x".to_string()), (5, "y".to_string())]);
    }

    #[test]
    fn bad_timestamp() {
        let err = observations("1,a\nnow,b\n".as_bytes()).expect_err("bad timestamp");
        assert!(err.to_string().contains("observation 2"));
    }
}
