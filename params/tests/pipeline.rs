use std::fs::File;
use std::io::{BufReader, Write};

use params::{render, ArrayDeclaration, LogParser, ParamsError};

/// Writes a tuner log where every pass nudges each parameter to `iteration * 10 + index`.
fn tuner_log(num_params: usize, iterations: i64) -> String {
    let mut log = String::from("Using 8 threads\nE(init) = 0.0931200000\n");
    for iteration in 1..=iterations {
        log.push_str(&format!("Iteration {}\n", iteration));
        for pi in 0..num_params {
            let start = (iteration - 1) * 10 + pi as i64;
            let value = iteration * 10 + pi as i64;
            log.push_str(&format!(
                "- Checking param {} Param{} ({}) -- Changed {:+} to {} (E = 0.0931200000 to 0.0931100000)\n",
                pi,
                pi,
                start,
                value - start,
                value
            ));
        }
    }
    log
}

#[test]
fn test_parse_file_at_cutoff() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(tuner_log(4, 3).as_bytes()).unwrap();

    let reader = BufReader::new(File::open(file.path()).unwrap());
    let outcome = LogParser::new(2).parse_reader(reader).unwrap();

    assert_eq!(outcome.vector.as_slice(), &[20, 21, 22, 23]);
    assert_eq!(outcome.vector.to_string(), "20 21 22 23");
    assert_eq!(outcome.last_iteration, Some(2));
    assert!(outcome.stopped_early);
}

#[test]
fn test_cutoff_beyond_end_reads_everything() {
    let log = tuner_log(3, 2);
    let lines: Vec<&str> = log.lines().collect();

    let at_end = LogParser::new(2).parse(&lines).unwrap();
    let beyond = LogParser::new(50).parse(&lines).unwrap();

    assert_eq!(at_end.vector, beyond.vector);
    assert_eq!(at_end.lines_read, lines.len());
    assert!(!beyond.stopped_early);
    assert_eq!(beyond.vector.len(), 3);
}

#[test]
fn test_no_improvement_keeps_previous_value() {
    let log = [
        "Iteration 1",
        "- Checking param 0 BishopPair (50) -- Changed +1 to 51 (E = 0.1 to 0.09)",
        "Iteration 2",
        "- Checking param 0 BishopPair (51) -- No improvement (E = 0.09)",
    ];
    let vector = params::parse(log, 2).unwrap();
    assert_eq!(vector.as_slice(), &[51]);
}

#[test]
fn test_default_tables_from_log() {
    let log = tuner_log(842, 1);
    let vector = params::parse(log.lines(), 1).unwrap();
    assert_eq!(vector.len(), 842);

    let out = render(&vector, &ArrayDeclaration::defaults()).unwrap();
    assert!(out.contains("int BishopPair = 10;"));
    assert!(out.contains("int PawnStructureValues[4] = \n{\n      11,   12,   13,   14, \n};"));
    assert!(out.contains("int PcSq[2][6][64] = \n{\n    {\n        {\n              84,"));
}

#[test]
fn test_short_log_cannot_fill_tables() {
    let vector = params::parse(tuner_log(10, 1).lines(), 1).unwrap();
    let err = render(&vector, &ArrayDeclaration::defaults()).unwrap_err();

    // BishopPair + 4 + 5 consume all 10; AttackUnitValues gets nothing
    assert!(matches!(
        err,
        ParamsError::IndexOutOfRange { ref name, offset: 10, missing: 64 } if name == "AttackUnitValues"
    ));
}
