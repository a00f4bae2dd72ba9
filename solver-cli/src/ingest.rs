//! CSV input files.
//!
//! Every file has a header row. The matrix file holds one data row per
//! constraint and uses every column; the vector files are read from a single
//! named column.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use solver_ilp::IlpProblem;

/// Column holding the right-hand side in the `b` file.
pub const RHS_COLUMN: &str = "b";

/// Column holding the objective in the `c` file.
pub const OBJECTIVE_COLUMN: &str = "c";

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn parse_value(field: &str, row: usize, column: &str) -> Result<f64> {
    field
        .parse::<f64>()
        .with_context(|| format!("row {}, column '{}': '{}' is not a number", row, column, field))
}

/// Read a dense matrix: one row per record, one column per header field.
pub fn read_matrix<R: Read>(reader: R) -> Result<Vec<Vec<f64>>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().context("Failed to read header row")?.clone();

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read row {}", i + 1))?;
        let row = record
            .iter()
            .zip(headers.iter())
            .map(|(field, column)| parse_value(field, i + 1, column))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(rows)
}

/// Read the column named `column`.
pub fn read_vector<R: Read>(reader: R, column: &str) -> Result<Vec<f64>> {
    let mut rdr = csv_reader(reader);
    let headers = rdr.headers().context("Failed to read header row")?.clone();
    let idx = headers.iter().position(|h| h == column).ok_or_else(|| {
        anyhow!(
            "missing column '{}' (found: {})",
            column,
            headers.iter().collect::<Vec<_>>().join(", ")
        )
    })?;

    let mut values = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read row {}", i + 1))?;
        let field = record
            .get(idx)
            .ok_or_else(|| anyhow!("row {} has no column '{}'", i + 1, column))?;
        values.push(parse_value(field, i + 1, column)?);
    }

    Ok(values)
}

fn open<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open file {}", path.as_ref().display()))?;
    Ok(BufReader::new(file))
}

/// Read `A`, `b` and `c` from their files and validate the problem.
pub fn load_problem(matrix: &Path, rhs: &Path, objective: &Path) -> Result<IlpProblem> {
    let a = read_matrix(open(matrix)?)
        .with_context(|| format!("Failed to parse matrix from {}", matrix.display()))?;
    let b = read_vector(open(rhs)?, RHS_COLUMN)
        .with_context(|| format!("Failed to parse b from {}", rhs.display()))?;
    let c = read_vector(open(objective)?, OBJECTIVE_COLUMN)
        .with_context(|| format!("Failed to parse c from {}", objective.display()))?;

    log::info!(
        "Loaded problem: {} constraints, {} variables",
        a.len(),
        c.len()
    );

    IlpProblem::new(a, b, c).context("Input files do not describe a valid problem")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_matrix() {
        let data = "x0,x1\n1,1\n2, -0.5\n";
        let a = read_matrix(data.as_bytes()).unwrap();
        assert_eq!(a, vec![vec![1.0, 1.0], vec![2.0, -0.5]]);
    }

    #[test]
    fn test_read_matrix_without_rows() {
        let a = read_matrix("x0,x1\n".as_bytes()).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_ragged_matrix_is_an_error() {
        let err = read_matrix("x0,x1\n1,2\n3\n".as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = read_matrix("x0,x1\n1,abc\n".as_bytes()).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("column 'x1'"), "{}", msg);
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_read_named_column() {
        // Extra columns are ignored
        let data = "idx,b\n0,4\n1,-1.5\n";
        assert_eq!(read_vector(data.as_bytes(), "b").unwrap(), vec![4.0, -1.5]);
    }

    #[test]
    fn test_missing_column() {
        let err = read_vector("x\n1\n".as_bytes(), "c").unwrap_err();
        assert!(err.to_string().contains("missing column 'c'"));
    }

    #[test]
    fn test_load_problem_from_files() {
        let dir = std::env::temp_dir().join(format!("ilp-solve-ingest-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("matriz-A.csv"), "x0,x1\n1,1\n").unwrap();
        std::fs::write(dir.join("vector-b.csv"), "b\n4\n").unwrap();
        std::fs::write(dir.join("vector-c.csv"), "c\n-1\n-1\n").unwrap();

        let prob = load_problem(
            &dir.join("matriz-A.csv"),
            &dir.join("vector-b.csv"),
            &dir.join("vector-c.csv"),
        )
        .unwrap();

        assert_eq!(prob.num_vars(), 2);
        assert_eq!(prob.num_constraints(), 1);

        let err = load_problem(
            &dir.join("missing.csv"),
            &dir.join("vector-b.csv"),
            &dir.join("vector-c.csv"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.csv"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
