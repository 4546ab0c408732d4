use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use mafdb_reader::{ReaderError, RecordSet, Schema};
use tracing::info;

/// A conversion from records to statements.
type Conversion = fn(&Schema, &RecordSet) -> Result<String, ReaderError>;

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert records into a single INSERT statement for the root table
    Convert {
        #[command(flatten)]
        io: IoArgs,
    },
    /// Convert MAF records into the root table and every table exploded from it
    ///
    /// Columns with rule `3` in the schema are split into their own tables,
    /// i.e. `consequence`, `domains`, `vcf_info`, `vcf_tumor_gt` and `all_effects`.
    Maf {
        #[command(flatten)]
        io: IoArgs,
    },
}

#[derive(Debug, Args)]
pub struct IoArgs {
    #[arg(short, long, env = "MAFDB_SCHEMA")]
    /// The JSON schema describing the columns of each record.
    ///
    /// Columns are given in order as `{"name": ..., "rule": ...}` with rules
    /// `0` (mask), `1` (quote), `2` (verbatim) or `3` (explode).
    schema: PathBuf,
    #[arg(short, long)]
    /// The file to read records from, defaults to stdin.
    input: Option<PathBuf>,
    #[arg(short, long)]
    /// The file to write the statements to, defaults to stdout.
    output: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    /// The number of leading records to skip, i.e. `1` for a column header line.
    ///
    /// Applied after comment lines are removed.
    skip_rows: usize,
    #[arg(long)]
    /// Drop every line starting with this character, i.e. `#`.
    comment_prefix: Option<char>,
}

impl IoArgs {
    fn run(&self, conversion: Conversion) -> Result<()> {
        let schema = Schema::from_path(&self.schema)
            .with_context(|| format!("Load schema {}", self.schema.display()))?;
        let records = self.read_records().context("Read records")?;
        info!(records = records.len(), table = schema.table(), "Loaded records");

        let statements = conversion(&schema, &records).context("Convert records")?;
        self.write_statements(&statements)
            .context("Write statements")?;

        Ok(())
    }

    fn read_records(&self) -> io::Result<RecordSet> {
        let mut records = match &self.input {
            Some(path) => RecordSet::from_reader(BufReader::new(File::open(path)?))?,
            None => RecordSet::from_reader(io::stdin().lock())?,
        };

        if let Some(prefix) = self.comment_prefix {
            records = records.without_comments(prefix);
        }

        Ok(records.skip(self.skip_rows))
    }

    fn write_statements(&self, statements: &str) -> io::Result<()> {
        match &self.output {
            Some(path) => std::fs::write(path, statements),
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(statements.as_bytes())?;
                stdout.flush()
            },
        }
    }
}

impl Commands {
    /// Triggers any additional startup messages which are aware
    /// of the provided subcommand.
    pub fn display_startup_message(&self) {
        let (mode, io) = match self {
            Commands::Convert { io } => ("root", io),
            Commands::Maf { io } => ("maf", io),
        };

        info!(
            mode,
            schema = %io.schema.display(),
            input = %io.input.as_ref().map_or("<stdin>".into(), |path| path.display().to_string()),
            output = %io.output.as_ref().map_or("<stdout>".into(), |path| path.display().to_string()),
            "Starting conversion"
        );
    }

    /// Executes the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Convert { io } => io.run(mafdb_reader::convert),
            Commands::Maf { io } => io.run(mafdb_reader::convert_maf),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::*;
    use crate::Args;

    const SCHEMA: &str = r#"{
        "table": "variants",
        "starting_point": 0,
        "columns": [
            { "name": "hugo_symbol", "rule": 1 },
            { "name": "start_position", "rule": 2 },
            { "name": "consequence", "rule": 3 }
        ]
    }"#;

    const INPUT: &str = concat!(
        "#version 2.4\n",
        "Hugo_Symbol\tStart_Position\tConsequence\n",
        "TP53\t7675088\tmissense_variant;splice_region_variant\n",
        "KRAS\t25245350\tmissense_variant\n",
    );

    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let schema = dir.join("schema.json");
        let input = dir.join("input.maf");
        std::fs::write(&schema, SCHEMA).unwrap();
        std::fs::write(&input, INPUT).unwrap();
        (schema, input)
    }

    fn parse_command(args: &[&str]) -> Commands {
        let args = Args::try_parse_from(args).expect("Arguments should parse");
        args.command
    }

    #[test]
    fn test_maf_command_writes_statements() {
        let dir = tempfile::tempdir().unwrap();
        let (schema, input) = write_inputs(dir.path());
        let output = dir.path().join("out.sql");

        parse_command(&[
            "mafdb",
            "maf",
            "--schema",
            schema.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--comment-prefix",
            "#",
            "--skip-rows",
            "1",
        ])
        .execute()
        .expect("Conversion should succeed");

        let statements = std::fs::read_to_string(output).unwrap();
        assert_eq!(
            statements,
            concat!(
                "INSERT INTO variants VALUES \n",
                "(1,'TP53',7675088,'missense_variant;splice_region_variant'),\n",
                "(2,'KRAS',25245350,'missense_variant');\n",
                "INSERT INTO consequence VALUES \n",
                "(1,'missense_variant'),\n",
                "(1,'splice_region_variant'),\n",
                "(2,'missense_variant');\n",
            ),
        );
    }

    #[test]
    fn test_convert_command_only_writes_root() {
        let dir = tempfile::tempdir().unwrap();
        let (schema, input) = write_inputs(dir.path());
        let output = dir.path().join("out.sql");

        parse_command(&[
            "mafdb",
            "convert",
            "-s",
            schema.to_str().unwrap(),
            "-i",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--comment-prefix",
            "#",
            "--skip-rows",
            "1",
        ])
        .execute()
        .expect("Conversion should succeed");

        let statements = std::fs::read_to_string(output).unwrap();
        assert!(statements.starts_with("INSERT INTO variants VALUES \n"));
        assert!(!statements.contains("INSERT INTO consequence"));
    }

    #[test]
    fn test_header_line_not_skipped_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (schema, input) = write_inputs(dir.path());
        let output = dir.path().join("out.sql");

        let err = parse_command(&[
            "mafdb",
            "maf",
            "--schema",
            schema.to_str().unwrap(),
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .execute()
        .unwrap_err();

        let reader_err = err
            .downcast_ref::<ReaderError>()
            .expect("Error should originate from the reader");
        assert!(matches!(reader_err, ReaderError::RowWidth { line: 1, .. }), "{reader_err:?}");
        assert!(!output.exists(), "No output should be written on failure");
    }

    #[test]
    fn test_missing_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let err = parse_command(&["mafdb", "convert", "--schema", missing.to_str().unwrap()])
            .execute()
            .unwrap_err();
        assert!(format!("{err:#}").contains("Load schema"), "{err:#}");
    }
}
