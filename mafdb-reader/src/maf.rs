//! Conversion of Mutation Annotation Format (MAF) records.
//!
//! The root table holds one row per MAF line. Columns marked with
//! [ColumnRule::Explode] are additionally decomposed into child tables
//! keyed by the MAF line they came from:
//!
//! | Column(s)                                            | Child table(s)                               |
//! |------------------------------------------------------|----------------------------------------------|
//! | `dbsnp_val_status`, `consequence`, ... (`;` lists)   | one row per list entry                       |
//! | `domains` (`;` list of `source:id`)                  | `key`, `value` pairs                         |
//! | `vcf_info` (`;` list of `KEY=VALUE` or flags)        | `key`, `value` pairs, flags are `true`       |
//! | `vcf_tumor_gt`, `vcf_normal_gt`                      | `vcf_format` keys zipped with genotype values |
//! | `all_effects` (`;` list of `,` separated VEP fields) | `all_effects`, `sift_vep`, `polyphen_vep`    |

use mafdb_table::{assign_priority_index, QuotingRule, Table};
use tracing::{debug, info, instrument};

use crate::{build_root, ColumnRule, ReaderError, RecordSet, Schema};

/// Columns holding `;` separated lists, each becomes a single column table.
const LIST_COLUMNS: [&str; 7] = [
    "dbsnp_val_status",
    "consequence",
    "existing_variation",
    "refseq",
    "pubmed",
    "filter",
    "gdc_filter",
];

/// Genotype columns zipped with the keys of `vcf_format`.
const GENOTYPE_COLUMNS: [&str; 2] = ["vcf_tumor_gt", "vcf_normal_gt"];
const FORMAT_COLUMN: &str = "vcf_format";

const VEP_HEADER: [&str; 11] = [
    "symbol",
    "consequence",
    "hgvsp_short",
    "transcript_id",
    "refseq",
    "hgvsc",
    "impact",
    "canonical",
    "sift",
    "polyphen",
    "strand",
];
const VEP_RULES: [QuotingRule; 11] = [
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Quote,
    QuotingRule::Mask,
    QuotingRule::Mask,
    QuotingRule::Verbatim,
];

/// Bracketed VEP score columns and the tables they are split into.
const VEP_SCORES: [(&str, &str); 2] = [("sift", "sift_vep"), ("polyphen", "polyphen_vep")];

/// Decomposes the exploded columns of a MAF root table into child tables.
///
/// Tables are returned in output order, a column is only decomposed when
/// the schema marks it with [ColumnRule::Explode].
pub fn maf_tables<'a>(schema: &Schema, root: &Table<'a>) -> Result<Vec<Table<'a>>, ReaderError> {
    let exploded = |column: &str| schema.locate_with_rule(column, ColumnRule::Explode).is_some();
    let mut tables = Vec::new();

    for column in LIST_COLUMNS {
        if exploded(column) {
            tables.push(root.split_rows(column, column, ';')?);
        }
    }

    if exploded("domains") {
        let domains = root.split_rows("domains", "domains", ';')?;
        tables.push(domains.kv_split(
            "domains",
            QuotingRule::Quote,
            QuotingRule::Quote,
            "domains",
            ':',
        )?);
    }

    if exploded("vcf_info") {
        let vcf_info = root.split_rows("vcf_info", "vcf_info", ';')?;
        tables.push(vcf_info.split_info(
            "vcf_info",
            QuotingRule::Quote,
            QuotingRule::Quote,
            "vcf_info",
            '=',
        )?);
    }

    for column in GENOTYPE_COLUMNS {
        if !exploded(column) {
            continue;
        }
        tables.push(root.kv_merge(
            FORMAT_COLUMN,
            column,
            QuotingRule::Quote,
            QuotingRule::Quote,
            column,
            ':',
            ':',
        )?);
    }

    if exploded("all_effects") {
        let all_effects = root.split_rows("all_effects", "all_effects", ';')?;
        let mut effects =
            all_effects.split_cols("all_effects", &VEP_HEADER, &VEP_RULES, "all_effects", ',')?;
        assign_priority_index(&mut effects);

        let mut scores = Vec::with_capacity(VEP_SCORES.len());
        for (column, name) in VEP_SCORES {
            let mut table = effects.split_brackets(column, name)?;
            assign_priority_index(&mut table);
            debug!(table = name, rows = table.nrow(), "Split VEP scores");
            scores.push(table);
        }

        tables.push(effects);
        tables.extend(scores);
    }

    Ok(tables)
}

#[instrument(skip_all, fields(table = %schema.table(), records = records.len()))]
/// Converts MAF records into the root statement followed by the
/// statements of every exploded child table.
pub fn convert_maf(schema: &Schema, records: &RecordSet) -> Result<String, ReaderError> {
    let root = build_root(schema, records)?;
    let children = maf_tables(schema, &root)?;

    let mut output = root.echo();
    for table in &children {
        output.push_str(&table.echo());
    }

    info!(
        tables = children.len() + 1,
        bytes = output.len(),
        "Converted MAF records"
    );
    Ok(output)
}
