//! Tab-separated gene region table

use crate::core::{strand_char, GeneRegionRecord};
use std::io::{self, Write};

/// Column names, in output order
pub const HEADER: [&str; 15] = [
    "gene_name",
    "gene_id",
    "gene_type",
    "transcript_id",
    "gene_region",
    "chrom",
    "strand",
    "start",
    "end",
    "total_alu_count",
    "total_alu_length",
    "ir_alu_pair_count",
    "has_alu",
    "has_ir_alu",
    "alu_category",
];

fn bool_str(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

/// Write the header line
pub fn write_header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", HEADER.join("\t"))
}

/// Write one record
pub fn write_record<W: Write + ?Sized>(out: &mut W, r: &GeneRegionRecord) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        r.gene_name,
        r.gene_id,
        r.gene_type,
        r.transcript_id,
        r.region.label(),
        r.chrom,
        strand_char(r.strand),
        r.start,
        r.end,
        r.total_alu_count,
        r.total_alu_length,
        r.ir_alu_pair_count,
        bool_str(r.has_alu),
        bool_str(r.has_ir_alu),
        r.alu_category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AluCategory, GeneRegion, RegionType, Strand};

    #[test]
    fn test_header() {
        let mut out = Vec::new();
        write_header(&mut out).unwrap();
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("gene_name\tgene_id\t"));
        assert!(line.ends_with("has_ir_alu\talu_category\n"));
    }

    #[test]
    fn test_write_record() {
        let record = GeneRegionRecord {
            gene_name: "ABC".to_string(),
            gene_id: "ENSG1".to_string(),
            gene_type: "protein_coding".to_string(),
            transcript_id: "ENST1".to_string(),
            region: GeneRegion::Region(RegionType::Cds),
            chrom: "chr1".to_string(),
            strand: Some(Strand::Plus),
            start: 90,
            end: 200,
            total_alu_count: 1,
            total_alu_length: 51,
            ir_alu_pair_count: 0,
            has_alu: true,
            has_ir_alu: false,
            alu_category: AluCategory::NonIrSingleAlu,
        };
        let mut out = Vec::new();
        write_record(&mut out, &record).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ABC\tENSG1\tprotein_coding\tENST1\tCDS\tchr1\t+\t90\t200\t1\t51\t0\tTrue\tFalse\tnon_ir_single_alu\n"
        );
    }
}
